//! Engine configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::Error;

const DEFAULT_MIN_PARTICIPANTS: usize = 2;
const DEFAULT_RECOMMENDED_PEOPLE_LIMIT: usize = 5;
const DEFAULT_RESERVATION_OVERLAP_MINUTES: i64 = 30;
const DEFAULT_AUTO_SCHEDULE_HOUR_UTC: u32 = 19;
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 2000;

/// Configuration values controlling quorum detection and reservation
/// consensus.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONVENE")]
pub struct ConsensusSettings {
    /// Minimum number of mutually interested users before a reservation is
    /// created.
    #[ortho_config(default = 2)]
    pub min_participants: usize,
    /// Absolute acceptance count that confirms a pending reservation.
    /// Absent means every participant must accept.
    pub confirmation_threshold: Option<usize>,
    /// How many compatible people to attach to each recommended venue.
    #[ortho_config(default = 5)]
    pub recommended_people_limit: usize,
    /// Half-width, in minutes, of the duplicate-suppression window around a
    /// candidate reservation time.
    #[ortho_config(default = 30)]
    pub reservation_overlap_minutes: i64,
    /// Hour of day, UTC, at which auto-created reservations are scheduled.
    #[ortho_config(default = 19)]
    pub auto_schedule_hour_utc: u32,
    /// Upper bound, in milliseconds, on waiting for a venue write lock.
    #[ortho_config(default = 2000)]
    pub lock_timeout_ms: u64,
}

/// How many acceptances confirm a pending reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationThreshold {
    /// Every participant must accept.
    AllParticipants,
    /// A fixed acceptance count is enough, capped at the roster size.
    AtLeast(usize),
}

impl ConfirmationThreshold {
    /// Acceptances required for a roster of the given size.
    #[must_use]
    pub fn required_for(&self, roster_size: usize) -> usize {
        match self {
            Self::AllParticipants => roster_size,
            Self::AtLeast(count) => (*count).min(roster_size),
        }
    }
}

/// Validated engine policy derived from [`ConsensusSettings`].
#[derive(Debug, Clone)]
pub struct ConsensusPolicy {
    min_participants: usize,
    confirmation_threshold: ConfirmationThreshold,
    recommended_people_limit: usize,
    reservation_overlap: chrono::Duration,
    auto_schedule_hour_utc: u32,
    lock_timeout: std::time::Duration,
}

impl ConsensusPolicy {
    /// Minimum number of mutually interested users required for quorum.
    #[must_use]
    pub fn min_participants(&self) -> usize {
        self.min_participants
    }

    /// Acceptance rule confirming a pending reservation.
    #[must_use]
    pub fn confirmation_threshold(&self) -> ConfirmationThreshold {
        self.confirmation_threshold
    }

    /// People attached to each recommended venue.
    #[must_use]
    pub fn recommended_people_limit(&self) -> usize {
        self.recommended_people_limit
    }

    /// Half-width of the duplicate-suppression window.
    #[must_use]
    pub fn reservation_overlap(&self) -> chrono::Duration {
        self.reservation_overlap
    }

    /// Hour of day, UTC, for auto-scheduled reservations.
    #[must_use]
    pub fn auto_schedule_hour_utc(&self) -> u32 {
        self.auto_schedule_hour_utc
    }

    /// Upper bound on waiting for a venue write lock.
    #[must_use]
    pub fn lock_timeout(&self) -> std::time::Duration {
        self.lock_timeout
    }
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            min_participants: DEFAULT_MIN_PARTICIPANTS,
            confirmation_threshold: ConfirmationThreshold::AllParticipants,
            recommended_people_limit: DEFAULT_RECOMMENDED_PEOPLE_LIMIT,
            reservation_overlap: chrono::Duration::minutes(DEFAULT_RESERVATION_OVERLAP_MINUTES),
            auto_schedule_hour_utc: DEFAULT_AUTO_SCHEDULE_HOUR_UTC,
            lock_timeout: std::time::Duration::from_millis(DEFAULT_LOCK_TIMEOUT_MS),
        }
    }
}

impl TryFrom<ConsensusSettings> for ConsensusPolicy {
    type Error = Error;

    fn try_from(settings: ConsensusSettings) -> Result<Self, Error> {
        if settings.min_participants < 1 {
            return Err(Error::invalid_request(
                "min_participants must be at least 1",
            ));
        }
        let confirmation_threshold = match settings.confirmation_threshold {
            None => ConfirmationThreshold::AllParticipants,
            Some(count) if count >= 2 => ConfirmationThreshold::AtLeast(count),
            Some(count) => {
                return Err(Error::invalid_request(format!(
                    "confirmation_threshold must be at least 2, got {count}"
                )));
            }
        };
        if settings.reservation_overlap_minutes < 0 {
            return Err(Error::invalid_request(
                "reservation_overlap_minutes must not be negative",
            ));
        }
        if settings.auto_schedule_hour_utc > 23 {
            return Err(Error::invalid_request(format!(
                "auto_schedule_hour_utc must be an hour of day, got {}",
                settings.auto_schedule_hour_utc
            )));
        }
        if settings.lock_timeout_ms == 0 {
            return Err(Error::invalid_request("lock_timeout_ms must be positive"));
        }

        Ok(Self {
            min_participants: settings.min_participants,
            confirmation_threshold,
            recommended_people_limit: settings.recommended_people_limit,
            reservation_overlap: chrono::Duration::minutes(settings.reservation_overlap_minutes),
            auto_schedule_hour_utc: settings.auto_schedule_hour_utc,
            lock_timeout: std::time::Duration::from_millis(settings.lock_timeout_ms),
        })
    }
}
