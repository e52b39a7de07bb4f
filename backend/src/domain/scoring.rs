//! Compatibility scoring.
//!
//! Pure, deterministic arithmetic over prepared interest and friendship
//! data. Nothing here touches a port; the recommendation service assembles a
//! [`CompatibilityScorer`] from one coherent snapshot and throws it away at
//! the end of the request.
//!
//! Pairwise compatibility lands in [0, 1] and is symmetric: it blends
//! shared-interest overlap (Jaccard index over the venues each user
//! currently wants) with declared affinity (friendship strength, averaged
//! across the two directed edges and squashed into the unit interval).
//! Venue scores are open-ended points: proximity decays exponentially with
//! distance and each interested peer contributes in proportion to their
//! pairwise compatibility with the viewer.

use std::collections::{HashMap, HashSet};

use crate::domain::friendship::Friendship;
use crate::domain::ids::{UserId, VenueId};
use crate::domain::interest::Interest;
use crate::domain::venue::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Proximity points awarded for a venue at zero distance.
pub const PROXIMITY_WEIGHT: f64 = 50.0;

/// Distance in kilometres over which proximity points fall by a factor of e.
pub const PROXIMITY_DECAY_KM: f64 = 2.0;

/// Points awarded when the viewer already wants the venue.
pub const OWN_INTEREST_BONUS: f64 = 10.0;

/// Points contributed by a fully compatible interested peer.
pub const PEER_WEIGHT: f64 = 5.0;

/// Blend weight of shared-interest overlap within pairwise compatibility.
pub const SHARED_INTEREST_WEIGHT: f64 = 0.6;

/// Blend weight of declared affinity within pairwise compatibility.
pub const AFFINITY_WEIGHT: f64 = 0.4;

/// Great-circle distance between two points in kilometres.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_KM * angle
}

/// Jaccard index of two venue sets; 0.0 when both are empty.
#[must_use]
pub fn jaccard_index(a: &HashSet<VenueId>, b: &HashSet<VenueId>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "set sizes stay far below 2^52"
    )]
    let ratio = intersection as f64 / union as f64;
    ratio
}

/// Scorer over one coherent snapshot of interests and friendships.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    /// Venues each user currently wants (INTERESTED or CONFIRMED).
    positive_interests: HashMap<UserId, HashSet<VenueId>>,
    /// Directed friendship strengths keyed by (owner, friend).
    affinity: HashMap<(UserId, UserId), f64>,
    /// Shared fallback for users with no positive interests.
    empty: HashSet<VenueId>,
}

impl CompatibilityScorer {
    /// Build a scorer from the current interest projection and friendship
    /// edges.
    ///
    /// `interests` must be the latest-wins projection, one record per
    /// (user, venue) pair; records that do not count toward quorum are
    /// skipped.
    #[must_use]
    pub fn new(interests: &[Interest], friendships: &[Friendship]) -> Self {
        let mut positive_interests: HashMap<UserId, HashSet<VenueId>> = HashMap::new();
        for interest in interests {
            if interest.status().counts_toward_quorum() {
                positive_interests
                    .entry(interest.user_id().clone())
                    .or_default()
                    .insert(interest.venue_id().clone());
            }
        }

        let mut affinity = HashMap::new();
        for edge in friendships {
            affinity.insert(
                (edge.user_id().clone(), edge.friend_id().clone()),
                edge.strength(),
            );
        }

        Self {
            positive_interests,
            affinity,
            empty: HashSet::new(),
        }
    }

    /// Symmetric pairwise compatibility in [0, 1].
    #[must_use]
    pub fn pairwise(&self, a: &UserId, b: &UserId) -> f64 {
        if a == b {
            return 1.0;
        }
        let shared = jaccard_index(self.venues_of(a), self.venues_of(b));
        let affinity = self.symmetric_affinity(a, b);
        (SHARED_INTEREST_WEIGHT * shared + AFFINITY_WEIGHT * affinity).clamp(0.0, 1.0)
    }

    /// Aggregate score for a venue from the viewer's perspective.
    ///
    /// `peers` are the users whose current status on this venue counts
    /// toward quorum, excluding the viewer.
    #[must_use]
    pub fn venue_score(
        &self,
        viewer: &UserId,
        venue_id: &VenueId,
        venue_location: GeoPoint,
        peers: &[UserId],
        viewer_location: Option<GeoPoint>,
    ) -> f64 {
        let mut score = 0.0;

        if let Some(origin) = viewer_location {
            let distance = haversine_km(origin, venue_location);
            score += PROXIMITY_WEIGHT * (-distance / PROXIMITY_DECAY_KM).exp();
        }

        if self.venues_of(viewer).contains(venue_id) {
            score += OWN_INTEREST_BONUS;
        }

        score += peers
            .iter()
            .filter(|peer| *peer != viewer)
            .map(|peer| PEER_WEIGHT * self.pairwise(viewer, peer))
            .sum::<f64>();

        score
    }

    fn venues_of(&self, user: &UserId) -> &HashSet<VenueId> {
        self.positive_interests.get(user).unwrap_or(&self.empty)
    }

    /// Directed strengths averaged into one edge weight, squashed to [0, 1].
    fn symmetric_affinity(&self, a: &UserId, b: &UserId) -> f64 {
        let forward = self
            .affinity
            .get(&(a.clone(), b.clone()))
            .copied()
            .unwrap_or(0.0);
        let reverse = self
            .affinity
            .get(&(b.clone(), a.clone()))
            .copied()
            .unwrap_or(0.0);
        let mean = (forward + reverse) / 2.0;
        mean / (1.0 + mean)
    }
}

#[cfg(test)]
mod tests;
