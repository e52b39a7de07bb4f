//! Tests for distance, overlap, and compatibility arithmetic.

use super::*;
use crate::domain::ids::InterestId;
use crate::domain::interest::InterestStatus;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

const TOLERANCE: f64 = 1e-6;

fn uid(n: u128) -> UserId {
    UserId::from_uuid(Uuid::from_u128(n))
}

fn vid(n: u128) -> VenueId {
    VenueId::from_uuid(Uuid::from_u128(0x1000 + n))
}

fn interest(user: u128, venue: u128, status: InterestStatus) -> Interest {
    Interest::new(
        InterestId::random(),
        uid(user),
        vid(venue),
        status,
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
    )
}

fn edge(user: u128, friend: u128, strength: f64) -> Friendship {
    Friendship::try_new(uid(user), uid(friend), strength).unwrap()
}

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

#[rstest]
fn haversine_of_identical_points_is_zero() {
    let p = point(51.5261, -0.0876);
    assert!(haversine_km(p, p).abs() < TOLERANCE);
}

#[rstest]
fn haversine_of_one_degree_latitude_is_about_111_km() {
    let distance = haversine_km(point(0.0, 0.0), point(1.0, 0.0));
    assert!((distance - 111.194_926).abs() < 1e-3, "got {distance}");
}

#[rstest]
fn haversine_is_symmetric() {
    let a = point(51.5, -0.1);
    let b = point(48.85, 2.35);
    assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < TOLERANCE);
}

// ---------------------------------------------------------------------------
// Set overlap
// ---------------------------------------------------------------------------

#[rstest]
fn jaccard_of_empty_sets_is_zero() {
    let a: HashSet<VenueId> = HashSet::new();
    let b: HashSet<VenueId> = HashSet::new();
    assert!(jaccard_index(&a, &b).abs() < TOLERANCE);
}

#[rstest]
fn jaccard_of_identical_sets_is_one() {
    let a: HashSet<VenueId> = [vid(1), vid(2)].into_iter().collect();
    assert!((jaccard_index(&a, &a) - 1.0).abs() < TOLERANCE);
}

#[rstest]
fn jaccard_counts_partial_overlap() {
    let a: HashSet<VenueId> = [vid(1), vid(2), vid(3)].into_iter().collect();
    let b: HashSet<VenueId> = [vid(2), vid(3), vid(4)].into_iter().collect();
    assert!((jaccard_index(&a, &b) - 0.5).abs() < TOLERANCE);
}

// ---------------------------------------------------------------------------
// Pairwise compatibility
// ---------------------------------------------------------------------------

#[rstest]
fn pairwise_is_symmetric() {
    let scorer = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::Interested),
            interest(1, 2, InterestStatus::Confirmed),
            interest(2, 2, InterestStatus::Interested),
            interest(2, 3, InterestStatus::Interested),
        ],
        &[edge(1, 2, 2.0)],
    );
    let forward = scorer.pairwise(&uid(1), &uid(2));
    let reverse = scorer.pairwise(&uid(2), &uid(1));
    assert!((forward - reverse).abs() < TOLERANCE);
}

#[rstest]
fn pairwise_stays_in_unit_interval_for_extreme_affinity() {
    let scorer = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::Interested),
            interest(2, 1, InterestStatus::Interested),
        ],
        &[edge(1, 2, 1e9), edge(2, 1, 1e9)],
    );
    let score = scorer.pairwise(&uid(1), &uid(2));
    assert!((0.0..=1.0).contains(&score), "got {score}");
}

#[rstest]
fn pairwise_blends_overlap_and_affinity() {
    // Identical interest sets, no declared affinity: only the shared term.
    let shared_only = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::Interested),
            interest(2, 1, InterestStatus::Interested),
        ],
        &[],
    );
    let score = shared_only.pairwise(&uid(1), &uid(2));
    assert!((score - SHARED_INTEREST_WEIGHT).abs() < TOLERANCE);

    // Mutual strength 1.0 with no overlap: mean 1.0 squashes to 0.5.
    let affinity_only = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::Interested),
            interest(2, 2, InterestStatus::Interested),
        ],
        &[edge(1, 2, 1.0), edge(2, 1, 1.0)],
    );
    let score = affinity_only.pairwise(&uid(1), &uid(2));
    assert!((score - AFFINITY_WEIGHT * 0.5).abs() < TOLERANCE);
}

#[rstest]
fn pairwise_ignores_negative_and_invited_interests() {
    let scorer = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::NotInterested),
            interest(2, 1, InterestStatus::Invited),
        ],
        &[],
    );
    assert!(scorer.pairwise(&uid(1), &uid(2)).abs() < TOLERANCE);
}

#[rstest]
fn one_directed_edge_registers_half_affinity() {
    let scorer = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::Interested),
            interest(2, 2, InterestStatus::Interested),
        ],
        &[edge(1, 2, 1.0)],
    );
    // Mean of (1.0, missing) is 0.5; squashed to 1/3.
    let expected = AFFINITY_WEIGHT * (0.5 / 1.5);
    assert!((scorer.pairwise(&uid(1), &uid(2)) - expected).abs() < TOLERANCE);
}

// ---------------------------------------------------------------------------
// Venue score
// ---------------------------------------------------------------------------

#[rstest]
fn venue_score_without_location_has_no_proximity_term() {
    let scorer = CompatibilityScorer::new(&[interest(1, 1, InterestStatus::Interested)], &[]);
    let score = scorer.venue_score(&uid(1), &vid(1), point(51.5, -0.1), &[], None);
    assert!((score - OWN_INTEREST_BONUS).abs() < TOLERANCE);
}

#[rstest]
fn venue_score_at_zero_distance_awards_full_proximity() {
    let scorer = CompatibilityScorer::new(&[], &[]);
    let here = point(51.5, -0.1);
    let score = scorer.venue_score(&uid(1), &vid(1), here, &[], Some(here));
    assert!((score - PROXIMITY_WEIGHT).abs() < TOLERANCE);
}

#[rstest]
fn venue_score_decays_with_distance() {
    let scorer = CompatibilityScorer::new(&[], &[]);
    let origin = point(51.5, -0.1);
    let near = scorer.venue_score(&uid(1), &vid(1), point(51.51, -0.1), &[], Some(origin));
    let far = scorer.venue_score(&uid(1), &vid(2), point(52.5, -0.1), &[], Some(origin));
    assert!(near > far);
}

#[rstest]
fn venue_score_adds_weighted_peer_compatibility() {
    let scorer = CompatibilityScorer::new(
        &[
            interest(1, 1, InterestStatus::Interested),
            interest(2, 1, InterestStatus::Interested),
            interest(3, 1, InterestStatus::Confirmed),
        ],
        &[],
    );
    let peers = [uid(2), uid(3)];
    let score = scorer.venue_score(&uid(1), &vid(1), point(51.5, -0.1), &peers, None);
    let pairwise = scorer.pairwise(&uid(1), &uid(2));
    let expected = OWN_INTEREST_BONUS + 2.0 * PEER_WEIGHT * pairwise;
    assert!((score - expected).abs() < TOLERANCE, "got {score}");
}

#[rstest]
fn venue_score_skips_the_viewer_in_the_peer_list() {
    let scorer = CompatibilityScorer::new(&[interest(1, 1, InterestStatus::Interested)], &[]);
    let peers = [uid(1)];
    let score = scorer.venue_score(&uid(1), &vid(1), point(51.5, -0.1), &peers, None);
    assert!((score - OWN_INTEREST_BONUS).abs() < TOLERANCE);
}
