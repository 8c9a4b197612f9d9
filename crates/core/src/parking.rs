//! Parking spot occupancy rules.
//!
//! Spots are pre-provisioned. Any authenticated user may claim a free spot;
//! only the occupant may release it. The database layer applies the same
//! rules as conditional updates so two concurrent claims cannot both win.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Occupancy facts about a spot, independent of how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub is_occupied: bool,
    pub occupied_by: Option<DbId>,
}

impl Occupancy {
    pub const FREE: Occupancy = Occupancy {
        is_occupied: false,
        occupied_by: None,
    };

    /// Occupancy held by `user_id`.
    pub fn held_by(user_id: DbId) -> Self {
        Self {
            is_occupied: true,
            occupied_by: Some(user_id),
        }
    }

    /// Occupied flag and occupant agree with each other.
    pub fn is_consistent(self) -> bool {
        self.is_occupied == self.occupied_by.is_some()
    }

    fn is_held_by(self, user_id: DbId) -> bool {
        self.is_occupied && self.occupied_by == Some(user_id)
    }
}

/// How a spot looks to a given viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotView {
    Free,
    Occupied,
    Mine,
}

/// Classify a spot from the viewer's point of view.
pub fn classify(spot: Occupancy, viewer: DbId) -> SpotView {
    if spot.is_held_by(viewer) {
        SpotView::Mine
    } else if spot.is_occupied {
        SpotView::Occupied
    } else {
        SpotView::Free
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimRejection {
    /// Someone else holds the spot.
    OccupiedByOther,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseRejection {
    /// The spot is already free.
    NotOccupied,
    /// The spot is held by a different user.
    NotOccupant,
}

/// Decide the occupancy after `user_id` claims the spot.
///
/// Claiming a spot you already hold is a no-op that succeeds.
pub fn plan_claim(spot: Occupancy, user_id: DbId) -> Result<Occupancy, ClaimRejection> {
    if spot.is_occupied && !spot.is_held_by(user_id) {
        return Err(ClaimRejection::OccupiedByOther);
    }
    Ok(Occupancy::held_by(user_id))
}

/// Decide the occupancy after `user_id` releases the spot.
pub fn plan_release(spot: Occupancy, user_id: DbId) -> Result<Occupancy, ReleaseRejection> {
    if !spot.is_occupied {
        return Err(ReleaseRejection::NotOccupied);
    }
    if !spot.is_held_by(user_id) {
        return Err(ReleaseRejection::NotOccupant);
    }
    Ok(Occupancy::FREE)
}

/// What tapping a spot does for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotAction {
    Claim,
    Release,
}

/// Map a tap on a spot to the action it requests.
///
/// Tapping your own spot releases it, tapping a free one claims it, and
/// tapping someone else's spot is rejected with a notice.
pub fn tap(spot: Occupancy, viewer: DbId) -> Result<SpotAction, ClaimRejection> {
    match classify(spot, viewer) {
        SpotView::Mine => Ok(SpotAction::Release),
        SpotView::Free => Ok(SpotAction::Claim),
        SpotView::Occupied => Err(ClaimRejection::OccupiedByOther),
    }
}

/// Headline counts shown above the spot grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OccupancySummary {
    pub free: usize,
    pub occupied: usize,
    pub mine: usize,
}

/// Count free, occupied and viewer-held spots. `occupied` includes the
/// viewer's own spots.
pub fn summarize<I>(spots: I, viewer: DbId) -> OccupancySummary
where
    I: IntoIterator<Item = Occupancy>,
{
    spots
        .into_iter()
        .fold(OccupancySummary::default(), |mut acc, spot| {
            match classify(spot, viewer) {
                SpotView::Free => acc.free += 1,
                SpotView::Occupied => acc.occupied += 1,
                SpotView::Mine => {
                    acc.occupied += 1;
                    acc.mine += 1;
                }
            }
            acc
        })
}

/// Normalize an admin-entered location code, e.g. `" a-12 "` -> `"A-12"`.
pub fn normalize_location_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const U1: DbId = 1;
    const U2: DbId = 2;

    #[test]
    fn claim_free_spot_sets_occupant() {
        let after = plan_claim(Occupancy::FREE, U1).unwrap();
        assert!(after.is_occupied);
        assert_eq!(after.occupied_by, Some(U1));
        assert!(after.is_consistent());
    }

    #[test]
    fn repeated_claim_by_same_user_is_idempotent() {
        let once = plan_claim(Occupancy::FREE, U1).unwrap();
        let twice = plan_claim(once, U1).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn claim_by_other_user_is_rejected() {
        let held = Occupancy::held_by(U1);
        assert_eq!(plan_claim(held, U2), Err(ClaimRejection::OccupiedByOther));
    }

    #[test]
    fn only_occupant_may_release() {
        let held = Occupancy::held_by(U1);
        assert_eq!(plan_release(held, U2), Err(ReleaseRejection::NotOccupant));
        assert_eq!(plan_release(held, U1), Ok(Occupancy::FREE));
    }

    #[test]
    fn releasing_free_spot_is_rejected() {
        assert_eq!(
            plan_release(Occupancy::FREE, U1),
            Err(ReleaseRejection::NotOccupied)
        );
    }

    #[test]
    fn claim_reject_release_scenario() {
        let spot = Occupancy::FREE;
        let spot = plan_claim(spot, U1).unwrap();
        assert_eq!(spot, Occupancy::held_by(U1));

        assert!(plan_claim(spot, U2).is_err());
        assert_eq!(spot, Occupancy::held_by(U1));

        let spot = plan_release(spot, U1).unwrap();
        assert!(!spot.is_occupied);
        assert_eq!(spot.occupied_by, None);
    }

    #[test]
    fn classify_from_viewer_perspective() {
        let held = Occupancy::held_by(U1);
        assert_eq!(classify(held, U1), SpotView::Mine);
        assert_eq!(classify(held, U2), SpotView::Occupied);
        assert_eq!(classify(Occupancy::FREE, U2), SpotView::Free);
    }

    #[test]
    fn tap_maps_views_to_actions() {
        assert_eq!(tap(Occupancy::FREE, U1), Ok(SpotAction::Claim));
        assert_eq!(tap(Occupancy::held_by(U1), U1), Ok(SpotAction::Release));
        assert_eq!(
            tap(Occupancy::held_by(U2), U1),
            Err(ClaimRejection::OccupiedByOther)
        );
    }

    #[test]
    fn inconsistent_rows_are_detected() {
        let broken = Occupancy {
            is_occupied: false,
            occupied_by: Some(U1),
        };
        assert!(!broken.is_consistent());
        assert!(Occupancy::FREE.is_consistent());
    }

    #[test]
    fn summary_counts() {
        let spots = [
            Occupancy::FREE,
            Occupancy::held_by(U1),
            Occupancy::held_by(U2),
            Occupancy::FREE,
        ];
        let summary = summarize(spots, U1);
        assert_eq!(
            summary,
            OccupancySummary {
                free: 2,
                occupied: 2,
                mine: 1
            }
        );
    }

    #[test]
    fn location_codes_are_upper_cased() {
        assert_eq!(normalize_location_code(" a-12 "), Some("A-12".into()));
        assert_eq!(normalize_location_code("  "), None);
    }
}
