//! The resident's parking board.
//!
//! Shows the cached spot list immediately, then replaces it with a fresh
//! fetch. A failed fetch keeps whatever is on screen. Realtime updates
//! patch one spot at a time.

use site_core::parking::{self, ClaimRejection, OccupancySummary, SpotAction, SpotView};
use site_core::types::DbId;
use site_events::{tables, RowChange, SiteEvent};

use crate::api::{SpotControl, SpotSource};
use crate::cache::JsonCache;
use crate::error::ClientError;
use crate::models::ParkingSpot;

/// Cache key holding the last fetched spot list.
pub const CACHE_KEY: &str = "parking_spots_cache";

/// What a tap on the board ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    Claimed(ParkingSpot),
    Released(ParkingSpot),
    /// Someone else holds the spot; nothing was sent.
    Rejected(ClaimRejection),
    /// The id is not on the board.
    UnknownSpot,
}

/// Where the displayed list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSource {
    Empty,
    Cache,
    Network,
}

pub struct ParkingBoard {
    viewer: DbId,
    spots: Vec<ParkingSpot>,
    source: BoardSource,
    last_error: Option<String>,
}

impl ParkingBoard {
    pub fn new(viewer: DbId) -> Self {
        Self {
            viewer,
            spots: Vec::new(),
            source: BoardSource::Empty,
            last_error: None,
        }
    }

    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    pub fn source(&self) -> BoardSource {
        self.source
    }

    /// Message from the most recent failed refresh, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Show the cached list, if any. An unreadable cache is logged and
    /// treated as empty.
    pub async fn load_cached(&mut self, cache: &JsonCache) -> bool {
        match cache.get::<Vec<ParkingSpot>>(CACHE_KEY).await {
            Ok(Some(spots)) => {
                tracing::debug!(count = spots.len(), "Parking board loaded from cache");
                self.spots = spots;
                self.source = BoardSource::Cache;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable parking cache");
                false
            }
        }
    }

    /// Fetch a fresh list. On success it replaces the board and the cache;
    /// on failure the current list stays and the error is returned.
    pub async fn refresh<S: SpotSource>(
        &mut self,
        source: &S,
        cache: &JsonCache,
    ) -> Result<(), ClientError> {
        let spots = match source.fetch_spots().await {
            Ok(spots) => spots,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    shown = self.spots.len(),
                    "Parking refresh failed, keeping current list"
                );
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.spots = spots;
        self.source = BoardSource::Network;
        self.last_error = None;

        if let Err(e) = cache.put(CACHE_KEY, &self.spots).await {
            tracing::warn!(error = %e, "Failed to write parking cache");
        }
        Ok(())
    }

    /// Apply a realtime `parking_spots` UPDATE.
    ///
    /// Returns `true` when a spot on the board changed. Other tables, other
    /// change kinds, unparseable payloads and unknown ids are ignored.
    pub fn apply_change(&mut self, event: &SiteEvent) -> bool {
        if event.table != tables::PARKING_SPOTS || event.change != RowChange::Update {
            return false;
        }
        let updated: ParkingSpot = match serde_json::from_value(event.record.clone()) {
            Ok(spot) => spot,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    record_id = event.record_id,
                    "Unparseable parking update"
                );
                return false;
            }
        };

        self.patch(updated)
    }

    /// Replace the spot with the same id. Unknown ids are dropped.
    fn patch(&mut self, updated: ParkingSpot) -> bool {
        match self.spots.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Carry out a tap on spot `id`: release it if it is ours, claim it if
    /// free. Someone else's spot is rejected locally without a request.
    ///
    /// The server has the final word; if it refuses (for instance a
    /// neighbour claimed the spot since the last refresh) the API error is
    /// returned and the board is left as it was.
    pub async fn tap_spot<C: SpotControl>(
        &mut self,
        id: DbId,
        control: &C,
    ) -> Result<TapOutcome, ClientError> {
        let action = match self.tap(id) {
            None => return Ok(TapOutcome::UnknownSpot),
            Some(Err(rejection)) => return Ok(TapOutcome::Rejected(rejection)),
            Some(Ok(action)) => action,
        };

        let spot = match action {
            SpotAction::Claim => control.claim(id).await?,
            SpotAction::Release => control.release(id).await?,
        };
        tracing::info!(spot_id = id, ?action, "Parking spot updated");
        self.patch(spot.clone());

        Ok(match action {
            SpotAction::Claim => TapOutcome::Claimed(spot),
            SpotAction::Release => TapOutcome::Released(spot),
        })
    }

    pub fn view(&self, spot: &ParkingSpot) -> SpotView {
        parking::classify(spot.occupancy(), self.viewer)
    }

    pub fn summary(&self) -> OccupancySummary {
        parking::summarize(self.spots.iter().map(ParkingSpot::occupancy), self.viewer)
    }

    /// What tapping spot `id` would do. `None` for an id not on the board.
    pub fn tap(&self, id: DbId) -> Option<Result<SpotAction, ClaimRejection>> {
        self.spots
            .iter()
            .find(|s| s.id == id)
            .map(|spot| parking::tap(spot.occupancy(), self.viewer))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn spot(id: DbId, code: &str, occupied_by: Option<DbId>) -> ParkingSpot {
        ParkingSpot {
            id,
            location_code: code.to_string(),
            is_occupied: occupied_by.is_some(),
            occupied_by,
            updated_at: None,
        }
    }

    struct FixedSource(Vec<ParkingSpot>);

    impl SpotSource for FixedSource {
        async fn fetch_spots(&self) -> Result<Vec<ParkingSpot>, ClientError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl SpotSource for FailingSource {
        async fn fetch_spots(&self) -> Result<Vec<ParkingSpot>, ClientError> {
            Err(ClientError::WebSocket("offline".into()))
        }
    }

    fn spot_update(id: DbId, code: &str, occupied_by: Option<DbId>) -> SiteEvent {
        SiteEvent::updated(
            tables::PARKING_SPOTS,
            id,
            &json!({
                "id": id,
                "location_code": code,
                "is_occupied": occupied_by.is_some(),
                "occupied_by": occupied_by,
            }),
        )
    }

    #[tokio::test]
    async fn cached_list_shows_before_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());
        cache.put(CACHE_KEY, &vec![spot(1, "A-12", None)]).await.unwrap();

        let mut board = ParkingBoard::new(7);
        assert!(board.load_cached(&cache).await);
        assert_eq!(board.source(), BoardSource::Cache);
        assert_eq!(board.spots()[0].location_code, "A-12");

        board
            .refresh(&FixedSource(vec![spot(1, "A-12", Some(7)), spot(2, "A-13", None)]), &cache)
            .await
            .unwrap();
        assert_eq!(board.source(), BoardSource::Network);
        assert_eq!(board.spots().len(), 2);

        let cached: Vec<ParkingSpot> = cache.get(CACHE_KEY).await.unwrap().unwrap();
        assert_eq!(cached, board.spots());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_cached_list() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());
        cache.put(CACHE_KEY, &vec![spot(1, "A-12", None)]).await.unwrap();

        let mut board = ParkingBoard::new(7);
        board.load_cached(&cache).await;

        assert!(board.refresh(&FailingSource, &cache).await.is_err());
        assert_eq!(board.spots().len(), 1);
        assert_eq!(board.source(), BoardSource::Cache);
        assert!(board.last_error().is_some_and(|e| e.contains("offline")));
    }

    #[tokio::test]
    async fn empty_cache_shows_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = ParkingBoard::new(7);
        assert!(!board.load_cached(&JsonCache::new(dir.path())).await);
        assert_eq!(board.source(), BoardSource::Empty);
    }

    #[tokio::test]
    async fn updates_patch_by_id_and_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());
        let mut board = ParkingBoard::new(7);
        board
            .refresh(&FixedSource(vec![spot(1, "A-12", None), spot(2, "A-13", None)]), &cache)
            .await
            .unwrap();

        assert!(board.apply_change(&spot_update(1, "A-12", Some(8))));
        assert!(board.apply_change(&spot_update(1, "A-12", Some(7))));

        assert_eq!(board.spots()[0].occupied_by, Some(7));
        assert_eq!(board.view(&board.spots()[0]), SpotView::Mine);
        assert_eq!(board.spots()[1].occupied_by, None);
    }

    #[test]
    fn unknown_ids_and_other_tables_are_ignored() {
        let mut board = ParkingBoard::new(7);
        board.spots = vec![spot(1, "A-12", None)];

        assert!(!board.apply_change(&spot_update(99, "Z-1", Some(7))));
        let other = SiteEvent::updated(tables::GUESTS, 1, &json!({"id": 1}));
        assert!(!board.apply_change(&other));
        assert_eq!(board.spots(), &[spot(1, "A-12", None)]);
    }

    #[test]
    fn tap_follows_the_view() {
        let mut board = ParkingBoard::new(7);
        board.spots = vec![
            spot(1, "A-12", Some(7)),
            spot(2, "A-13", None),
            spot(3, "A-14", Some(8)),
        ];

        assert_eq!(board.tap(1), Some(Ok(SpotAction::Release)));
        assert_eq!(board.tap(2), Some(Ok(SpotAction::Claim)));
        assert_eq!(board.tap(3), Some(Err(ClaimRejection::OccupiedByOther)));
        assert_eq!(board.tap(4), None);

        let summary = board.summary();
        assert_eq!((summary.free, summary.occupied, summary.mine), (1, 2, 1));
    }

    /// Accepts every request and remembers what was asked.
    #[derive(Default)]
    struct RecordingControl {
        calls: std::sync::Mutex<Vec<(&'static str, DbId)>>,
        viewer: DbId,
    }

    impl SpotControl for RecordingControl {
        async fn claim(&self, id: DbId) -> Result<ParkingSpot, ClientError> {
            self.calls.lock().unwrap().push(("claim", id));
            Ok(spot(id, "A-13", Some(self.viewer)))
        }

        async fn release(&self, id: DbId) -> Result<ParkingSpot, ClientError> {
            self.calls.lock().unwrap().push(("release", id));
            Ok(spot(id, "A-12", None))
        }
    }

    struct RefusingControl;

    impl SpotControl for RefusingControl {
        async fn claim(&self, _id: DbId) -> Result<ParkingSpot, ClientError> {
            Err(ClientError::Api {
                status: 409,
                code: "CONFLICT".into(),
                message: "Spot is occupied by another user".into(),
            })
        }

        async fn release(&self, _id: DbId) -> Result<ParkingSpot, ClientError> {
            unreachable!("release is never requested in these tests")
        }
    }

    #[tokio::test]
    async fn tapping_free_then_own_spot_claims_and_releases() {
        let control = RecordingControl {
            viewer: 7,
            ..Default::default()
        };
        let mut board = ParkingBoard::new(7);
        board.spots = vec![spot(1, "A-12", Some(7)), spot(2, "A-13", None)];

        let claimed = board.tap_spot(2, &control).await.unwrap();
        assert_eq!(claimed, TapOutcome::Claimed(spot(2, "A-13", Some(7))));
        assert_eq!(board.view(&board.spots()[1]), SpotView::Mine);

        let released = board.tap_spot(1, &control).await.unwrap();
        assert_eq!(released, TapOutcome::Released(spot(1, "A-12", None)));
        assert_eq!(board.view(&board.spots()[0]), SpotView::Free);

        assert_eq!(*control.calls.lock().unwrap(), vec![("claim", 2), ("release", 1)]);
    }

    #[tokio::test]
    async fn neighbours_spot_is_rejected_without_a_request() {
        let control = RecordingControl::default();
        let mut board = ParkingBoard::new(7);
        board.spots = vec![spot(3, "A-14", Some(8))];

        assert_eq!(
            board.tap_spot(3, &control).await.unwrap(),
            TapOutcome::Rejected(ClaimRejection::OccupiedByOther)
        );
        assert_eq!(board.tap_spot(99, &control).await.unwrap(), TapOutcome::UnknownSpot);
        assert!(control.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_refusal_leaves_the_board_untouched() {
        let mut board = ParkingBoard::new(7);
        board.spots = vec![spot(2, "A-13", None)];

        let err = board.tap_spot(2, &RefusingControl).await.unwrap_err();

        assert!(err.is_api_code("CONFLICT"));
        assert_eq!(board.spots(), &[spot(2, "A-13", None)]);
    }
}
