//! # Column Synchronization
//!
//! A [`ColumnSync`] owns the cards of one board column: it fetches them when
//! mounted, exposes the current list to the presentation layer, and re-fetches
//! when a card mutation touches its column.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──mount──▶ Loading ──ok──▶ Ready (page cards)
//!                             │ ▲    └─err─▶ Ready (empty) + FetchFailed event
//!                             │ └──refresh / notify──┘
//!                          unmount
//!                             ▼
//!                          Disposed (late responses dropped)
//! ```
//!
//! Overlapping fetches are not de-duplicated: whichever resolves last decides
//! the list. Unmounting cancels every in-flight fetch of the unit; a response
//! that still arrives is ignored.

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use parking_lot::RwLock;
use shared::Card;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::core::error::ApiError;
use crate::core::service::CardService;
use crate::debug::{active_task_count, spawn_tracked};

/// Lifecycle phase of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPhase {
    Uninitialized,
    Loading,
    Ready,
    Disposed,
}

/// What the presentation layer renders for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnState {
    pub phase: ColumnPhase,
    /// Cards in server order.
    pub cards: Vec<Card>,
    pub total_count: i64,
    pub cursor_id: Option<i64>,
}

impl Default for ColumnState {
    fn default() -> Self {
        Self {
            phase: ColumnPhase::Uninitialized,
            cards: Vec::new(),
            total_count: 0,
            cursor_id: None,
        }
    }
}

/// Fetch outcomes reported to the host.
#[derive(Debug)]
pub enum ColumnEvent {
    /// The column is Ready with `count` cards.
    Loaded { column_id: i64, count: usize },
    /// The fetch failed; the column is Ready and empty.
    FetchFailed { column_id: i64, error: ApiError },
}

/// A card change made elsewhere in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMutation {
    Created { card_id: i64, column_id: i64 },
    Updated { card_id: i64, column_id: i64 },
    Deleted { card_id: i64, column_id: i64 },
    /// A `columnId` update.
    Moved { card_id: i64, from: i64, to: i64 },
}

impl CardMutation {
    /// Whether the mutation changes what `column_id` should show.
    pub fn touches(&self, column_id: i64) -> bool {
        match *self {
            CardMutation::Created { column_id: c, .. }
            | CardMutation::Updated { column_id: c, .. }
            | CardMutation::Deleted { column_id: c, .. } => c == column_id,
            CardMutation::Moved { from, to, .. } => from == column_id || to == column_id,
        }
    }

    pub fn card_id(&self) -> i64 {
        match *self {
            CardMutation::Created { card_id, .. }
            | CardMutation::Updated { card_id, .. }
            | CardMutation::Deleted { card_id, .. }
            | CardMutation::Moved { card_id, .. } => card_id,
        }
    }
}

/// Card list of one column, kept in step with the card API.
///
/// Must be used inside a Tokio runtime: fetches run as spawned tasks.
pub struct ColumnSync {
    column_id: i64,
    service: Arc<dyn CardService>,
    state: Arc<RwLock<ColumnState>>,
    cancel: CancellationToken,
    events: Sender<ColumnEvent>,
}

impl ColumnSync {
    /// Create an unmounted column and the receiver for its events.
    pub fn new(column_id: i64, service: Arc<dyn CardService>) -> (Self, Receiver<ColumnEvent>) {
        let (events, receiver) = async_channel::unbounded();

        let unit = Self {
            column_id,
            service,
            state: Arc::new(RwLock::new(ColumnState::default())),
            cancel: CancellationToken::new(),
            events,
        };

        (unit, receiver)
    }

    pub fn column_id(&self) -> i64 {
        self.column_id
    }

    pub fn phase(&self) -> ColumnPhase {
        self.state.read().phase
    }

    /// Current cards, in order.
    pub fn cards(&self) -> Vec<Card> {
        self.state.read().cards.clone()
    }

    pub fn snapshot(&self) -> ColumnState {
        self.state.read().clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Start the first fetch. Mounting again starts another, overlapping one.
    ///
    /// Returns the fetch task, or `None` once unmounted.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        self.fetch("mount")
    }

    /// Re-fetch the whole column.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        self.fetch("refresh")
    }

    /// React to a card change: re-fetch when it touches this column.
    pub fn notify(&self, mutation: CardMutation) -> Option<JoinHandle<()>> {
        if !mutation.touches(self.column_id) {
            return None;
        }

        debug!(
            column_id = self.column_id,
            card_id = mutation.card_id(),
            mutation = ?mutation,
            "Card mutation touches column"
        );
        self.fetch("mutation")
    }

    /// Dispose of the column. In-flight fetches are cancelled and nothing
    /// they return is applied.
    pub fn unmount(&self) {
        let mut state = self.state.write();
        self.cancel.cancel();
        state.phase = ColumnPhase::Disposed;
        state.cards.clear();
        state.total_count = 0;
        state.cursor_id = None;

        info!(column_id = self.column_id, "Column unmounted");
    }

    fn fetch(&self, trigger: &'static str) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.write();
            if state.phase == ColumnPhase::Disposed {
                warn!(column_id = self.column_id, trigger, "Fetch requested on unmounted column");
                return None;
            }
            state.phase = ColumnPhase::Loading;
        }

        let column_id = self.column_id;
        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();
        let events = self.events.clone();

        debug!(
            column_id,
            trigger,
            tracked_tasks = active_task_count(),
            "Fetching column cards"
        );

        let handle = spawn_tracked("column_fetch", async move {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(column_id, "Column unmounted, fetch abandoned");
                    return;
                }
                result = service.list_cards(column_id) => result,
            };

            let event = {
                let mut state = state.write();
                // Checked under the lock unmount takes
                if cancel.is_cancelled() {
                    debug!(column_id, "Late response for unmounted column ignored");
                    return;
                }

                state.phase = ColumnPhase::Ready;
                match result {
                    Ok(page) => {
                        let count = page.cards.len();
                        state.cards = page.cards;
                        state.total_count = page.total_count;
                        state.cursor_id = page.cursor_id;

                        info!(column_id, count, total = page.total_count, "Column cards loaded");
                        ColumnEvent::Loaded { column_id, count }
                    }
                    Err(error) => {
                        state.cards.clear();
                        state.total_count = 0;
                        state.cursor_id = None;

                        error!(column_id, error = %error, "Column card fetch failed");
                        ColumnEvent::FetchFailed { column_id, error }
                    }
                }
            };

            // The host may have stopped listening
            let _ = events.try_send(event);
        });

        Some(handle)
    }
}

impl Drop for ColumnSync {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use shared::{Assignee, CardDetail, CardList, CreateCardRequest, UpdateCardRequest};
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// Card service whose list responses are released by the test.
    #[derive(Default)]
    struct ScriptedCards {
        pending: Mutex<Vec<Option<oneshot::Sender<Result<CardList>>>>>,
    }

    impl ScriptedCards {
        fn calls(&self) -> usize {
            self.pending.lock().len()
        }

        fn respond(&self, call: usize, result: Result<CardList>) {
            let sender = self.pending.lock()[call]
                .take()
                .expect("call should be pending");
            let _ = sender.send(result);
        }
    }

    #[async_trait]
    impl CardService for ScriptedCards {
        async fn create_card(&self, _request: &CreateCardRequest) -> Result<Card> {
            unreachable!("column sync never creates cards")
        }

        async fn list_cards(&self, _column_id: i64) -> Result<CardList> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().push(Some(tx));
            rx.await.unwrap_or_else(|_| {
                Err(ApiError::Http {
                    status: 599,
                    message: None,
                    body: "scripted response dropped".to_string(),
                })
            })
        }

        async fn update_card(&self, _card_id: i64, _request: &UpdateCardRequest) -> Result<Card> {
            unreachable!("column sync never updates cards")
        }

        async fn get_card(&self, _card_id: i64) -> Result<CardDetail> {
            unreachable!("column sync never reads single cards")
        }

        async fn delete_card(&self, _card_id: i64) -> Result<()> {
            unreachable!("column sync never deletes cards")
        }
    }

    fn card(id: i64, column_id: i64, title: &str) -> Card {
        let at = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();
        Card {
            id,
            title: title.to_string(),
            description: String::new(),
            tags: vec!["tag".to_string()],
            due_date: "2024-06-01 18:00".to_string(),
            assignee: Assignee {
                id: 3,
                nickname: "mina".to_string(),
                profile_image_url: None,
            },
            image_url: None,
            team_id: "9-2".to_string(),
            column_id,
            created_at: at,
            updated_at: at,
        }
    }

    fn page(cursor_id: Option<i64>, cards: Vec<Card>) -> CardList {
        CardList {
            cursor_id,
            total_count: cards.len() as i64,
            cards,
        }
    }

    async fn wait_until(condition: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("condition should become true");
    }

    fn setup(column_id: i64) -> (Arc<ScriptedCards>, ColumnSync, Receiver<ColumnEvent>) {
        let service = Arc::new(ScriptedCards::default());
        let (unit, events) = ColumnSync::new(column_id, service.clone());
        (service, unit, events)
    }

    #[tokio::test]
    async fn test_new_column_is_uninitialized() {
        let (service, unit, _events) = setup(7);
        assert_eq!(unit.phase(), ColumnPhase::Uninitialized);
        assert!(unit.cards().is_empty());
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_mount_loads_cards_in_server_order() {
        let (service, unit, events) = setup(7);
        let card_a = card(1, 7, "A");
        let card_b = card(2, 7, "B");

        let handle = unit.mount().expect("mounted column should fetch");
        assert_eq!(unit.phase(), ColumnPhase::Loading);

        wait_until(|| service.calls() == 1).await;
        service.respond(
            0,
            Ok(CardList {
                cursor_id: Some(10),
                total_count: 2,
                cards: vec![card_a.clone(), card_b.clone()],
            }),
        );
        handle.await.unwrap();

        let state = unit.snapshot();
        assert_eq!(state.phase, ColumnPhase::Ready);
        assert_eq!(state.cards, vec![card_a, card_b]);
        assert_eq!(state.cursor_id, Some(10));
        assert_eq!(state.total_count, 2);

        match events.try_recv() {
            Ok(ColumnEvent::Loaded { column_id, count }) => {
                assert_eq!(column_id, 7);
                assert_eq!(count, 2);
            }
            other => panic!("Expected Loaded event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_column_ready_and_empty() {
        let (service, unit, events) = setup(7);

        let handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 1).await;
        service.respond(
            0,
            Err(ApiError::Http {
                status: 500,
                message: Some("boom".to_string()),
                body: r#"{"message":"boom"}"#.to_string(),
            }),
        );
        handle.await.unwrap();

        assert_eq!(unit.phase(), ColumnPhase::Ready);
        assert!(unit.cards().is_empty());

        match events.try_recv() {
            Ok(ColumnEvent::FetchFailed { column_id, error }) => {
                assert_eq!(column_id, 7);
                assert_eq!(error.status(), Some(500));
            }
            other => panic!("Expected FetchFailed event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_overlapping_fetches_last_resolved_wins() {
        let (service, unit, _events) = setup(7);
        let first = card(1, 7, "first fetch");
        let second = card(2, 7, "second fetch");

        let first_handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 1).await;
        let second_handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 2).await;

        // The later request answers first...
        service.respond(1, Ok(page(None, vec![second.clone()])));
        second_handle.await.unwrap();
        assert_eq!(unit.cards(), vec![second]);

        // ...and the earlier one overwrites it when it finally resolves
        service.respond(0, Ok(page(Some(10), vec![first.clone()])));
        first_handle.await.unwrap();
        assert_eq!(unit.cards(), vec![first]);
        assert_eq!(unit.phase(), ColumnPhase::Ready);
    }

    #[tokio::test]
    async fn test_unmount_drops_late_response() {
        let (service, unit, events) = setup(7);

        let handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 1).await;

        unit.unmount();
        service.respond(0, Ok(page(None, vec![card(1, 7, "late")])));
        handle.await.unwrap();

        assert_eq!(unit.phase(), ColumnPhase::Disposed);
        assert!(unit.cards().is_empty());
        assert!(events.try_recv().is_err());
        assert!(unit.is_disposed());

        assert!(unit.mount().is_none());
        assert!(unit.refresh().is_none());
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_mutation_in_other_column_is_ignored() {
        let (service, unit, _events) = setup(7);

        let handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 1).await;
        service.respond(0, Ok(page(None, vec![card(1, 7, "A")])));
        handle.await.unwrap();

        assert!(unit
            .notify(CardMutation::Created { card_id: 9, column_id: 8 })
            .is_none());
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_mutation_in_column_refetches() {
        let (service, unit, _events) = setup(7);

        let handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 1).await;
        service.respond(0, Ok(page(None, vec![card(1, 7, "A"), card(2, 7, "B")])));
        handle.await.unwrap();

        // Card 2 moved out of this column
        let handle = unit
            .notify(CardMutation::Moved { card_id: 2, from: 7, to: 8 })
            .expect("move out of column should refetch");
        assert_eq!(unit.phase(), ColumnPhase::Loading);

        wait_until(|| service.calls() == 2).await;
        service.respond(1, Ok(page(None, vec![card(1, 7, "A")])));
        handle.await.unwrap();

        let ids: Vec<i64> = unit.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_dropping_column_cancels_fetch() {
        let (service, unit, _events) = setup(7);

        let handle = unit.mount().unwrap();
        wait_until(|| service.calls() == 1).await;
        drop(unit);

        // Task exits without a response
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("fetch should stop after drop")
            .unwrap();
    }

    #[test]
    fn test_mutation_touches() {
        assert!(CardMutation::Created { card_id: 1, column_id: 7 }.touches(7));
        assert!(!CardMutation::Updated { card_id: 1, column_id: 7 }.touches(8));
        assert!(CardMutation::Deleted { card_id: 1, column_id: 8 }.touches(8));
        let moved = CardMutation::Moved { card_id: 1, from: 7, to: 8 };
        assert!(moved.touches(7) && moved.touches(8) && !moved.touches(9));
        assert_eq!(moved.card_id(), 1);
    }
}
