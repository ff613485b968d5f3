//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use async_trait::async_trait;
use shared::{Card, CardDetail, CardList, CreateCardRequest, UpdateCardRequest};

use crate::core::error::Result;

/// Card resource operations.
///
/// Implemented by [`crate::services::api::ApiClient`] over HTTP. Column sync
/// units hold an `Arc<dyn CardService>` so tests can script responses.
#[async_trait]
pub trait CardService: Send + Sync {
    /// Create a card; the server assigns id and timestamps.
    async fn create_card(&self, request: &CreateCardRequest) -> Result<Card>;

    /// First page (10 cards) of a column.
    async fn list_cards(&self, column_id: i64) -> Result<CardList>;

    /// Replace every field of a card.
    async fn update_card(&self, card_id: i64, request: &UpdateCardRequest) -> Result<Card>;

    /// Full card detail, including its dashboard.
    async fn get_card(&self, card_id: i64) -> Result<CardDetail>;

    /// Delete a card.
    async fn delete_card(&self, card_id: i64) -> Result<()>;
}
