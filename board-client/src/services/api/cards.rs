//! # Card Endpoints
//!
//! Create, list, read, update and delete cards through the gateway.
//!
//! Every operation logs one line naming itself when it fails and returns the
//! gateway's error untouched, so callers still see the HTTP status and the
//! backend body. Nothing here retries.

use reqwest::Method;
use shared::{Card, CardDetail, CardList, CreateCardRequest, UpdateCardRequest, CARD_PAGE_SIZE};

use super::client::{read_empty, read_json, ApiClient};
use crate::core::error::Result;

/// Create a card. The server assigns its id and timestamps.
#[tracing::instrument(skip(client, request), fields(column_id = request.column_id, dashboard_id = request.dashboard_id))]
pub async fn create_card(client: &ApiClient, request: &CreateCardRequest) -> Result<Card> {
    let result: Result<Card> = async {
        let response = client
            .execute(client.request(Method::POST, "/cards").json(request))
            .await?;
        read_json::<Card>(response).await
    }
    .await;

    result
        .inspect(|card| tracing::info!(card_id = card.id, "Card created"))
        .inspect_err(|e| tracing::error!(error = %e, status = ?e.status(), "create card api error"))
}

/// First page of cards in a column.
///
/// The page size is fixed; the returned cursor is passed through untouched.
#[tracing::instrument(skip(client))]
pub async fn list_cards(client: &ApiClient, column_id: i64) -> Result<CardList> {
    let result: Result<CardList> = async {
        let builder = client
            .request(Method::GET, "/cards")
            .query(&[("size", i64::from(CARD_PAGE_SIZE)), ("columnId", column_id)]);
        let response = client.execute(builder).await?;
        read_json::<CardList>(response).await
    }
    .await;

    result
        .inspect(|page| {
            tracing::debug!(
                count = page.cards.len(),
                total = page.total_count,
                cursor_id = ?page.cursor_id,
                "Cards listed"
            )
        })
        .inspect_err(|e| tracing::error!(error = %e, status = ?e.status(), "list cards api error"))
}

/// Replace every field of a card.
#[tracing::instrument(skip(client, request), fields(column_id = request.column_id))]
pub async fn update_card(
    client: &ApiClient,
    card_id: i64,
    request: &UpdateCardRequest,
) -> Result<Card> {
    let result: Result<Card> = async {
        let response = client
            .execute(
                client
                    .request(Method::PUT, &format!("/cards/{card_id}"))
                    .json(request),
            )
            .await?;
        read_json::<Card>(response).await
    }
    .await;

    result.inspect_err(|e| tracing::error!(error = %e, status = ?e.status(), "update card api error"))
}

/// Full detail of one card, including its dashboard.
#[tracing::instrument(skip(client))]
pub async fn get_card(client: &ApiClient, card_id: i64) -> Result<CardDetail> {
    let result: Result<CardDetail> = async {
        let response = client
            .execute(client.request(Method::GET, &format!("/cards/{card_id}")))
            .await?;
        read_json::<CardDetail>(response).await
    }
    .await;

    result.inspect_err(|e| tracing::error!(error = %e, status = ?e.status(), "read card api error"))
}

/// Delete a card.
#[tracing::instrument(skip(client))]
pub async fn delete_card(client: &ApiClient, card_id: i64) -> Result<()> {
    let result: Result<()> = async {
        let response = client
            .execute(client.request(Method::DELETE, &format!("/cards/{card_id}")))
            .await?;
        read_empty(response).await
    }
    .await;

    result
        .inspect(|_| tracing::info!(card_id, "Card deleted"))
        .inspect_err(|e| tracing::error!(error = %e, status = ?e.status(), "delete card api error"))
}
