//! # Card DTOs
//!
//! The card resource as the API returns it, the column-scoped list page,
//! and the payloads for creating and replacing a card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of cards requested per list page.
pub const CARD_PAGE_SIZE: u32 = 10;

/// User a card is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// A task card as returned by create, update and list.
///
/// A card belongs to exactly one column; moving it is a `column_id` update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Display order is significant.
    #[serde(default)]
    pub tags: Vec<String>,
    pub due_date: String,
    pub assignee: Assignee,
    #[serde(default)]
    pub image_url: Option<String>,
    pub team_id: String,
    pub column_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full card detail from `GET /cards/{cardId}`.
///
/// Superset of [`Card`]: carries the owning dashboard as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,
    pub dashboard_id: i64,
}

/// One page of cards for a column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardList {
    /// Continuation marker; `None` once the column is exhausted.
    #[serde(default)]
    pub cursor_id: Option<i64>,
    pub total_count: i64,
    pub cards: Vec<Card>,
}

/// Payload for `POST /cards`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub assignee_user_id: i64,
    pub dashboard_id: i64,
    pub column_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload for `PUT /cards/{cardId}`.
///
/// Full replacement: every field is sent, including a `null` image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub column_id: i64,
    pub assignee_user_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

impl UpdateCardRequest {
    /// Build a replacement payload that resends every field of `card`.
    ///
    /// Callers change the fields they care about and leave the rest as the
    /// server last reported them.
    pub fn from_card(card: &Card) -> Self {
        Self {
            column_id: card.column_id,
            assignee_user_id: card.assignee.id,
            title: card.title.clone(),
            description: card.description.clone(),
            due_date: card.due_date.clone(),
            tags: card.tags.clone(),
            image_url: card.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_JSON: &str = r#"{
        "id": 42,
        "title": "Fix login",
        "description": "Cookie is not read on the server",
        "tags": ["bug", "auth", "p1"],
        "dueDate": "2024-06-01 18:00",
        "assignee": { "id": 3, "nickname": "mina", "profileImageUrl": "https://img.example/3.png" },
        "imageUrl": null,
        "teamId": "9-2",
        "columnId": 7,
        "createdAt": "2024-05-20T09:00:00.000Z",
        "updatedAt": "2024-05-21T10:30:00.000Z"
    }"#;

    #[test]
    fn test_card_parses_camel_case() {
        let card: Card = serde_json::from_str(CARD_JSON).expect("card should parse");

        assert_eq!(card.id, 42);
        assert_eq!(card.column_id, 7);
        assert_eq!(card.tags, vec!["bug", "auth", "p1"]);
        assert_eq!(card.assignee.nickname, "mina");
        assert!(card.image_url.is_none());
        assert!(card.updated_at > card.created_at);
    }

    #[test]
    fn test_card_detail_flattens_card_fields() {
        let json = CARD_JSON.replacen("\"id\": 42,", "\"id\": 42, \"dashboardId\": 5,", 1);
        let detail: CardDetail = serde_json::from_str(&json).expect("detail should parse");

        assert_eq!(detail.dashboard_id, 5);
        assert_eq!(detail.card.id, 42);
        assert_eq!(detail.card.title, "Fix login");
    }

    #[test]
    fn test_card_list_accepts_null_cursor() {
        let page: CardList =
            serde_json::from_str(r#"{"cursorId": null, "totalCount": 0, "cards": []}"#)
                .expect("empty page should parse");

        assert_eq!(page.cursor_id, None);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_create_request_omits_missing_image() {
        let request = CreateCardRequest {
            assignee_user_id: 3,
            dashboard_id: 5,
            column_id: 7,
            title: "t".to_string(),
            description: "d".to_string(),
            due_date: "2024-06-01 18:00".to_string(),
            tags: vec![],
            image_url: None,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value.get("imageUrl").is_none());
        assert_eq!(value["assigneeUserId"], 3);
        assert_eq!(value["dueDate"], "2024-06-01 18:00");
    }

    #[test]
    fn test_update_request_always_sends_image_field() {
        let card: Card = serde_json::from_str(CARD_JSON).expect("card should parse");
        let request = UpdateCardRequest::from_card(&card);

        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value["imageUrl"].is_null());
        assert_eq!(value["assigneeUserId"], 3);
        assert_eq!(value["columnId"], 7);
        assert_eq!(value["tags"], serde_json::json!(["bug", "auth", "p1"]));
    }
}
