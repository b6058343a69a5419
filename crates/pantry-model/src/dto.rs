use crate::item::Item;
use crate::list::ShoppingList;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/lists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    /// Desired display name. Trimmed server-side; must not end up empty.
    pub name: String,
    /// Initial items, usually empty.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A list as it appears on the wire.
///
/// Ids travel as `_id` and timestamps as camelCase ISO-8601 strings with
/// millisecond precision, the shape browser clients already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<&ShoppingList> for ListResponse {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            items: list.items.clone(),
            created_at: list.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: list.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Body of a successful `DELETE /api/v1/lists/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedList {
    /// Id of the list that no longer exists.
    #[serde(rename = "_id")]
    pub id: String,
}

/// Error body shared by every failed API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Fixed user-facing description of the failure.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::gen_list_id;

    #[test]
    fn test_list_response_wire_shape() {
        let list = ShoppingList::new(gen_list_id(), "Groceries")
            .with_item(Item::new("111", "Milk", "Organic Co"));
        let value = serde_json::to_value(ListResponse::from(&list)).unwrap();

        assert_eq!(value["_id"], list.id.as_str());
        assert_eq!(value["name"], "Groceries");
        assert_eq!(value["items"][0]["barcode"], "111");
        let created = value["createdAt"].as_str().unwrap();
        assert!(created.ends_with('Z'));
        chrono::DateTime::parse_from_rfc3339(created).unwrap();
    }

    #[test]
    fn test_create_request_items_default_empty() {
        let req: CreateListRequest = serde_json::from_str(r#"{"name":"Trip"}"#).unwrap();
        assert_eq!(req.name, "Trip");
        assert!(req.items.is_empty());
    }

    #[test]
    fn test_error_message_shape() {
        let value =
            serde_json::to_value(ErrorMessage { message: "Please try again.".to_string() })
                .unwrap();
        assert_eq!(value, serde_json::json!({ "message": "Please try again." }));
    }
}
