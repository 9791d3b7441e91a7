//! Miro REST v2 board adapter.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::http::HttpClient;
use super::{Board, BoardItem, BoardTag, BackendError, CardPatch, CardPayload, Frame, Geometry, Position};
use crate::utils::color::TagColor;

/// Default REST endpoint
pub const MIRO_BASE_URL: &str = "https://api.miro.com/v2";

const PAGE_LIMIT: &str = "50";

#[derive(Debug, Deserialize)]
struct CursorPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OffsetPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ItemData {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MiroItem {
    id: String,
    #[serde(rename = "type", default)]
    item_type: String,
    #[serde(default)]
    data: Option<ItemData>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct CreatedItem {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MiroTag {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    fill_color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TagRequest<'a> {
    fill_color: &'a str,
    title: &'a str,
}

impl From<MiroTag> for BoardTag {
    fn from(tag: MiroTag) -> Self {
        Self {
            id: tag.id,
            title: tag.title,
            fill_color: tag.fill_color,
        }
    }
}

/// Board backed by the Miro REST API.
pub struct MiroClient {
    http: HttpClient,
}

impl MiroClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(MIRO_BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: &str, access_token: String) -> Self {
        Self {
            http: HttpClient::new(base_url, access_token),
        }
    }

    /// Follow cursor pagination on `GET /boards/{board}/items`.
    async fn list_items(&self, board_id: &str, filter: (&str, &str)) -> Result<Vec<MiroItem>, BackendError> {
        let path = format!("boards/{board_id}/items");
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![filter, ("limit", PAGE_LIMIT)];
            if let Some(c) = cursor.as_deref() {
                query.push(("cursor", c));
            }
            let page: CursorPage<MiroItem> = self.http.get_json(&path, &query).await?;
            items.extend(page.data);

            match page.cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Listed {} items on board {board_id}", items.len());
        Ok(items)
    }
}

#[async_trait]
impl Board for MiroClient {
    fn board_type(&self) -> &str {
        "miro"
    }

    async fn create_card(&self, board_id: &str, payload: &CardPayload) -> Result<String, BackendError> {
        let created: CreatedItem = self.http.post_json(&format!("boards/{board_id}/cards"), payload).await?;
        Ok(created.id)
    }

    async fn update_card(&self, board_id: &str, card_id: &str, patch: &CardPatch) -> Result<(), BackendError> {
        if patch.is_empty() {
            return Ok(());
        }
        self.http.patch_json(&format!("boards/{board_id}/cards/{card_id}"), patch).await
    }

    async fn list_frames(&self, board_id: &str) -> Result<Vec<Frame>, BackendError> {
        let items = self.list_items(board_id, ("type", "frame")).await?;
        Ok(items
            .into_iter()
            .map(|item| Frame {
                title: item.data.and_then(|d| d.title).unwrap_or_default(),
                position: item.position.unwrap_or_default(),
                geometry: item.geometry.unwrap_or_default(),
                id: item.id,
            })
            .collect())
    }

    async fn list_items_in_parent(&self, board_id: &str, parent_id: &str) -> Result<Vec<BoardItem>, BackendError> {
        let items = self.list_items(board_id, ("parent_item_id", parent_id)).await?;
        Ok(items
            .into_iter()
            .map(|item| BoardItem {
                id: item.id,
                item_type: item.item_type,
            })
            .collect())
    }

    async fn list_tags(&self, board_id: &str) -> Result<Vec<BoardTag>, BackendError> {
        let path = format!("boards/{board_id}/tags");
        let mut tags: Vec<BoardTag> = Vec::new();

        loop {
            let offset = tags.len().to_string();
            let page: OffsetPage<MiroTag> = self
                .http
                .get_json(&path, &[("limit", PAGE_LIMIT), ("offset", offset.as_str())])
                .await?;
            let fetched = page.data.len();
            tags.extend(page.data.into_iter().map(BoardTag::from));

            let more = page.total.is_some_and(|total| tags.len() < total);
            if fetched == 0 || !more {
                break;
            }
        }

        Ok(tags)
    }

    async fn create_tag(&self, board_id: &str, title: &str, color: TagColor) -> Result<BoardTag, BackendError> {
        let body = TagRequest {
            fill_color: color.as_str(),
            title,
        };
        let tag: MiroTag = self.http.post_json(&format!("boards/{board_id}/tags"), &body).await?;
        Ok(tag.into())
    }

    async fn attach_tag(&self, board_id: &str, item_id: &str, tag_id: &str) -> Result<(), BackendError> {
        self.http
            .post_empty(&format!("boards/{board_id}/items/{item_id}"), &[("tag_id", tag_id)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CardData, CardStyle};

    #[test]
    fn card_payload_uses_board_field_names() {
        let payload = CardPayload {
            data: CardData {
                title: Some("Write report".into()),
                description: Some("Q3".into()),
                due_date: Some("2024-05-03T00:00:00Z".into()),
            },
            style: CardStyle {
                card_theme: Some("#2d9bf0".into()),
            },
            position: Position { x: 310.0, y: 0.0 },
            geometry: Geometry {
                width: 300.0,
                height: 100.0,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["data"]["dueDate"], "2024-05-03T00:00:00Z");
        assert_eq!(json["style"]["cardTheme"], "#2d9bf0");
        assert_eq!(json["position"]["x"], 310.0);
        assert_eq!(json["geometry"]["height"], 100.0);
    }

    #[test]
    fn frame_item_decodes_title_and_geometry() {
        let json = r#"{"id":"3458","type":"frame","data":{"title":"Done","format":"custom"},
            "position":{"x":100.0,"y":50.0,"origin":"center"},"geometry":{"width":400.0,"height":200.0}}"#;
        let item: MiroItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.data.and_then(|d| d.title).as_deref(), Some("Done"));
        assert_eq!(item.geometry.unwrap().width, 400.0);
    }

    #[test]
    fn tag_request_is_camel_case() {
        let body = TagRequest {
            fill_color: TagColor::DarkBlue.as_str(),
            title: "Anna",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"fillColor": "dark_blue", "title": "Anna"}));
    }
}
