//! Remote service adapters.
//!
//! This module defines the two interfaces the sync engine drives, the task source
//! and the board, along with their common data types and error handling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::color::TagColor;

pub mod http;
pub mod miro;
pub mod todoist;

/// Common error types for remote operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Task as reported by the task source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTask {
    pub remote_id: String,
    pub content: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub url: Option<String>,
    pub project_id: Option<String>,
    pub section_id: Option<String>,
    pub parent_id: Option<String>,
    pub due_date: Option<String>,
    pub due_datetime: Option<String>,
    pub due_string: Option<String>,
    pub due_timezone: Option<String>,
    pub duration_amount: Option<i32>,
    pub duration_unit: Option<String>,
    pub creator_id: Option<String>,
    pub created_at: Option<String>,
    pub assigner_id: Option<String>,
    pub assignee_id: Option<String>,
    pub comment_count: i32,
    pub is_completed: bool,
    pub priority: i32,
    pub order_index: i32,
}

/// Project member as reported by the task source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCollaborator {
    pub remote_id: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl CardData {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_theme: Option<String>,
}

/// Body of a card creation request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardPayload {
    pub data: CardData,
    pub style: CardStyle,
    pub position: Position,
    pub geometry: Geometry,
}

/// Sparse card update; absent sections are left untouched remotely.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CardPatch {
    #[serde(skip_serializing_if = "CardData::is_empty")]
    pub data: CardData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<CardStyle>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.style.as_ref().map_or(true, |s| s.card_theme.is_none())
    }
}

/// A named frame on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub id: String,
    pub title: String,
    /// Center of the frame
    pub position: Position,
    pub geometry: Geometry,
}

impl Frame {
    pub fn top_left(&self) -> Position {
        Position {
            x: self.position.x - self.geometry.width / 2.0,
            y: self.position.y - self.geometry.height / 2.0,
        }
    }
}

/// Any item placed on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardItem {
    pub id: String,
    pub item_type: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardTag {
    pub id: String,
    pub title: String,
    /// Raw fill color name as reported by the board
    pub fill_color: String,
}

impl BoardTag {
    pub fn color(&self) -> Option<TagColor> {
        TagColor::parse(&self.fill_color)
    }
}

/// Read/write access to the task-tracking service.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Returns the service identifier (e.g. "todoist").
    fn source_type(&self) -> &str;

    async fn fetch_tasks(&self, project_id: &str) -> Result<Vec<SourceTask>, BackendError>;
    async fn fetch_collaborators(&self, project_id: &str) -> Result<Vec<SourceCollaborator>, BackendError>;
    async fn close_task(&self, task_id: &str) -> Result<(), BackendError>;
}

/// Read/write access to the visual board.
#[async_trait]
pub trait Board: Send + Sync {
    /// Returns the service identifier (e.g. "miro").
    fn board_type(&self) -> &str;

    // Cards
    async fn create_card(&self, board_id: &str, payload: &CardPayload) -> Result<String, BackendError>;
    async fn update_card(&self, board_id: &str, card_id: &str, patch: &CardPatch) -> Result<(), BackendError>;

    // Frames and their contents
    async fn list_frames(&self, board_id: &str) -> Result<Vec<Frame>, BackendError>;
    async fn list_items_in_parent(&self, board_id: &str, parent_id: &str) -> Result<Vec<BoardItem>, BackendError>;

    // Tags
    async fn list_tags(&self, board_id: &str) -> Result<Vec<BoardTag>, BackendError>;
    async fn create_tag(&self, board_id: &str, title: &str, color: TagColor) -> Result<BoardTag, BackendError>;
    async fn attach_tag(&self, board_id: &str, item_id: &str, tag_id: &str) -> Result<(), BackendError>;

    async fn find_frame_by_title(&self, board_id: &str, title: &str) -> Result<Option<Frame>, BackendError> {
        let frames = self.list_frames(board_id).await?;
        Ok(frames.into_iter().find(|f| f.title.trim() == title.trim()))
    }

    /// Items inside the frame titled `frame_title`; empty when no such frame exists.
    async fn list_items_in_frame(&self, board_id: &str, frame_title: &str) -> Result<Vec<BoardItem>, BackendError> {
        match self.find_frame_by_title(board_id, frame_title).await? {
            Some(frame) => self.list_items_in_parent(board_id, &frame.id).await,
            None => Ok(Vec::new()),
        }
    }
}
