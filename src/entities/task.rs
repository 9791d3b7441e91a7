use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Local view of whether a task's board card exists and is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum SyncStatus {
    /// No card has been created yet
    #[sea_orm(num_value = 0)]
    NotSynced,
    /// The card mirrors the cached task
    #[sea_orm(num_value = 1)]
    Synced,
    /// The cached task changed after its card was written
    #[sea_orm(num_value = 2)]
    NeedsUpdate,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub content: String,
    pub description: Option<String>,
    /// JSON-encoded array of label names
    pub labels: String,
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
    pub assignee_firstname: Option<String>,
    pub assignee_hex_color: Option<String>,
    pub comment_count: i32,
    pub is_completed: bool,
    pub priority: i32,
    #[sea_orm(column_name = "order")]
    pub order_index: i32,
    pub owner: Option<String>,
    pub sync_status: SyncStatus,
    pub miro_card_id: Option<String>,
    // What the board card showed after the last successful create/update
    pub synced_title: Option<String>,
    pub synced_description: Option<String>,
    pub synced_due_date: Option<String>,
    pub synced_theme: Option<String>,
}

// Tasks may reference assignees that were never fetched, so there is no
// foreign key to collaborators.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// Decode the stored label list; a malformed value reads as no labels.
    pub fn label_list(&self) -> Vec<String> {
        serde_json::from_str(&self.labels).unwrap_or_default()
    }
}

impl ActiveModelBehavior for ActiveModel {}
