use log::{debug, warn};
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel};

use super::LocalStorage;
use crate::backend::SourceTask;
use crate::entities::task::{self, SyncStatus};
use crate::error::{SyncError, SyncResult};
use crate::repositories::{CollaboratorRepository, TaskRepository};
use crate::utils::color::{generate_hex_color, UNKNOWN_ASSIGNEE_SEED};

/// What a task's card showed after the last successful create or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub theme: Option<String>,
}

impl BoardSnapshot {
    pub fn from_model(model: &task::Model) -> Self {
        Self {
            title: model.synced_title.clone(),
            description: model.synced_description.clone(),
            due_date: model.synced_due_date.clone(),
            theme: model.synced_theme.clone(),
        }
    }
}

/// Fields of a cached task that changed remotely.
///
/// `None` leaves a column alone; for nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub content: Option<String>,
    pub description: Option<Option<String>>,
    pub labels: Option<Vec<String>>,
    pub url: Option<Option<String>>,
    pub project_id: Option<Option<String>>,
    pub section_id: Option<Option<String>>,
    pub parent_id: Option<Option<String>>,
    pub due_date: Option<Option<String>>,
    pub due_datetime: Option<Option<String>>,
    pub due_string: Option<Option<String>>,
    pub due_timezone: Option<Option<String>>,
    pub duration_amount: Option<Option<i32>>,
    pub duration_unit: Option<Option<String>>,
    pub assigner_id: Option<Option<String>>,
    pub assignee_id: Option<Option<String>>,
    pub comment_count: Option<i32>,
    pub is_completed: Option<bool>,
    pub priority: Option<i32>,
    pub order_index: Option<i32>,
}

fn changed<T: PartialEq + Clone>(cached: &T, remote: &T) -> Option<T> {
    (cached != remote).then(|| remote.clone())
}

impl TaskUpdate {
    /// Diff a cached row against the live remote task.
    ///
    /// Completion only ever moves from open to done.
    pub fn between(cached: &task::Model, remote: &SourceTask) -> Self {
        Self {
            content: changed(&cached.content, &remote.content),
            description: changed(&cached.description, &remote.description),
            labels: changed(&cached.label_list(), &remote.labels),
            url: changed(&cached.url, &remote.url),
            project_id: changed(&cached.project_id, &remote.project_id),
            section_id: changed(&cached.section_id, &remote.section_id),
            parent_id: changed(&cached.parent_id, &remote.parent_id),
            due_date: changed(&cached.due_date, &remote.due_date),
            due_datetime: changed(&cached.due_datetime, &remote.due_datetime),
            due_string: changed(&cached.due_string, &remote.due_string),
            due_timezone: changed(&cached.due_timezone, &remote.due_timezone),
            duration_amount: changed(&cached.duration_amount, &remote.duration_amount),
            duration_unit: changed(&cached.duration_unit, &remote.duration_unit),
            assigner_id: changed(&cached.assigner_id, &remote.assigner_id),
            assignee_id: changed(&cached.assignee_id, &remote.assignee_id),
            comment_count: changed(&cached.comment_count, &remote.comment_count),
            is_completed: (remote.is_completed && !cached.is_completed).then_some(true),
            priority: changed(&cached.priority, &remote.priority),
            order_index: changed(&cached.order_index, &remote.order_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether any field shown on the board card changed.
    pub fn touches_board(&self) -> bool {
        self.content.is_some()
            || self.description.is_some()
            || self.due_date.is_some()
            || self.assignee_id.is_some()
            || self.is_completed.is_some()
    }
}

/// Display first name and color for an assignee, looked up in the collaborators table.
async fn assignee_display<C>(conn: &C, assignee_id: Option<&str>) -> SyncResult<(Option<String>, String)>
where
    C: ConnectionTrait,
{
    let collaborator = match assignee_id {
        Some(id) => CollaboratorRepository::get_by_id(conn, id).await?,
        None => None,
    };

    Ok(match collaborator {
        Some(c) => {
            let color = c.hex_color.unwrap_or_else(|| generate_hex_color(&c.name));
            (Some(c.first_name), color)
        }
        None => (None, generate_hex_color(UNKNOWN_ASSIGNEE_SEED)),
    })
}

impl LocalStorage {
    /// Insert every task not cached yet, in one transaction, as `NotSynced`.
    ///
    /// Returns the number of rows inserted. Existing rows are left to [`Self::update_task`].
    pub async fn insert_tasks_if_absent(&self, tasks: &[SourceTask]) -> SyncResult<usize> {
        let txn = self.begin().await?;
        let mut existing = TaskRepository::existing_ids(&txn).await?;
        let mut inserted = 0;

        for source in tasks {
            if source.remote_id.is_empty() {
                warn!("⚠️  Skipping task without id: {:?}", source.content);
                continue;
            }
            if !existing.insert(source.remote_id.clone()) {
                continue;
            }

            let (first_name, hex_color) = assignee_display(&txn, source.assignee_id.as_deref()).await?;
            TaskRepository::insert(&txn, Self::new_task(source, first_name, hex_color)).await?;
            inserted += 1;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    /// Insert a single task unless one with the same id is cached.
    pub async fn upsert_task_if_absent(&self, source: &SourceTask) -> SyncResult<bool> {
        Ok(self.insert_tasks_if_absent(std::slice::from_ref(source)).await? == 1)
    }

    fn new_task(source: &SourceTask, first_name: Option<String>, hex_color: String) -> task::ActiveModel {
        task::ActiveModel {
            id: ActiveValue::Set(source.remote_id.clone()),
            content: ActiveValue::Set(source.content.clone()),
            description: ActiveValue::Set(source.description.clone()),
            labels: ActiveValue::Set(serde_json::to_string(&source.labels).unwrap_or_else(|_| "[]".to_string())),
            url: ActiveValue::Set(source.url.clone()),
            project_id: ActiveValue::Set(source.project_id.clone()),
            section_id: ActiveValue::Set(source.section_id.clone()),
            parent_id: ActiveValue::Set(source.parent_id.clone()),
            due_date: ActiveValue::Set(source.due_date.clone()),
            due_datetime: ActiveValue::Set(source.due_datetime.clone()),
            due_string: ActiveValue::Set(source.due_string.clone()),
            due_timezone: ActiveValue::Set(source.due_timezone.clone()),
            duration_amount: ActiveValue::Set(source.duration_amount),
            duration_unit: ActiveValue::Set(source.duration_unit.clone()),
            creator_id: ActiveValue::Set(source.creator_id.clone()),
            created_at: ActiveValue::Set(source.created_at.clone()),
            assigner_id: ActiveValue::Set(source.assigner_id.clone()),
            assignee_id: ActiveValue::Set(source.assignee_id.clone()),
            assignee_firstname: ActiveValue::Set(first_name),
            assignee_hex_color: ActiveValue::Set(Some(hex_color)),
            comment_count: ActiveValue::Set(source.comment_count),
            is_completed: ActiveValue::Set(source.is_completed),
            priority: ActiveValue::Set(source.priority),
            order_index: ActiveValue::Set(source.order_index),
            owner: ActiveValue::Set(Some("owner".to_string())),
            sync_status: ActiveValue::Set(SyncStatus::NotSynced),
            miro_card_id: ActiveValue::Set(None),
            synced_title: ActiveValue::Set(None),
            synced_description: ActiveValue::Set(None),
            synced_due_date: ActiveValue::Set(None),
            synced_theme: ActiveValue::Set(None),
        }
    }

    /// Apply remote changes to a cached task.
    ///
    /// A new assignee gets their display name and color recomputed. When a
    /// board-visible field changes on a task that already has a card, the task
    /// moves to `NeedsUpdate`; tasks without a card stay `NotSynced`.
    pub async fn update_task(&self, id: &str, changes: TaskUpdate) -> SyncResult<task::Model> {
        if id.is_empty() {
            return Err(SyncError::DataMapping("task update without an id".to_string()));
        }

        let txn = self.begin().await?;
        let cached = TaskRepository::get_by_id(&txn, id)
            .await?
            .ok_or_else(|| SyncError::DataMapping(format!("no cached task with id {id}")))?;

        if changes.is_empty() {
            return Ok(cached);
        }

        let was_synced = cached.sync_status == SyncStatus::Synced;
        let touches_board = changes.touches_board();
        let mut active = cached.into_active_model();

        if let Some(v) = changes.content {
            active.content = ActiveValue::Set(v);
        }
        if let Some(v) = changes.description {
            active.description = ActiveValue::Set(v);
        }
        if let Some(v) = changes.labels {
            active.labels = ActiveValue::Set(serde_json::to_string(&v).unwrap_or_else(|_| "[]".to_string()));
        }
        if let Some(v) = changes.url {
            active.url = ActiveValue::Set(v);
        }
        if let Some(v) = changes.project_id {
            active.project_id = ActiveValue::Set(v);
        }
        if let Some(v) = changes.section_id {
            active.section_id = ActiveValue::Set(v);
        }
        if let Some(v) = changes.parent_id {
            active.parent_id = ActiveValue::Set(v);
        }
        if let Some(v) = changes.due_date {
            active.due_date = ActiveValue::Set(v);
        }
        if let Some(v) = changes.due_datetime {
            active.due_datetime = ActiveValue::Set(v);
        }
        if let Some(v) = changes.due_string {
            active.due_string = ActiveValue::Set(v);
        }
        if let Some(v) = changes.due_timezone {
            active.due_timezone = ActiveValue::Set(v);
        }
        if let Some(v) = changes.duration_amount {
            active.duration_amount = ActiveValue::Set(v);
        }
        if let Some(v) = changes.duration_unit {
            active.duration_unit = ActiveValue::Set(v);
        }
        if let Some(v) = changes.assigner_id {
            active.assigner_id = ActiveValue::Set(v);
        }
        if let Some(assignee) = changes.assignee_id {
            let (first_name, hex_color) = assignee_display(&txn, assignee.as_deref()).await?;
            active.assignee_id = ActiveValue::Set(assignee);
            active.assignee_firstname = ActiveValue::Set(first_name);
            active.assignee_hex_color = ActiveValue::Set(Some(hex_color));
        }
        if let Some(v) = changes.comment_count {
            active.comment_count = ActiveValue::Set(v);
        }
        if let Some(v) = changes.is_completed {
            active.is_completed = ActiveValue::Set(v);
        }
        if let Some(v) = changes.priority {
            active.priority = ActiveValue::Set(v);
        }
        if let Some(v) = changes.order_index {
            active.order_index = ActiveValue::Set(v);
        }

        if touches_board && was_synced {
            active.sync_status = ActiveValue::Set(SyncStatus::NeedsUpdate);
        }

        let updated = TaskRepository::update(&txn, active).await?;
        txn.commit().await?;
        debug!("Updated task {id} (status {:?})", updated.sync_status);
        Ok(updated)
    }

    pub async fn get_tasks_with_status(&self, status: SyncStatus) -> SyncResult<Vec<task::Model>> {
        Ok(TaskRepository::get_with_status(&self.conn, status).await?)
    }

    pub async fn get_task_by_id(&self, id: &str) -> SyncResult<Option<task::Model>> {
        Ok(TaskRepository::get_by_id(&self.conn, id).await?)
    }

    pub async fn get_task_by_card_id(&self, card_id: &str) -> SyncResult<Option<task::Model>> {
        Ok(TaskRepository::get_by_card_id(&self.conn, card_id).await?)
    }

    pub async fn all_tasks(&self) -> SyncResult<Vec<task::Model>> {
        Ok(TaskRepository::get_all(&self.conn).await?)
    }

    /// Record the card now mirroring a task and mark the task `Synced`.
    pub async fn mark_task_synced(&self, id: &str, card_id: &str, snapshot: &BoardSnapshot) -> SyncResult<task::Model> {
        self.write_synced(id, Some(card_id), snapshot).await
    }

    /// Mark a task `Synced` although its card is unknown.
    ///
    /// Caches written by older versions hold mirrored tasks without a card id;
    /// such a task must not get a second card.
    pub async fn mark_task_synced_without_card(&self, id: &str, snapshot: &BoardSnapshot) -> SyncResult<task::Model> {
        self.write_synced(id, None, snapshot).await
    }

    async fn write_synced(&self, id: &str, card_id: Option<&str>, snapshot: &BoardSnapshot) -> SyncResult<task::Model> {
        let cached = self.require_task(id).await?;
        let mut active = cached.into_active_model();
        if let Some(card_id) = card_id {
            active.miro_card_id = ActiveValue::Set(Some(card_id.to_string()));
        }
        active.sync_status = ActiveValue::Set(SyncStatus::Synced);
        active.synced_title = ActiveValue::Set(snapshot.title.clone());
        active.synced_description = ActiveValue::Set(snapshot.description.clone());
        active.synced_due_date = ActiveValue::Set(snapshot.due_date.clone());
        active.synced_theme = ActiveValue::Set(snapshot.theme.clone());
        Ok(TaskRepository::update(&self.conn, active).await?)
    }

    /// Set the completion flag. Completion never reverts.
    pub async fn mark_task_completed(&self, id: &str) -> SyncResult<task::Model> {
        let cached = self.require_task(id).await?;
        if cached.is_completed {
            return Ok(cached);
        }
        let mut active = cached.into_active_model();
        active.is_completed = ActiveValue::Set(true);
        Ok(TaskRepository::update(&self.conn, active).await?)
    }

    /// Recompute every task's assignee first name and color from the collaborators table.
    ///
    /// A task with a card whose color changed moves to `NeedsUpdate`. Returns
    /// the number of rows touched.
    pub async fn refresh_assignee_display(&self) -> SyncResult<usize> {
        let txn = self.begin().await?;
        let mut touched = 0;

        for cached in TaskRepository::get_all(&txn).await? {
            let (first_name, hex_color) = assignee_display(&txn, cached.assignee_id.as_deref()).await?;
            let color_changed = cached.assignee_hex_color.as_deref() != Some(hex_color.as_str());
            if cached.assignee_firstname == first_name && !color_changed {
                continue;
            }

            let needs_card_update = color_changed && cached.sync_status == SyncStatus::Synced;
            let mut active = cached.into_active_model();
            active.assignee_firstname = ActiveValue::Set(first_name);
            active.assignee_hex_color = ActiveValue::Set(Some(hex_color));
            if needs_card_update {
                active.sync_status = ActiveValue::Set(SyncStatus::NeedsUpdate);
            }
            TaskRepository::update(&txn, active).await?;
            touched += 1;
        }

        txn.commit().await?;
        Ok(touched)
    }

    async fn require_task(&self, id: &str) -> SyncResult<task::Model> {
        self.get_task_by_id(id)
            .await?
            .ok_or_else(|| SyncError::DataMapping(format!("no cached task with id {id}")))
    }
}
