//! In-process stand-ins for the task source and the board.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};

use todoist_miro_sync::backend::{
    BackendError, Board, BoardItem, BoardTag, CardPatch, CardPayload, Frame, Geometry, Position, SourceCollaborator,
    SourceTask, TaskSource,
};
use todoist_miro_sync::config::LayoutConfig;
use todoist_miro_sync::storage::LocalStorage;
use todoist_miro_sync::sync::{SyncService, SyncSettings};
use todoist_miro_sync::utils::color::{ColorAssigner, TagColor};

pub const BOARD_ID: &str = "board-1";
pub const PROJECT_ID: &str = "project-1";

pub fn task(id: &str, content: &str) -> SourceTask {
    SourceTask {
        remote_id: id.to_string(),
        content: content.to_string(),
        description: Some(String::new()),
        project_id: Some(PROJECT_ID.to_string()),
        priority: 1,
        ..Default::default()
    }
}

pub fn collaborator(id: &str, name: &str) -> SourceCollaborator {
    SourceCollaborator {
        remote_id: id.to_string(),
        name: name.to_string(),
        email: Some(format!("{id}@example.com")),
    }
}

#[derive(Default)]
pub struct FakeTaskSource {
    pub tasks: Mutex<Vec<SourceTask>>,
    pub collaborators: Mutex<Vec<SourceCollaborator>>,
    pub fail_fetch: Mutex<bool>,
    pub closed: Mutex<Vec<String>>,
}

impl FakeTaskSource {
    pub fn new(tasks: Vec<SourceTask>, collaborators: Vec<SourceCollaborator>) -> Arc<Self> {
        Arc::new(Self {
            tasks: Mutex::new(tasks),
            collaborators: Mutex::new(collaborators),
            ..Default::default()
        })
    }

    pub fn set_tasks(&self, tasks: Vec<SourceTask>) {
        *self.tasks.lock().unwrap() = tasks;
    }

    pub fn closed(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskSource for FakeTaskSource {
    fn source_type(&self) -> &str {
        "fake-tasks"
    }

    async fn fetch_tasks(&self, _project_id: &str) -> Result<Vec<SourceTask>, BackendError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(BackendError::Network("503: unavailable".into()));
        }
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn fetch_collaborators(&self, _project_id: &str) -> Result<Vec<SourceCollaborator>, BackendError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(BackendError::Network("503: unavailable".into()));
        }
        Ok(self.collaborators.lock().unwrap().clone())
    }

    async fn close_task(&self, task_id: &str) -> Result<(), BackendError> {
        self.closed.lock().unwrap().push(task_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBoard {
    pub frames: Mutex<Vec<Frame>>,
    pub items_by_parent: Mutex<HashMap<String, Vec<BoardItem>>>,
    pub tags: Mutex<Vec<BoardTag>>,
    /// Card titles whose creation fails
    pub failing_titles: Mutex<HashSet<String>>,
    pub fail_updates: Mutex<bool>,
    pub created: Mutex<Vec<CardPayload>>,
    pub updates: Mutex<Vec<(String, CardPatch)>>,
    pub created_tags: Mutex<Vec<(String, TagColor)>>,
    pub attached: Mutex<Vec<(String, String)>>,
    next_id: AtomicUsize,
}

impl FakeBoard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_frame(&self, id: &str, title: &str, center: Position, size: Geometry) {
        self.frames.lock().unwrap().push(Frame {
            id: id.to_string(),
            title: title.to_string(),
            position: center,
            geometry: size,
        });
    }

    pub fn put_in_frame(&self, frame_id: &str, card_id: &str) {
        self.items_by_parent
            .lock()
            .unwrap()
            .entry(frame_id.to_string())
            .or_default()
            .push(BoardItem {
                id: card_id.to_string(),
                item_type: "card".to_string(),
            });
    }

    pub fn add_tag(&self, id: &str, title: &str, fill_color: &str) {
        self.tags.lock().unwrap().push(BoardTag {
            id: id.to_string(),
            title: title.to_string(),
            fill_color: fill_color.to_string(),
        });
    }

    pub fn fail_title(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.to_string());
    }

    pub fn created(&self) -> Vec<CardPayload> {
        self.created.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, CardPatch)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl Board for FakeBoard {
    fn board_type(&self) -> &str {
        "fake-board"
    }

    async fn create_card(&self, _board_id: &str, payload: &CardPayload) -> Result<String, BackendError> {
        let title = payload.data.title.clone().unwrap_or_default();
        if self.failing_titles.lock().unwrap().contains(&title) {
            return Err(BackendError::Network("500: boom".into()));
        }
        self.created.lock().unwrap().push(payload.clone());
        Ok(format!("card-{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn update_card(&self, _board_id: &str, card_id: &str, patch: &CardPatch) -> Result<(), BackendError> {
        if *self.fail_updates.lock().unwrap() {
            return Err(BackendError::Network("500: boom".into()));
        }
        self.updates.lock().unwrap().push((card_id.to_string(), patch.clone()));
        Ok(())
    }

    async fn list_frames(&self, _board_id: &str) -> Result<Vec<Frame>, BackendError> {
        Ok(self.frames.lock().unwrap().clone())
    }

    async fn list_items_in_parent(&self, _board_id: &str, parent_id: &str) -> Result<Vec<BoardItem>, BackendError> {
        Ok(self
            .items_by_parent
            .lock()
            .unwrap()
            .get(parent_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_tags(&self, _board_id: &str) -> Result<Vec<BoardTag>, BackendError> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn create_tag(&self, _board_id: &str, title: &str, color: TagColor) -> Result<BoardTag, BackendError> {
        let tag = BoardTag {
            id: format!("tag-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            title: title.to_string(),
            fill_color: color.as_str().to_string(),
        };
        self.created_tags.lock().unwrap().push((title.to_string(), color));
        self.tags.lock().unwrap().push(tag.clone());
        Ok(tag)
    }

    async fn attach_tag(&self, _board_id: &str, item_id: &str, tag_id: &str) -> Result<(), BackendError> {
        self.attached.lock().unwrap().push((item_id.to_string(), tag_id.to_string()));
        Ok(())
    }
}

pub fn settings() -> SyncSettings {
    SyncSettings {
        board_id: BOARD_ID.to_string(),
        project_id: PROJECT_ID.to_string(),
        layout: LayoutConfig::default(),
    }
}

pub async fn service(source: Arc<FakeTaskSource>, board: Arc<FakeBoard>) -> SyncService {
    service_with_colors(source, board, ColorAssigner::default()).await
}

pub async fn service_with_colors(
    source: Arc<FakeTaskSource>,
    board: Arc<FakeBoard>,
    colors: ColorAssigner,
) -> SyncService {
    let storage = LocalStorage::in_memory().await.unwrap();
    SyncService::new(storage, source, board, colors, settings())
}

pub fn service_with_storage(storage: LocalStorage, source: Arc<FakeTaskSource>, board: Arc<FakeBoard>) -> SyncService {
    SyncService::new(storage, source, board, ColorAssigner::default(), settings())
}

/// Write a cache in the first released schema: no card ids, no display or
/// snapshot columns. Holds one mirrored task `old-1`.
pub async fn legacy_cache(path: &Path) {
    let legacy = Database::connect(format!("sqlite://{}?mode=rwc", path.display()))
        .await
        .unwrap();
    for sql in [
        r#"CREATE TABLE tasks (
            id TEXT PRIMARY KEY NOT NULL, content TEXT NOT NULL, description TEXT, labels TEXT NOT NULL,
            url TEXT, project_id TEXT, section_id TEXT, parent_id TEXT, due_date TEXT, due_datetime TEXT,
            due_string TEXT, due_timezone TEXT, duration_amount INTEGER, duration_unit TEXT, creator_id TEXT,
            created_at TEXT, assigner_id TEXT, assignee_id TEXT, comment_count INTEGER NOT NULL,
            is_completed BOOLEAN NOT NULL, priority INTEGER NOT NULL, "order" INTEGER NOT NULL, owner TEXT,
            sync_status INTEGER NOT NULL
        )"#,
        r#"CREATE TABLE collaborators (
            id TEXT PRIMARY KEY NOT NULL, name TEXT NOT NULL, email TEXT, first_name TEXT NOT NULL
        )"#,
        r#"INSERT INTO tasks (id, content, labels, comment_count, is_completed, priority, "order", sync_status)
           VALUES ('old-1', 'Legacy task', '[]', 0, 0, 1, 3, 1)"#,
    ] {
        legacy
            .execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
            .await
            .unwrap();
    }
    legacy.close().await.unwrap();
}
