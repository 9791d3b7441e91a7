//! Reconciliation between the task source, the local cache and the board.
//!
//! A [`SyncService::run`] walks the pipeline once:
//! 1. Cache new collaborators and resolve their colors against board tags
//! 2. Refresh assignee display data on cached tasks
//! 3. Cache new tasks and fold remote edits into existing ones
//! 4. Create cards for `NotSynced` tasks, patch cards of `NeedsUpdate` tasks
//! 5. Close tasks whose cards sit in the done frame
//!
//! Every step tolerates remote failures; whatever did not converge keeps its
//! sync status and is picked up again by the next run.

pub mod cards;
pub mod collaborators;
pub mod completion;
pub mod layout;
pub mod tags;
pub mod tasks;

use std::fmt;
use std::sync::Arc;

use log::{error, info, warn};

use crate::backend::{Board, TaskSource};
use crate::config::LayoutConfig;
use crate::storage::LocalStorage;
use crate::utils::color::ColorAssigner;

/// Identifiers and layout the engine works with.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub board_id: String,
    pub project_id: String,
    pub layout: LayoutConfig,
}

/// Counters describing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub collaborators_inserted: usize,
    pub tags_created: usize,
    pub tags_refreshed: usize,
    pub tasks_inserted: usize,
    pub tasks_changed: usize,
    pub cards_created: usize,
    pub cards_failed: usize,
    pub cards_updated: usize,
    pub card_updates_failed: usize,
    pub tasks_completed: usize,
    /// Errors that were logged and absorbed
    pub errors: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new collaborators, {} tags created, {} tags refreshed, {} new tasks, {} changed tasks, \
             {} cards created ({} failed), {} cards updated ({} failed), {} tasks completed, {} errors",
            self.collaborators_inserted,
            self.tags_created,
            self.tags_refreshed,
            self.tasks_inserted,
            self.tasks_changed,
            self.cards_created,
            self.cards_failed,
            self.cards_updated,
            self.card_updates_failed,
            self.tasks_completed,
            self.errors,
        )
    }
}

/// Drives the task source and the board towards the cached state.
pub struct SyncService {
    storage: LocalStorage,
    task_source: Arc<dyn TaskSource>,
    board: Arc<dyn Board>,
    colors: ColorAssigner,
    settings: SyncSettings,
}

impl SyncService {
    pub fn new(
        storage: LocalStorage,
        task_source: Arc<dyn TaskSource>,
        board: Arc<dyn Board>,
        colors: ColorAssigner,
        settings: SyncSettings,
    ) -> Self {
        Self {
            storage,
            task_source,
            board,
            colors,
            settings,
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Hand the cache back, e.g. to close it.
    pub fn into_storage(self) -> LocalStorage {
        self.storage
    }

    /// Run the whole pipeline once.
    pub async fn run(&self) -> SyncReport {
        info!(
            "🔄 Starting sync: {} project {} -> {} board {}",
            self.task_source.source_type(),
            self.settings.project_id,
            self.board.board_type(),
            self.settings.board_id
        );
        let mut report = SyncReport::default();

        // Card colors derive from collaborators, so card creation waits for them.
        let mut colors_ready = true;
        if let Err(e) = self.sync_collaborators(&mut report).await {
            error!("❌ Failed to store collaborators: {e}");
            report.errors += 1;
            colors_ready = false;
        }
        if let Err(e) = self.reconcile_tags(&mut report).await {
            error!("❌ Failed to reconcile tags: {e}");
            report.errors += 1;
            colors_ready = false;
        }
        if let Err(e) = self.refresh_assignees().await {
            error!("❌ Failed to refresh assignees: {e}");
            report.errors += 1;
            colors_ready = false;
        }

        if let Err(e) = self.sync_tasks(&mut report).await {
            error!("❌ Failed to store tasks: {e}");
            report.errors += 1;
        }

        if colors_ready {
            if let Err(e) = self.create_cards(&mut report).await {
                error!("❌ Failed to create cards: {e}");
                report.errors += 1;
            }
        } else {
            warn!("⚠️  Collaborator colors are inconsistent, skipping card creation this run");
        }

        if let Err(e) = self.update_cards(&mut report).await {
            error!("❌ Failed to update cards: {e}");
            report.errors += 1;
        }
        if let Err(e) = self.complete_done_tasks(&mut report).await {
            error!("❌ Failed to complete tasks: {e}");
            report.errors += 1;
        }

        info!("🏁 Sync finished: {report}");
        report
    }
}
