use log::{debug, error, info, warn};

use super::layout::GridLayout;
use super::{SyncReport, SyncService};
use crate::backend::{CardData, CardPatch, CardPayload, CardStyle, Position};
use crate::entities::task::{self, SyncStatus};
use crate::error::{SyncError, SyncResult};
use crate::storage::BoardSnapshot;
use crate::utils::datetime::board_due_date;

/// What the card for `task` should show right now.
pub fn desired_snapshot(task: &task::Model) -> BoardSnapshot {
    BoardSnapshot {
        title: Some(task.content.clone()),
        description: task.description.clone(),
        due_date: task.due_date.as_deref().and_then(board_due_date),
        theme: task.assignee_hex_color.clone(),
    }
}

/// Full creation payload for the `index`-th new card.
pub fn card_payload(task: &task::Model, layout: &GridLayout, index: usize) -> CardPayload {
    let snapshot = desired_snapshot(task);
    CardPayload {
        data: CardData {
            title: snapshot.title,
            description: snapshot.description,
            due_date: snapshot.due_date,
        },
        style: CardStyle {
            card_theme: snapshot.theme,
        },
        position: layout.position(index),
        geometry: layout.geometry(),
    }
}

/// Sparse patch turning a card that shows `synced` into one that shows `desired`.
///
/// Also returns what the card shows once the patch is applied: a removed due
/// date or theme cannot be expressed as a patch, so those keep their old value.
pub fn card_patch(synced: &BoardSnapshot, desired: &BoardSnapshot) -> (CardPatch, BoardSnapshot) {
    let mut patch = CardPatch::default();
    let mut after = desired.clone();

    if desired.title != synced.title {
        match &desired.title {
            Some(title) => patch.data.title = Some(title.clone()),
            None => after.title = synced.title.clone(),
        }
    }
    if desired.description != synced.description {
        patch.data.description = Some(desired.description.clone().unwrap_or_default());
    }
    if desired.due_date != synced.due_date {
        match &desired.due_date {
            Some(due) => patch.data.due_date = Some(due.clone()),
            None => {
                warn!("⚠️  Due date was removed; the card keeps {:?}", synced.due_date);
                after.due_date = synced.due_date.clone();
            }
        }
    }
    if desired.theme != synced.theme {
        match &desired.theme {
            Some(theme) => {
                patch.style = Some(CardStyle {
                    card_theme: Some(theme.clone()),
                })
            }
            None => after.theme = synced.theme.clone(),
        }
    }

    (patch, after)
}

impl SyncService {
    /// Create a card for every task that has none yet.
    pub(super) async fn create_cards(&self, report: &mut SyncReport) -> SyncResult<()> {
        let pending = self.storage.get_tasks_with_status(SyncStatus::NotSynced).await?;
        if pending.is_empty() {
            info!("✅ No new tasks to place on the board");
            return Ok(());
        }

        let layout = GridLayout::new(&self.settings.layout, self.inbox_origin(report).await);

        for (index, task) in pending.iter().enumerate() {
            let payload = card_payload(task, &layout, index);
            let card_id = match self.board.create_card(&self.settings.board_id, &payload).await {
                Ok(card_id) => card_id,
                Err(e) => {
                    error!("❌ Failed to create card for task {}: {}", task.id, SyncError::RemoteMutation(e));
                    report.cards_failed += 1;
                    continue;
                }
            };

            let snapshot = BoardSnapshot {
                title: payload.data.title.clone(),
                description: payload.data.description.clone(),
                due_date: payload.data.due_date.clone(),
                theme: payload.style.card_theme.clone(),
            };
            if let Err(e) = self.storage.mark_task_synced(&task.id, &card_id, &snapshot).await {
                error!("❌ Card {card_id} created but task {} could not be marked synced: {e}", task.id);
                report.errors += 1;
                continue;
            }
            report.cards_created += 1;
            debug!("Created card {card_id} for task {}", task.id);

            self.attach_assignee_tag(task, &card_id, report).await;
        }

        info!("✅ Created {} cards ({} failed)", report.cards_created, report.cards_failed);
        Ok(())
    }

    /// Top-left corner of the inbox frame, or the board origin.
    async fn inbox_origin(&self, report: &mut SyncReport) -> Position {
        let title = &self.settings.layout.inbox_frame;
        match self.board.find_frame_by_title(&self.settings.board_id, title).await {
            Ok(Some(frame)) => frame.top_left(),
            Ok(None) => {
                info!("Frame '{title}' not found, placing cards at the board origin");
                Position::default()
            }
            Err(e) => {
                error!("❌ Failed to look up frame '{title}': {}", SyncError::RemoteFetch(e));
                report.errors += 1;
                Position::default()
            }
        }
    }

    async fn attach_assignee_tag(&self, task: &task::Model, card_id: &str, report: &mut SyncReport) {
        let Some(assignee_id) = task.assignee_id.as_deref() else {
            return;
        };
        let tag_id = match self.storage.get_collaborator_by_id(assignee_id).await {
            Ok(Some(collaborator)) => collaborator.tag_id,
            Ok(None) => None,
            Err(e) => {
                warn!("⚠️  Could not look up assignee {assignee_id}: {e}");
                None
            }
        };

        if let Some(tag_id) = tag_id {
            if let Err(e) = self.board.attach_tag(&self.settings.board_id, card_id, &tag_id).await {
                warn!("⚠️  Failed to tag card {card_id}: {}", SyncError::RemoteMutation(e));
                report.errors += 1;
            }
        }
    }

    /// Push changed fields of stale cards.
    pub(super) async fn update_cards(&self, report: &mut SyncReport) -> SyncResult<()> {
        for task in self.storage.get_tasks_with_status(SyncStatus::NeedsUpdate).await? {
            let Some(card_id) = task.miro_card_id.clone() else {
                warn!("⚠️  Task {} was mirrored without a card id, its card cannot be updated", task.id);
                let snapshot = desired_snapshot(&task);
                if let Err(e) = self.storage.mark_task_synced_without_card(&task.id, &snapshot).await {
                    error!("❌ Failed to store task {}: {e}", task.id);
                    report.errors += 1;
                }
                continue;
            };

            let (patch, after) = card_patch(&BoardSnapshot::from_model(&task), &desired_snapshot(&task));
            if !patch.is_empty() {
                if let Err(e) = self.board.update_card(&self.settings.board_id, &card_id, &patch).await {
                    error!("❌ Failed to update card {card_id}: {}", SyncError::RemoteMutation(e));
                    report.card_updates_failed += 1;
                    continue;
                }
            }

            match self.storage.mark_task_synced(&task.id, &card_id, &after).await {
                Ok(_) => report.cards_updated += 1,
                Err(e) => {
                    error!("❌ Card {card_id} updated but task {} could not be marked synced: {e}", task.id);
                    report.errors += 1;
                }
            }
        }

        Ok(())
    }
}
