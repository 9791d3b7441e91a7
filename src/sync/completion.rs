use log::{debug, error, info};

use super::{SyncReport, SyncService};
use crate::error::{SyncError, SyncResult};

impl SyncService {
    /// Close every task whose card was dragged into the done frame.
    ///
    /// Tasks already completed locally are skipped so the task source never
    /// sees a second close for the same task.
    pub(super) async fn complete_done_tasks(&self, report: &mut SyncReport) -> SyncResult<()> {
        let frame = &self.settings.layout.done_frame;
        let items = match self.board.list_items_in_frame(&self.settings.board_id, frame).await {
            Ok(items) => items,
            Err(e) => {
                error!("❌ Failed to list items in frame '{frame}': {}", SyncError::RemoteFetch(e));
                report.errors += 1;
                return Ok(());
            }
        };
        debug!("{} items in frame '{frame}'", items.len());

        for item in items {
            let task = match self.storage.get_task_by_card_id(&item.id).await {
                Ok(Some(task)) => task,
                Ok(None) => continue,
                Err(e) => {
                    error!("❌ Failed to look up card {}: {e}", item.id);
                    report.errors += 1;
                    continue;
                }
            };
            if task.is_completed {
                debug!("Task {} already completed", task.id);
                continue;
            }

            if let Err(e) = self.task_source.close_task(&task.id).await {
                error!("❌ Failed to close task {}: {}", task.id, SyncError::RemoteMutation(e));
                report.errors += 1;
                continue;
            }

            if let Err(e) = self.storage.mark_task_completed(&task.id).await {
                error!("❌ Task {} closed but not marked completed locally: {e}", task.id);
                report.errors += 1;
                continue;
            }
            report.tasks_completed += 1;
            info!("✅ Closed task {} ({})", task.id, task.content);
        }

        Ok(())
    }
}
