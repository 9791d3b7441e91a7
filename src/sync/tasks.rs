use log::{debug, error, info};

use super::{SyncReport, SyncService};
use crate::error::{SyncError, SyncResult};
use crate::storage::TaskUpdate;

impl SyncService {
    /// Cache new remote tasks and fold remote edits into existing rows.
    pub(super) async fn sync_tasks(&self, report: &mut SyncReport) -> SyncResult<()> {
        let tasks = match self.task_source.fetch_tasks(&self.settings.project_id).await {
            Ok(tasks) => {
                info!("✅ Fetched {} tasks from {}", tasks.len(), self.task_source.source_type());
                tasks
            }
            Err(e) => {
                error!("❌ Failed to fetch tasks: {}", SyncError::RemoteFetch(e));
                report.errors += 1;
                Vec::new()
            }
        };

        report.tasks_inserted = self.storage.insert_tasks_if_absent(&tasks).await?;
        info!("✅ Stored {} new tasks", report.tasks_inserted);

        for remote in &tasks {
            let cached = match self.storage.get_task_by_id(&remote.remote_id).await {
                Ok(Some(cached)) => cached,
                Ok(None) => continue,
                Err(e) => {
                    error!("❌ Failed to read cached task {}: {e}", remote.remote_id);
                    report.errors += 1;
                    continue;
                }
            };

            let changes = TaskUpdate::between(&cached, remote);
            if changes.is_empty() {
                continue;
            }

            debug!("Task {} changed remotely: {:?}", remote.remote_id, changes);
            match self.storage.update_task(&remote.remote_id, changes).await {
                Ok(_) => report.tasks_changed += 1,
                Err(e) => {
                    error!("❌ Failed to update cached task {}: {e}", remote.remote_id);
                    report.errors += 1;
                }
            }
        }

        Ok(())
    }
}
