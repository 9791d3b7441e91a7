use log::{error, info};

use super::{SyncReport, SyncService};
use crate::error::{SyncError, SyncResult};

impl SyncService {
    /// Pull project members and cache the ones seen for the first time.
    pub(super) async fn sync_collaborators(&self, report: &mut SyncReport) -> SyncResult<()> {
        let collaborators = match self.task_source.fetch_collaborators(&self.settings.project_id).await {
            Ok(collaborators) => {
                info!("✅ Fetched {} collaborators from {}", collaborators.len(), self.task_source.source_type());
                collaborators
            }
            Err(e) => {
                error!("❌ Failed to fetch collaborators: {}", SyncError::RemoteFetch(e));
                report.errors += 1;
                Vec::new()
            }
        };

        report.collaborators_inserted = self
            .storage
            .insert_collaborators_if_absent(&collaborators, &self.colors)
            .await?;
        info!("✅ Stored {} new collaborators", report.collaborators_inserted);
        Ok(())
    }

    /// Bring every task's assignee name and color in line with the collaborators table.
    pub(super) async fn refresh_assignees(&self) -> SyncResult<()> {
        let touched = self.storage.refresh_assignee_display().await?;
        if touched > 0 {
            info!("🎨 Refreshed assignee display on {touched} tasks");
        }
        Ok(())
    }
}
