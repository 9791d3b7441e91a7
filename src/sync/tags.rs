use log::{debug, error, info, warn};

use super::{SyncReport, SyncService};
use crate::backend::BoardTag;
use crate::error::{SyncError, SyncResult};
use crate::utils::color::{color_name_to_hex, TagColor};

/// Hands out tag colors: unused palette entries first, then the used list again
/// from the front.
#[derive(Debug, Clone)]
pub struct PalettePicker {
    used: Vec<TagColor>,
    reuse_at: usize,
}

impl PalettePicker {
    pub fn new(used: Vec<TagColor>) -> Self {
        Self { used, reuse_at: 0 }
    }

    /// Record a color as taken without drawing it from the palette.
    pub fn claim(&mut self, color: TagColor) {
        if !self.used.contains(&color) {
            self.used.push(color);
        }
    }

    pub fn next_color(&mut self) -> TagColor {
        if let Some(free) = TagColor::PALETTE.into_iter().find(|c| !self.used.contains(c)) {
            self.used.push(free);
            return free;
        }

        let color = self.used[self.reuse_at % self.used.len()];
        self.reuse_at += 1;
        color
    }
}

fn matching_tag<'a>(tags: &'a [BoardTag], first_name: &str) -> Option<&'a BoardTag> {
    let wanted = first_name.trim().to_lowercase();
    tags.iter().find(|t| t.title.trim().to_lowercase() == wanted)
}

impl SyncService {
    /// Bind each cached collaborator to the board tag titled with their first name.
    ///
    /// Existing tags win: their color and id overwrite the cached values,
    /// except for a color pinned by a hex override, which only gets the tag id.
    /// Collaborators without a pinned color or a tag get a new tag in the next
    /// free palette color.
    pub(super) async fn reconcile_tags(&self, report: &mut SyncReport) -> SyncResult<()> {
        let mut tags = match self.board.list_tags(&self.settings.board_id).await {
            Ok(tags) => {
                info!("✅ Fetched {} tags from board", tags.len());
                tags
            }
            Err(e) => {
                error!("❌ Failed to fetch tags: {}", SyncError::RemoteFetch(e));
                report.errors += 1;
                return Ok(());
            }
        };

        let mut picker = PalettePicker::new(tags.iter().filter_map(BoardTag::color).collect());

        for collaborator in self.storage.all_collaborators().await? {
            if collaborator.first_name.is_empty() {
                warn!("⚠️  Collaborator {} has no usable first name, skipping tag", collaborator.id);
                continue;
            }
            let pinned = self.colors.pinned_hex(&collaborator.id);

            if let Some(tag) = matching_tag(&tags, &collaborator.first_name) {
                let hex_color = pinned.unwrap_or_else(|| color_name_to_hex(&tag.fill_color));
                let color_matches = collaborator.hex_color.as_deref() == Some(hex_color.as_str());
                let tag_matches = collaborator.tag_id.as_deref() == Some(tag.id.as_str());
                if color_matches && tag_matches {
                    continue;
                }

                debug!("Tag {} differs from cache for {}", tag.id, collaborator.first_name);
                let tag_id = tag.id.clone();
                match self.storage.update_collaborator_tag(collaborator, &hex_color, &tag_id).await {
                    Ok(_) => report.tags_refreshed += 1,
                    Err(e) => {
                        error!("❌ Failed to store tag {tag_id}: {e}");
                        report.errors += 1;
                    }
                }
                continue;
            }

            if pinned.is_some() {
                debug!("{} has a pinned color, not creating a tag", collaborator.first_name);
                continue;
            }

            let color = match self.colors.override_tag_color(&collaborator.id) {
                Some(color) => {
                    picker.claim(color);
                    color
                }
                None => picker.next_color(),
            };

            let tag = match self.board.create_tag(&self.settings.board_id, &collaborator.first_name, color).await {
                Ok(tag) => tag,
                Err(e) => {
                    error!(
                        "❌ Failed to create tag for {}: {}",
                        collaborator.first_name,
                        SyncError::RemoteMutation(e)
                    );
                    report.errors += 1;
                    continue;
                }
            };

            info!("🏷️  Created tag {} ({}) for {}", tag.id, color.as_str(), collaborator.first_name);
            let tag_id = tag.id.clone();
            tags.push(tag);
            report.tags_created += 1;
            if let Err(e) = self.storage.update_collaborator_tag(collaborator, color.hex(), &tag_id).await {
                error!("❌ Tag {tag_id} created but could not be stored: {e}");
                report.errors += 1;
            }
        }

        Ok(())
    }
}
