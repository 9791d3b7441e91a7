use log::debug;
use sea_orm::{ActiveValue, IntoActiveModel};

use super::LocalStorage;
use crate::backend::SourceCollaborator;
use crate::entities::collaborator;
use crate::error::SyncResult;
use crate::repositories::CollaboratorRepository;
use crate::utils::color::ColorAssigner;
use crate::utils::names;

impl LocalStorage {
    /// Insert every collaborator not cached yet, in one transaction.
    ///
    /// Returns the number of rows inserted. Existing rows are never touched.
    pub async fn insert_collaborators_if_absent(
        &self,
        collaborators: &[SourceCollaborator],
        colors: &ColorAssigner,
    ) -> SyncResult<usize> {
        let txn = self.begin().await?;
        let mut existing = CollaboratorRepository::existing_ids(&txn).await?;
        let mut inserted = 0;

        for source in collaborators {
            if !existing.insert(source.remote_id.clone()) {
                continue;
            }
            CollaboratorRepository::insert(&txn, Self::new_collaborator(source, colors)).await?;
            inserted += 1;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    /// Insert a single collaborator unless one with the same id is cached.
    pub async fn upsert_collaborator_if_absent(
        &self,
        source: &SourceCollaborator,
        colors: &ColorAssigner,
    ) -> SyncResult<bool> {
        Ok(self.insert_collaborators_if_absent(std::slice::from_ref(source), colors).await? == 1)
    }

    fn new_collaborator(source: &SourceCollaborator, colors: &ColorAssigner) -> collaborator::ActiveModel {
        collaborator::ActiveModel {
            id: ActiveValue::Set(source.remote_id.clone()),
            name: ActiveValue::Set(source.name.clone()),
            email: ActiveValue::Set(source.email.clone()),
            first_name: ActiveValue::Set(names::first_name(&source.name)),
            hex_color: ActiveValue::Set(Some(colors.color_for(&source.name, Some(&source.remote_id)))),
            tag_id: ActiveValue::Set(None),
        }
    }

    pub async fn get_collaborator_by_id(&self, id: &str) -> SyncResult<Option<collaborator::Model>> {
        Ok(CollaboratorRepository::get_by_id(&self.conn, id).await?)
    }

    pub async fn all_collaborators(&self) -> SyncResult<Vec<collaborator::Model>> {
        Ok(CollaboratorRepository::get_all(&self.conn).await?)
    }

    /// Overwrite a collaborator's color and tag binding with the board's values.
    pub async fn update_collaborator_tag(
        &self,
        collaborator: collaborator::Model,
        hex_color: &str,
        tag_id: &str,
    ) -> SyncResult<collaborator::Model> {
        debug!("Binding {} to tag {tag_id} ({hex_color})", collaborator.first_name);
        let mut active = collaborator.into_active_model();
        active.hex_color = ActiveValue::Set(Some(hex_color.to_string()));
        active.tag_id = ActiveValue::Set(Some(tag_id.to_string()));
        Ok(CollaboratorRepository::update(&self.conn, active).await?)
    }
}
