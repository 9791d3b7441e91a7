//! Collaborator repository for database operations.

use std::collections::HashSet;

use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect};

use crate::entities::collaborator;

/// Repository for collaborator-related database operations.
pub struct CollaboratorRepository;

impl CollaboratorRepository {
    pub async fn existing_ids<C>(conn: &C) -> Result<HashSet<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<String> = collaborator::Entity::find()
            .select_only()
            .column(collaborator::Column::Id)
            .into_tuple()
            .all(conn)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Get all collaborators ordered by id.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<collaborator::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        collaborator::Entity::find()
            .order_by_asc(collaborator::Column::Id)
            .all(conn)
            .await
    }

    pub async fn get_by_id<C>(conn: &C, id: &str) -> Result<Option<collaborator::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        collaborator::Entity::find_by_id(id.to_string()).one(conn).await
    }

    pub async fn insert<C>(conn: &C, collaborator: collaborator::ActiveModel) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        collaborator::Entity::insert(collaborator)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    pub async fn update<C>(conn: &C, collaborator: collaborator::ActiveModel) -> Result<collaborator::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        collaborator.update(conn).await
    }
}
