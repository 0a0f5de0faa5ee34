use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionSession, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{project, task};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Project not found")]
    ProjectNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub project_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub project_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub project_name: String,
}

impl Project {
    fn from_model(model: project::Model) -> Self {
        Self {
            id: model.id,
            project_name: model.project_name,
        }
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<i64, DbErr> {
        let count = project::Entity::find().count(db).await?;
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = project::Entity::find()
            .order_by_asc(project::Column::Id)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Self>, DbErr> {
        let record = project::Entity::find_by_id(id).one(db).await?;
        Ok(record.map(Self::from_model))
    }

    pub async fn create<C: ConnectionTrait>(db: &C, data: &CreateProject) -> Result<Self, DbErr> {
        let active = project::ActiveModel {
            project_name: Set(data.project_name.clone()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        tracing::debug!(project_id = model.id, "Created project");
        Ok(Self::from_model(model))
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i64,
        payload: &UpdateProject,
    ) -> Result<Self, ProjectError> {
        let record = project::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ProjectError::ProjectNotFound)?;

        let mut active: project::ActiveModel = record.into();
        active.project_name = Set(payload.project_name.clone());

        let updated = active.update(db).await?;
        tracing::debug!(project_id = id, "Updated project");
        Ok(Self::from_model(updated))
    }

    /// Deletes the project together with all of its tasks.
    ///
    /// Returns the number of project rows removed, so `0` means the project
    /// did not exist.
    pub async fn delete<C: TransactionTrait>(db: &C, id: i64) -> Result<u64, DbErr> {
        let txn = db.begin().await?;

        let tasks = task::Entity::delete_many()
            .filter(task::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;

        let result = project::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        if result.rows_affected > 0 {
            tracing::info!(
                project_id = id,
                deleted_tasks = tasks.rows_affected,
                "Deleted project"
            );
        }
        Ok(result.rows_affected)
    }
}
