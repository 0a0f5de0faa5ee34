use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{project, task};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Task not found")]
    TaskNotFound,
    #[error("Project not found")]
    ProjectNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub due_date: NaiveDateTime,
    pub project_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub task_name: String,
    pub due_date: NaiveDateTime,
    pub project_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub task_name: String,
    pub due_date: NaiveDateTime,
    pub project_id: i64,
}

impl Task {
    fn from_model(model: task::Model) -> Self {
        Self {
            id: model.id,
            task_name: model.task_name,
            due_date: model.due_date,
            project_id: model.project_id,
        }
    }

    async fn ensure_project_exists<C: ConnectionTrait>(
        db: &C,
        project_id: i64,
    ) -> Result<(), TaskError> {
        match project::Entity::find_by_id(project_id).one(db).await? {
            Some(_) => Ok(()),
            None => Err(TaskError::ProjectNotFound),
        }
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Self>, DbErr> {
        let record = task::Entity::find_by_id(id).one(db).await?;
        Ok(record.map(Self::from_model))
    }

    /// Tasks of one project, soonest due first.
    pub async fn find_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        let records = task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_id))
            .order_by_asc(task::Column::DueDate)
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn create<C: ConnectionTrait>(db: &C, data: &CreateTask) -> Result<Self, TaskError> {
        Self::ensure_project_exists(db, data.project_id).await?;

        let active = task::ActiveModel {
            task_name: Set(data.task_name.clone()),
            due_date: Set(data.due_date),
            project_id: Set(data.project_id),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        tracing::debug!(
            task_id = model.id,
            project_id = model.project_id,
            "Created task"
        );
        Ok(Self::from_model(model))
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i64,
        payload: &UpdateTask,
    ) -> Result<Self, TaskError> {
        let record = task::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(TaskError::TaskNotFound)?;
        if record.project_id != payload.project_id {
            Self::ensure_project_exists(db, payload.project_id).await?;
        }

        let mut active: task::ActiveModel = record.into();
        active.task_name = Set(payload.task_name.clone());
        active.due_date = Set(payload.due_date);
        active.project_id = Set(payload.project_id);

        let updated = active.update(db).await?;
        tracing::debug!(task_id = id, project_id = updated.project_id, "Updated task");
        Ok(Self::from_model(updated))
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, DbErr> {
        let result = task::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(result.rows_affected)
    }
}
