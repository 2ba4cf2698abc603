use crate::error::{LearningError, LearningResult};
use crate::models::{LearningPath, LearningStep};
use crate::repository::LearningRepository;
use async_trait::async_trait;
use sea_orm::{DbBackend, DbErr, FromQueryResult, Statement};
use uuid::Uuid;

/// PostgreSQL implementation of LearningRepository using SeaORM
#[derive(Clone)]
pub struct PostgresLearningRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresLearningRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct PathRow {
    id: Uuid,
    title: String,
    employee_id: Uuid,
    assigned_by: Uuid,
    assigned_date: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<PathRow> for LearningPath {
    fn from(row: PathRow) -> Self {
        LearningPath {
            id: row.id,
            title: row.title,
            employee_id: row.employee_id,
            assigned_by: row.assigned_by,
            assigned_date: row.assigned_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct StepRow {
    id: Uuid,
    learning_path_id: Uuid,
    title: String,
    description: Option<String>,
    skill_type: String,
    completed: bool,
    completed_date: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<StepRow> for LearningStep {
    fn from(row: StepRow) -> Self {
        LearningStep {
            id: row.id,
            learning_path_id: row.learning_path_id,
            title: row.title,
            description: row.description,
            skill_type: row.skill_type,
            completed: row.completed,
            completed_date: row.completed_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn db_error(e: DbErr) -> LearningError {
    LearningError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl LearningRepository for PostgresLearningRepository {
    async fn create_path(&self, path: LearningPath) -> LearningResult<LearningPath> {
        let sql = r#"
            INSERT INTO learning_paths (id, title, employee_id, assigned_by, assigned_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                path.id.into(),
                path.title.clone().into(),
                path.employee_id.into(),
                path.assigned_by.into(),
                path.assigned_date.into(),
                path.created_at.into(),
                path.updated_at.into(),
            ],
        );

        let row = PathRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| LearningError::Internal("Failed to create learning path".to_string()))?;

        Ok(row.into())
    }

    async fn get_path(&self, id: Uuid) -> LearningResult<Option<LearningPath>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM learning_paths WHERE id = $1",
            [id.into()],
        );

        let row = PathRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_paths_for_employee(&self, employee_id: Uuid) -> LearningResult<Vec<LearningPath>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM learning_paths WHERE employee_id = $1 ORDER BY assigned_date, id",
            [employee_id.into()],
        );

        let rows = PathRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_step(&self, step: LearningStep) -> LearningResult<LearningStep> {
        let sql = r#"
            INSERT INTO learning_steps
                (id, learning_path_id, title, description, skill_type, completed, completed_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                step.id.into(),
                step.learning_path_id.into(),
                step.title.clone().into(),
                step.description.clone().into(),
                step.skill_type.clone().into(),
                step.completed.into(),
                step.completed_date.into(),
                step.created_at.into(),
                step.updated_at.into(),
            ],
        );

        let row = StepRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| LearningError::Internal("Failed to create learning step".to_string()))?;

        Ok(row.into())
    }

    async fn get_step(&self, id: Uuid) -> LearningResult<Option<LearningStep>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM learning_steps WHERE id = $1",
            [id.into()],
        );

        let row = StepRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_steps(&self, learning_path_id: Uuid) -> LearningResult<Vec<LearningStep>> {
        // v7 ids sort by creation time
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM learning_steps WHERE learning_path_id = $1 ORDER BY id",
            [learning_path_id.into()],
        );

        let rows = StepRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_step(&self, step: LearningStep) -> LearningResult<LearningStep> {
        let sql = r#"
            UPDATE learning_steps
            SET title = $2, description = $3, completed = $4, completed_date = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                step.id.into(),
                step.title.clone().into(),
                step.description.clone().into(),
                step.completed.into(),
                step.completed_date.into(),
                step.updated_at.into(),
            ],
        );

        StepRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Into::into)
            .ok_or(LearningError::StepNotFound(step.id))
    }
}
