use crate::error::{ScoreError, ScoreResult};
use crate::models::Score;
use crate::repository::ScoreRepository;
use async_trait::async_trait;
use axum_helpers::Pagination;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};
use uuid::Uuid;

/// PostgreSQL implementation of ScoreRepository using SeaORM
#[derive(Clone)]
pub struct PostgresScoreRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresScoreRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ScoreRow {
    id: Uuid,
    employee_id: Uuid,
    skill_id: Uuid,
    trainer_id: Uuid,
    score: f64,
    feedback: Option<String>,
    date: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<ScoreRow> for Score {
    fn from(row: ScoreRow) -> Self {
        Score {
            id: row.id,
            employee_id: row.employee_id,
            skill_id: row.skill_id,
            trainer_id: row.trainer_id,
            score: row.score,
            feedback: row.feedback,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn db_error(e: DbErr) -> ScoreError {
    ScoreError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl ScoreRepository for PostgresScoreRepository {
    async fn create(&self, score: Score) -> ScoreResult<Score> {
        let sql = r#"
            INSERT INTO scores (id, employee_id, skill_id, trainer_id, score, feedback, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                score.id.into(),
                score.employee_id.into(),
                score.skill_id.into(),
                score.trainer_id.into(),
                score.score.into(),
                score.feedback.clone().into(),
                score.date.into(),
                score.created_at.into(),
                score.updated_at.into(),
            ],
        );

        let row = ScoreRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ScoreError::Internal("Failed to create score".to_string()))?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ScoreResult<Option<Score>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM scores WHERE id = $1",
            [id.into()],
        );

        let row = ScoreRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, page: Pagination) -> ScoreResult<Vec<Score>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM scores ORDER BY date, id OFFSET $1 LIMIT $2",
            [page.offset().into(), page.limit().into()],
        );

        let rows = ScoreRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> ScoreResult<Vec<Score>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM scores WHERE employee_id = $1 ORDER BY date, id",
            [employee_id.into()],
        );

        let rows = ScoreRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, score: Score) -> ScoreResult<Score> {
        let sql = r#"
            UPDATE scores
            SET score = $2, feedback = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                score.id.into(),
                score.score.into(),
                score.feedback.clone().into(),
                score.updated_at.into(),
            ],
        );

        ScoreRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Into::into)
            .ok_or(ScoreError::NotFound(score.id))
    }

    async fn delete(&self, id: Uuid) -> ScoreResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM scores WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
