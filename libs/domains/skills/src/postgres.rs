use crate::error::{SkillError, SkillResult};
use crate::models::Skill;
use crate::repository::SkillRepository;
use async_trait::async_trait;
use axum_helpers::Pagination;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};
use uuid::Uuid;

/// PostgreSQL implementation of SkillRepository using SeaORM
#[derive(Clone)]
pub struct PostgresSkillRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresSkillRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct SkillRow {
    id: Uuid,
    name: String,
    category: String,
    description: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Skill {
            id: row.id,
            name: row.name,
            category: row.category,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn write_error(e: DbErr, name: &str) -> SkillError {
    let err_str = e.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        SkillError::DuplicateName(name.to_string())
    } else {
        SkillError::Internal(format!("Database error: {}", e))
    }
}

fn db_error(e: DbErr) -> SkillError {
    SkillError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn create(&self, skill: Skill) -> SkillResult<Skill> {
        let sql = r#"
            INSERT INTO skills (id, name, category, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                skill.id.into(),
                skill.name.clone().into(),
                skill.category.clone().into(),
                skill.description.clone().into(),
                skill.created_at.into(),
                skill.updated_at.into(),
            ],
        );

        let row = SkillRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| write_error(e, &skill.name))?
            .ok_or_else(|| SkillError::Internal("Failed to create skill".to_string()))?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> SkillResult<Option<Skill>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM skills WHERE id = $1",
            [id.into()],
        );

        let row = SkillRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, page: Pagination) -> SkillResult<Vec<Skill>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM skills ORDER BY created_at, id OFFSET $1 LIMIT $2",
            [page.offset().into(), page.limit().into()],
        );

        let rows = SkillRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_category(&self, category: &str) -> SkillResult<Vec<Skill>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM skills WHERE category = $1 ORDER BY created_at, id",
            [category.into()],
        );

        let rows = SkillRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, skill: Skill) -> SkillResult<Skill> {
        let sql = r#"
            UPDATE skills
            SET name = $2, category = $3, description = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                skill.id.into(),
                skill.name.clone().into(),
                skill.category.clone().into(),
                skill.description.clone().into(),
                skill.updated_at.into(),
            ],
        );

        SkillRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| write_error(e, &skill.name))?
            .map(Into::into)
            .ok_or(SkillError::NotFound(skill.id))
    }

    async fn delete(&self, id: Uuid) -> SkillResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM skills WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
