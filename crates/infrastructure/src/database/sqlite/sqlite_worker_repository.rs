use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use staffing_core::{StaffingError, StaffingResult};
use staffing_domain::entities::{NewWorker, Worker};
use staffing_domain::repositories::WorkerDirectory;
use tracing::debug;

use crate::database::mapping::{MappingHelpers, WORKER_COLUMNS};

pub struct SqliteWorkerRepository {
    pool: SqlitePool,
}

impl SqliteWorkerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkerDirectory for SqliteWorkerRepository {
    async fn create(&self, worker: &NewWorker) -> StaffingResult<Worker> {
        let skills = MappingHelpers::string_list_to_json(&worker.skills)?;
        let languages = MappingHelpers::string_list_to_json(&worker.languages)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO workers
                (user_id, name, skills, languages, base_rate, rate_unit,
                 radius_km, rating, strikes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING {WORKER_COLUMNS}
            "#
        ))
        .bind(worker.user_id)
        .bind(&worker.name)
        .bind(skills)
        .bind(languages)
        .bind(worker.base_rate)
        .bind(worker.rate_unit)
        .bind(worker.radius_km)
        .bind(worker.rating)
        .bind(worker.strikes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Err(StaffingError::WorkerAlreadyLinked {
                user_id: worker.user_id.unwrap_or_default(),
            });
        };

        let created = MappingHelpers::row_to_worker(&row)?;
        debug!("创建工人档案成功: {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<Worker>> {
        let row = sqlx::query(&format!("SELECT {WORKER_COLUMNS} FROM workers WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(MappingHelpers::row_to_worker).transpose()
    }

    async fn list(&self) -> StaffingResult<Vec<Worker>> {
        let rows = sqlx::query(&format!("SELECT {WORKER_COLUMNS} FROM workers ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(MappingHelpers::row_to_worker).collect()
    }

    async fn list_by_role(&self, role: &str) -> StaffingResult<Vec<Worker>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {WORKER_COLUMNS} FROM workers
            WHERE EXISTS (SELECT 1 FROM json_each(workers.skills) WHERE json_each.value = $1)
            ORDER BY id ASC
            "#
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        debug!("角色 {} 共有 {} 名工人", role, rows.len());
        rows.iter().map(MappingHelpers::row_to_worker).collect()
    }

    async fn existing_ids(&self, ids: &[i64]) -> StaffingResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id FROM workers WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let existing = builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await?;

        Ok(existing)
    }

    async fn find_by_user(&self, user_id: i64) -> StaffingResult<Option<Worker>> {
        let row = sqlx::query(&format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(MappingHelpers::row_to_worker).transpose()
    }
}
