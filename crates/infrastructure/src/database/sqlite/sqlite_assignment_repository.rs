use async_trait::async_trait;
use sqlx::SqlitePool;
use staffing_core::StaffingResult;
use staffing_domain::entities::Assignment;
use staffing_domain::repositories::AssignmentRepository;

use crate::database::mapping::{MappingHelpers, ASSIGNMENT_COLUMNS};

/// 派工只由接受邀约的事务写入，这里只提供读取
pub struct SqliteAssignmentRepository {
    pool: SqlitePool,
}

impl SqliteAssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for SqliteAssignmentRepository {
    async fn list(&self) -> StaffingResult<Vec<Assignment>> {
        let rows = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(MappingHelpers::row_to_assignment).collect()
    }

    async fn find_by_pair(
        &self,
        work_order_id: i64,
        worker_id: i64,
    ) -> StaffingResult<Option<Assignment>> {
        let row = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE work_order_id = $1 AND worker_id = $2"
        ))
        .bind(work_order_id)
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(MappingHelpers::row_to_assignment).transpose()
    }
}
