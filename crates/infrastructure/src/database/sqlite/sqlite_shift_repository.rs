use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use staffing_core::{StaffingError, StaffingResult};
use staffing_domain::entities::{Attendance, Shift, ShiftCheckpoint, Site, WorkerShift};
use staffing_domain::repositories::ShiftRepository;
use staffing_domain::value_objects::GeoPoint;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::database::mapping::{MappingHelpers, ATTENDANCE_COLUMNS, SHIFT_COLUMNS, SITE_COLUMNS};

/// 班次与考勤仓储
pub struct SqliteShiftRepository {
    pool: SqlitePool,
}

impl SqliteShiftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_shift(conn: &mut SqliteConnection, id: i64) -> StaffingResult<Option<Shift>> {
        let row = sqlx::query(&format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(MappingHelpers::row_to_shift).transpose()
    }

    async fn fetch_attendance(
        conn: &mut SqliteConnection,
        shift_id: i64,
    ) -> StaffingResult<Option<Attendance>> {
        let row = sqlx::query(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE shift_id = $1"
        ))
        .bind(shift_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(MappingHelpers::row_to_attendance).transpose()
    }
}

#[async_trait]
impl ShiftRepository for SqliteShiftRepository {
    async fn list(&self) -> StaffingResult<Vec<Shift>> {
        let rows = sqlx::query(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(MappingHelpers::row_to_shift).collect()
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<Shift>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_shift(&mut conn, id).await
    }

    async fn list_for_assignment(&self, assignment_id: i64) -> StaffingResult<Vec<Shift>> {
        let rows = sqlx::query(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts WHERE assignment_id = $1 ORDER BY start_planned ASC, id ASC"
        ))
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(MappingHelpers::row_to_shift).collect()
    }

    #[instrument(skip(self, point), fields(shift_id = id))]
    async fn check_in(
        &self,
        id: i64,
        now: DateTime<Utc>,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint> {
        let mut tx = self.pool.begin().await?;

        // 已开始（IN_PROGRESS 或已有 start_actual）的班次不再转换；
        // 未签到就签退的班次在补签到时回到 IN_PROGRESS
        let transitioned = sqlx::query(
            r#"
            UPDATE shifts SET status = 'IN_PROGRESS', start_actual = $1
            WHERE id = $2 AND NOT (status = 'IN_PROGRESS' OR start_actual IS NOT NULL)
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        let shift = Self::fetch_shift(&mut tx, id)
            .await?
            .ok_or(StaffingError::ShiftNotFound { id })?;

        if transitioned || point.is_some() {
            sqlx::query(
                r#"
                INSERT INTO attendance (shift_id, in_lat, in_lng, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (shift_id) DO UPDATE SET
                    in_lat = excluded.in_lat,
                    in_lng = excluded.in_lng
                WHERE excluded.in_lat IS NOT NULL
                  AND excluded.in_lng IS NOT NULL
                  AND (attendance.in_lat IS NULL OR attendance.in_lng IS NULL)
                "#,
            )
            .bind(id)
            .bind(point.map(|p| p.lat))
            .bind(point.map(|p| p.lng))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        let attendance = Self::fetch_attendance(&mut tx, id).await?;
        tx.commit().await?;

        debug!("班次 {} 签到处理完成，状态 {}", id, shift.status);
        Ok(ShiftCheckpoint {
            shift,
            attendance,
            transitioned,
        })
    }

    #[instrument(skip(self, point), fields(shift_id = id))]
    async fn check_out(
        &self,
        id: i64,
        now: DateTime<Utc>,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint> {
        let mut tx = self.pool.begin().await?;

        // 未签到的班次也允许直接签退
        let transitioned = sqlx::query(
            r#"
            UPDATE shifts SET status = 'COMPLETED', end_actual = $1
            WHERE id = $2 AND NOT (status = 'COMPLETED' AND end_actual IS NOT NULL)
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        let shift = Self::fetch_shift(&mut tx, id)
            .await?
            .ok_or(StaffingError::ShiftNotFound { id })?;

        if transitioned || point.is_some() {
            sqlx::query(
                r#"
                INSERT INTO attendance (shift_id, out_lat, out_lng, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (shift_id) DO UPDATE SET
                    out_lat = excluded.out_lat,
                    out_lng = excluded.out_lng
                WHERE excluded.out_lat IS NOT NULL
                  AND excluded.out_lng IS NOT NULL
                "#,
            )
            .bind(id)
            .bind(point.map(|p| p.lat))
            .bind(point.map(|p| p.lng))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        let attendance = Self::fetch_attendance(&mut tx, id).await?;
        tx.commit().await?;

        debug!("班次 {} 签退处理完成，状态 {}", id, shift.status);
        Ok(ShiftCheckpoint {
            shift,
            attendance,
            transitioned,
        })
    }

    async fn list_for_worker(&self, worker_id: i64) -> StaffingResult<Vec<WorkerShift>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            r#"
            SELECT s.id, s.assignment_id, s.start_planned, s.end_planned, s.start_actual,
                   s.end_actual, s.status, s.auto_created, s.created_at,
                   wo.site_id AS site_id
            FROM shifts s
            JOIN assignments a ON a.id = s.assignment_id
            JOIN work_orders wo ON wo.id = a.work_order_id
            WHERE a.worker_id = $1
            ORDER BY s.start_planned ASC, s.id ASC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&mut *conn)
        .await?;

        let mut sites: HashMap<i64, Option<Site>> = HashMap::new();
        let mut shifts = Vec::with_capacity(rows.len());

        for row in &rows {
            let shift = MappingHelpers::row_to_shift(row)?;
            let site_id: Option<i64> = sqlx::Row::try_get(row, "site_id")?;

            let site = match site_id {
                Some(site_id) => {
                    if !sites.contains_key(&site_id) {
                        let site_row = sqlx::query(&format!(
                            "SELECT {SITE_COLUMNS} FROM sites WHERE id = $1"
                        ))
                        .bind(site_id)
                        .fetch_optional(&mut *conn)
                        .await?;
                        let site = site_row
                            .as_ref()
                            .map(MappingHelpers::row_to_site)
                            .transpose()?;
                        sites.insert(site_id, site);
                    }
                    sites.get(&site_id).cloned().flatten()
                }
                None => None,
            };

            let attendance = Self::fetch_attendance(&mut conn, shift.id).await?;

            shifts.push(WorkerShift {
                shift,
                site,
                attendance,
            });
        }

        Ok(shifts)
    }
}
