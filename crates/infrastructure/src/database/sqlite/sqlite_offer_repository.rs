use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use staffing_core::{StaffingError, StaffingResult};
use staffing_domain::entities::{
    AcceptedOffer, Offer, OfferBatch, SendOutcome, WorkOrderWithSite, WorkerOffer,
};
use staffing_domain::repositories::OfferRepository;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use crate::database::mapping::{
    MappingHelpers, ASSIGNMENT_COLUMNS, OFFER_COLUMNS, SHIFT_COLUMNS, SITE_COLUMNS,
    WORKER_COLUMNS, WORK_ORDER_COLUMNS,
};

/// 邀约仓储
///
/// 发送、接受、拒绝各自在一个事务内完成，且事务的第一条语句都是写操作，
/// SQLite 因此在任何读取之前就持有写锁，并发写者被整体串行化。
pub struct SqliteOfferRepository {
    pool: SqlitePool,
}

impl SqliteOfferRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_offer(conn: &mut SqliteConnection, id: i64) -> StaffingResult<Option<Offer>> {
        let row = sqlx::query(&format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(MappingHelpers::row_to_offer).transpose()
    }
}

#[async_trait]
impl OfferRepository for SqliteOfferRepository {
    async fn list(&self) -> StaffingResult<Vec<Offer>> {
        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(MappingHelpers::row_to_offer).collect()
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<Offer>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_offer(&mut conn, id).await
    }

    #[instrument(skip(self, batch), fields(
        work_order_id = batch.work_order_id,
        workers = batch.worker_ids.len(),
    ))]
    async fn send_batch(&self, batch: &OfferBatch) -> StaffingResult<SendOutcome> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut outcome = SendOutcome::default();

        for worker_id in &batch.worker_ids {
            let result = sqlx::query(
                r#"
                INSERT INTO offers (work_order_id, worker_id, status, expires_at, created_at)
                SELECT $1, $2, 'SENT', $3, $4
                WHERE NOT EXISTS (
                    SELECT 1 FROM offers
                    WHERE work_order_id = $1
                      AND worker_id = $2
                      AND ($5 = 0 OR status IN ('SENT', 'ACCEPTED'))
                )
                "#,
            )
            .bind(batch.work_order_id)
            .bind(*worker_id)
            .bind(batch.expires_at)
            .bind(now)
            .bind(batch.resend_after_terminal)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 1 {
                outcome.created += 1;
            } else {
                debug!("工人 {} 已持有该工单的邀约，跳过", worker_id);
                outcome.skipped += 1;
            }
        }

        tx.commit().await?;
        Ok(outcome)
    }

    #[instrument(skip(self), fields(offer_id = id))]
    async fn accept(
        &self,
        id: i64,
        now: DateTime<Utc>,
        enforce_expiry: bool,
    ) -> StaffingResult<AcceptedOffer> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE offers SET status = 'ACCEPTED' WHERE id = $1 AND status = 'SENT'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let offer = Self::fetch_offer(&mut tx, id)
            .await?
            .ok_or(StaffingError::OfferNotFound { id })?;

        if updated == 0 {
            return Err(StaffingError::OfferNotSent {
                id,
                status: offer.status.to_string(),
            });
        }

        // 返回错误时 tx 被丢弃并回滚，邀约保持 SENT
        if enforce_expiry && offer.is_expired_at(now) {
            return Err(StaffingError::OfferExpired { id });
        }

        let work_order_row = sqlx::query(&format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = $1"
        ))
        .bind(offer.work_order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StaffingError::WorkOrderNotFound {
            id: offer.work_order_id,
        })?;
        let work_order = MappingHelpers::row_to_work_order(&work_order_row)?;

        let worker_row = sqlx::query(&format!("SELECT {WORKER_COLUMNS} FROM workers WHERE id = $1"))
            .bind(offer.worker_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StaffingError::WorkerNotFound {
                id: offer.worker_id,
            })?;
        let worker = MappingHelpers::row_to_worker(&worker_row)?;

        let assignment_created = sqlx::query(
            r#"
            INSERT INTO assignments (work_order_id, worker_id, is_final, created_at)
            VALUES ($1, $2, 1, $3)
            ON CONFLICT (work_order_id, worker_id) DO NOTHING
            "#,
        )
        .bind(offer.work_order_id)
        .bind(offer.worker_id)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        let assignment_row = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE work_order_id = $1 AND worker_id = $2"
        ))
        .bind(offer.work_order_id)
        .bind(offer.worker_id)
        .fetch_one(&mut *tx)
        .await?;
        let assignment = MappingHelpers::row_to_assignment(&assignment_row)?;

        let window = work_order.shift_window();
        let shift_created = sqlx::query(
            r#"
            INSERT INTO shifts (assignment_id, start_planned, end_planned, status, auto_created, created_at)
            VALUES ($1, $2, $3, 'PLANNED', 1, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(assignment.id)
        .bind(window.start)
        .bind(window.end)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        let shift_row = sqlx::query(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts WHERE assignment_id = $1 AND auto_created = 1"
        ))
        .bind(assignment.id)
        .fetch_one(&mut *tx)
        .await?;
        let shift = MappingHelpers::row_to_shift(&shift_row)?;

        tx.commit().await?;

        if assignment_created {
            info!(
                "新建派工 {}: 工单 {} 工人 {}",
                assignment.id, assignment.work_order_id, assignment.worker_id
            );
        }
        if shift_created {
            debug!(
                "新建班次 {}: {} ~ {}",
                shift.id, shift.start_planned, shift.end_planned
            );
        }

        Ok(AcceptedOffer {
            offer,
            work_order,
            worker,
            assignment,
            shift,
        })
    }

    async fn reject(&self, id: i64, strict: bool) -> StaffingResult<Offer> {
        let sql = if strict {
            "UPDATE offers SET status = 'REJECTED' WHERE id = $1 AND status IN ('SENT', 'REJECTED')"
        } else {
            "UPDATE offers SET status = 'REJECTED' WHERE id = $1"
        };

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(sql)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let offer = Self::fetch_offer(&mut tx, id)
            .await?
            .ok_or(StaffingError::OfferNotFound { id })?;

        if updated == 0 {
            return Err(StaffingError::OfferNotSent {
                id,
                status: offer.status.to_string(),
            });
        }

        tx.commit().await?;
        Ok(offer)
    }

    async fn delete(&self, id: i64) -> StaffingResult<Offer> {
        let row = sqlx::query(&format!(
            "DELETE FROM offers WHERE id = $1 RETURNING {OFFER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StaffingError::OfferNotFound { id })?;

        debug!("删除邀约成功: {}", id);
        MappingHelpers::row_to_offer(&row)
    }

    async fn list_for_worker(&self, worker_id: i64) -> StaffingResult<Vec<WorkerOffer>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE worker_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(worker_id)
        .fetch_all(&mut *conn)
        .await?;

        let mut work_orders: HashMap<i64, WorkOrderWithSite> = HashMap::new();
        let mut offers = Vec::with_capacity(rows.len());

        for row in &rows {
            let offer = MappingHelpers::row_to_offer(row)?;

            if !work_orders.contains_key(&offer.work_order_id) {
                let work_order_row = sqlx::query(&format!(
                    "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = $1"
                ))
                .bind(offer.work_order_id)
                .fetch_one(&mut *conn)
                .await?;
                let work_order = MappingHelpers::row_to_work_order(&work_order_row)?;

                let site = match work_order.site_id {
                    Some(site_id) => sqlx::query(&format!(
                        "SELECT {SITE_COLUMNS} FROM sites WHERE id = $1"
                    ))
                    .bind(site_id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .as_ref()
                    .map(MappingHelpers::row_to_site)
                    .transpose()?,
                    None => None,
                };

                work_orders.insert(
                    offer.work_order_id,
                    WorkOrderWithSite { work_order, site },
                );
            }

            if let Some(work_order) = work_orders.get(&offer.work_order_id) {
                offers.push(WorkerOffer {
                    work_order: work_order.clone(),
                    offer,
                });
            }
        }

        Ok(offers)
    }
}
