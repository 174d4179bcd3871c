//! 行映射工具
//!
//! 各仓储共用的 SQLite 行到领域实体的转换，以及 JSON 文本列的解析。

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use staffing_core::{StaffingError, StaffingResult};
use staffing_domain::entities::{
    Assignment, Attendance, Offer, Shift, Site, WorkOrder, Worker,
};

pub const WORK_ORDER_COLUMNS: &str = "id, org_id, site_id, role_name, headcount, start, \
     duration_mins, recurring_rule, budget, status, created_at";

pub const SITE_COLUMNS: &str = "id, org_id, name, address, lat, lng, created_at";

pub const WORKER_COLUMNS: &str = "id, user_id, name, skills, languages, base_rate, rate_unit, \
     radius_km, rating, strikes, created_at";

pub const OFFER_COLUMNS: &str = "id, work_order_id, worker_id, status, expires_at, created_at";

pub const ASSIGNMENT_COLUMNS: &str = "id, work_order_id, worker_id, is_final, created_at";

pub const SHIFT_COLUMNS: &str = "id, assignment_id, start_planned, end_planned, start_actual, \
     end_actual, status, auto_created, created_at";

pub const ATTENDANCE_COLUMNS: &str = "id, shift_id, in_lat, in_lng, out_lat, out_lng, created_at";

pub struct MappingHelpers;

impl MappingHelpers {
    /// 解析存储为 JSON 数组文本的字符串列表
    pub fn parse_string_list(row: &SqliteRow, field_name: &str) -> StaffingResult<Vec<String>> {
        let json_str: String = row.try_get(field_name)?;
        serde_json::from_str(&json_str).map_err(|e| {
            StaffingError::Serialization(format!("解析字段 {field_name} 失败: {e}"))
        })
    }

    pub fn string_list_to_json(values: &[String]) -> StaffingResult<String> {
        serde_json::to_string(values)
            .map_err(|e| StaffingError::Serialization(format!("序列化字符串列表失败: {e}")))
    }

    pub fn row_to_work_order(row: &SqliteRow) -> StaffingResult<WorkOrder> {
        Ok(WorkOrder {
            id: row.try_get("id")?,
            org_id: row.try_get("org_id")?,
            site_id: row.try_get("site_id")?,
            role_name: row.try_get("role_name")?,
            headcount: row.try_get("headcount")?,
            start: row.try_get("start")?,
            duration_mins: row.try_get("duration_mins")?,
            recurring_rule: row.try_get("recurring_rule")?,
            budget: row.try_get("budget")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn row_to_site(row: &SqliteRow) -> StaffingResult<Site> {
        Ok(Site {
            id: row.try_get("id")?,
            org_id: row.try_get("org_id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            lat: row.try_get("lat")?,
            lng: row.try_get("lng")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn row_to_worker(row: &SqliteRow) -> StaffingResult<Worker> {
        Ok(Worker {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            skills: Self::parse_string_list(row, "skills")?,
            languages: Self::parse_string_list(row, "languages")?,
            base_rate: row.try_get("base_rate")?,
            rate_unit: row.try_get("rate_unit")?,
            radius_km: row.try_get("radius_km")?,
            rating: row.try_get("rating")?,
            strikes: row.try_get("strikes")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn row_to_offer(row: &SqliteRow) -> StaffingResult<Offer> {
        Ok(Offer {
            id: row.try_get("id")?,
            work_order_id: row.try_get("work_order_id")?,
            worker_id: row.try_get("worker_id")?,
            status: row.try_get("status")?,
            expires_at: row.try_get("expires_at")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn row_to_assignment(row: &SqliteRow) -> StaffingResult<Assignment> {
        Ok(Assignment {
            id: row.try_get("id")?,
            work_order_id: row.try_get("work_order_id")?,
            worker_id: row.try_get("worker_id")?,
            is_final: row.try_get("is_final")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn row_to_shift(row: &SqliteRow) -> StaffingResult<Shift> {
        Ok(Shift {
            id: row.try_get("id")?,
            assignment_id: row.try_get("assignment_id")?,
            start_planned: row.try_get("start_planned")?,
            end_planned: row.try_get("end_planned")?,
            start_actual: row.try_get("start_actual")?,
            end_actual: row.try_get("end_actual")?,
            status: row.try_get("status")?,
            auto_created: row.try_get("auto_created")?,
            created_at: row.try_get("created_at")?,
        })
    }

    pub fn row_to_attendance(row: &SqliteRow) -> StaffingResult<Attendance> {
        Ok(Attendance {
            id: row.try_get("id")?,
            shift_id: row.try_get("shift_id")?,
            in_lat: row.try_get("in_lat")?,
            in_lng: row.try_get("in_lng")?,
            out_lat: row.try_get("out_lat")?,
            out_lng: row.try_get("out_lng")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
