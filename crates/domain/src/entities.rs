use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::ShiftWindow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Draft,
    Open,
    Filled,
    Partial,
    Cancelled,
    Completed,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Draft => "DRAFT",
            WorkOrderStatus::Open => "OPEN",
            WorkOrderStatus::Filled => "FILLED",
            WorkOrderStatus::Partial => "PARTIAL",
            WorkOrderStatus::Cancelled => "CANCELLED",
            WorkOrderStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(WorkOrderStatus::Draft),
            "OPEN" => Ok(WorkOrderStatus::Open),
            "FILLED" => Ok(WorkOrderStatus::Filled),
            "PARTIAL" => Ok(WorkOrderStatus::Partial),
            "CANCELLED" => Ok(WorkOrderStatus::Cancelled),
            "COMPLETED" => Ok(WorkOrderStatus::Completed),
            _ => Err(format!("Invalid work order status: {s}")),
        }
    }
}

/// 客户发布的用工需求
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: i64,
    pub org_id: i64,
    pub site_id: Option<i64>,
    pub role_name: String,
    pub headcount: i32,
    pub start: DateTime<Utc>,
    pub duration_mins: i32,
    pub recurring_rule: Option<String>,
    pub budget: f64,
    pub status: WorkOrderStatus,
    pub created_at: DateTime<Utc>,
}

impl WorkOrder {
    /// 由开始时间与时长推导的标准班次窗口
    pub fn shift_window(&self) -> ShiftWindow {
        ShiftWindow {
            start: self.start,
            end: self.start + Duration::minutes(i64::from(self.duration_mins)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkOrder {
    pub org_id: i64,
    pub site_id: Option<i64>,
    pub role_name: String,
    pub headcount: i32,
    pub start: DateTime<Utc>,
    pub duration_mins: i32,
    pub recurring_rule: Option<String>,
    pub budget: f64,
    pub status: WorkOrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSite {
    pub org_id: i64,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateUnit {
    Hour,
    Day,
    Week,
    Month,
}

impl RateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateUnit::Hour => "HOUR",
            RateUnit::Day => "DAY",
            RateUnit::Week => "WEEK",
            RateUnit::Month => "MONTH",
        }
    }
}

impl FromStr for RateUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOUR" => Ok(RateUnit::Hour),
            "DAY" => Ok(RateUnit::Day),
            "WEEK" => Ok(RateUnit::Week),
            "MONTH" => Ok(RateUnit::Month),
            _ => Err(format!("Invalid rate unit: {s}")),
        }
    }
}

/// 工人档案，`skills` 为角色标签集合
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub base_rate: f64,
    pub rate_unit: RateUnit,
    pub radius_km: f64,
    pub rating: f64,
    pub strikes: i32,
    pub created_at: DateTime<Utc>,
}

impl Worker {
    pub fn has_skill(&self, role: &str) -> bool {
        self.skills.iter().any(|skill| skill == role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorker {
    pub user_id: Option<i64>,
    pub name: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub base_rate: f64,
    pub rate_unit: RateUnit,
    pub radius_km: f64,
    pub rating: f64,
    pub strikes: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Sent => "SENT",
            OfferStatus::Accepted => "ACCEPTED",
            OfferStatus::Rejected => "REJECTED",
            OfferStatus::Expired => "EXPIRED",
        }
    }

    /// REJECTED 与 EXPIRED 不会再发生状态变化
    pub fn is_terminal(&self) -> bool {
        matches!(self, OfferStatus::Rejected | OfferStatus::Expired)
    }
}

impl FromStr for OfferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SENT" => Ok(OfferStatus::Sent),
            "ACCEPTED" => Ok(OfferStatus::Accepted),
            "REJECTED" => Ok(OfferStatus::Rejected),
            "EXPIRED" => Ok(OfferStatus::Expired),
            _ => Err(format!("Invalid offer status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: i64,
    pub work_order_id: i64,
    pub worker_id: i64,
    pub status: OfferStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// 一次批量发送的待写入内容
#[derive(Debug, Clone, PartialEq)]
pub struct OfferBatch {
    pub work_order_id: i64,
    pub worker_ids: Vec<i64>,
    pub expires_at: DateTime<Utc>,
    pub resend_after_terminal: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendOutcome {
    pub created: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub work_order_id: i64,
    pub worker_id: i64,
    #[serde(rename = "final")]
    pub is_final: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Planned,
    InProgress,
    Completed,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Planned => "PLANNED",
            ShiftStatus::InProgress => "IN_PROGRESS",
            ShiftStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNED" => Ok(ShiftStatus::Planned),
            "IN_PROGRESS" => Ok(ShiftStatus::InProgress),
            "COMPLETED" => Ok(ShiftStatus::Completed),
            _ => Err(format!("Invalid shift status: {s}")),
        }
    }
}

macro_rules! impl_status_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_status_display!(WorkOrderStatus, RateUnit, OfferStatus, ShiftStatus);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    pub assignment_id: i64,
    pub start_planned: DateTime<Utc>,
    pub end_planned: DateTime<Utc>,
    pub start_actual: Option<DateTime<Utc>>,
    pub end_actual: Option<DateTime<Utc>>,
    pub status: ShiftStatus,
    /// 由接受邀约自动生成的班次，每个派工至多一条
    pub auto_created: bool,
    pub created_at: DateTime<Utc>,
}

/// 与班次一一对应的考勤定位记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub shift_id: i64,
    pub in_lat: Option<f64>,
    pub in_lng: Option<f64>,
    pub out_lat: Option<f64>,
    pub out_lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// ---- 读模型 ----

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderWithSite {
    #[serde(flatten)]
    pub work_order: WorkOrder,
    pub site: Option<Site>,
}

/// 工人视角的邀约，附带工单及其场地
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerOffer {
    #[serde(flatten)]
    pub offer: Offer,
    pub work_order: WorkOrderWithSite,
}

/// 接受邀约的结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedOffer {
    #[serde(flatten)]
    pub offer: Offer,
    pub work_order: WorkOrder,
    pub worker: Worker,
    pub assignment: Assignment,
    pub shift: Shift,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWithAttendance {
    #[serde(flatten)]
    pub shift: Shift,
    pub attendance: Option<Attendance>,
}

/// 工人视角的班次，`site` 经 派工 → 工单 → 场地 在读取时补齐
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerShift {
    #[serde(flatten)]
    pub shift: Shift,
    pub site: Option<Site>,
    pub attendance: Option<Attendance>,
}

/// 签到/签退的结果，`transitioned` 表示本次调用是否推进了班次状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftCheckpoint {
    #[serde(flatten)]
    pub shift: Shift,
    pub attendance: Option<Attendance>,
    pub transitioned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub worker: Worker,
    pub score: f64,
    pub distance_km: f64,
}
