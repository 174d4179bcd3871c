use thiserror::Error;

/// 撮合与排班引擎错误类型定义
#[derive(Debug, Error)]
pub enum StaffingError {
    #[error("数据库错误: {0}")]
    Database(String),

    #[error("工单未找到: {id}")]
    WorkOrderNotFound { id: i64 },

    #[error("工人未找到: {id}")]
    WorkerNotFound { id: i64 },

    #[error("邀约未找到: {id}")]
    OfferNotFound { id: i64 },

    #[error("班次未找到: {id}")]
    ShiftNotFound { id: i64 },

    #[error("邀约 {id} 当前状态为 {status}，不是 SENT")]
    OfferNotSent { id: i64, status: String },

    #[error("邀约 {id} 已过期")]
    OfferExpired { id: i64 },

    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("当前登录身份未关联工人档案")]
    WorkerProfileMissing,

    #[error("邀约 {offer_id} 不属于当前工人")]
    NotYourOffer { offer_id: i64 },

    #[error("登录身份 {user_id} 已关联工人档案")]
    WorkerAlreadyLinked { user_id: i64 },

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误分类，传输层据此映射状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidArgument,
    Forbidden,
    Internal,
}

impl StaffingError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StaffingError::WorkOrderNotFound { .. }
            | StaffingError::WorkerNotFound { .. }
            | StaffingError::OfferNotFound { .. }
            | StaffingError::ShiftNotFound { .. } => ErrorKind::NotFound,
            StaffingError::OfferNotSent { .. }
            | StaffingError::OfferExpired { .. }
            | StaffingError::WorkerAlreadyLinked { .. } => ErrorKind::Conflict,
            StaffingError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            StaffingError::WorkerProfileMissing | StaffingError::NotYourOffer { .. } => {
                ErrorKind::Forbidden
            }
            StaffingError::Database(_)
            | StaffingError::Serialization(_)
            | StaffingError::Configuration(_)
            | StaffingError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// 客户端错误不应由调用方原样重试
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Internal)
    }

    pub fn user_message(&self) -> &str {
        match self {
            StaffingError::WorkOrderNotFound { .. } => "请求的工单不存在",
            StaffingError::WorkerNotFound { .. } => "请求的工人不存在",
            StaffingError::OfferNotFound { .. } => "请求的邀约不存在",
            StaffingError::ShiftNotFound { .. } => "请求的班次不存在",
            StaffingError::OfferNotSent { .. } => "邀约已处理，无法重复操作",
            StaffingError::OfferExpired { .. } => "邀约已过期",
            StaffingError::InvalidArgument(_) => "请求参数有误",
            StaffingError::WorkerProfileMissing => "当前账号未关联工人档案",
            StaffingError::NotYourOffer { .. } => "不是你的邀约",
            StaffingError::WorkerAlreadyLinked { .. } => "该账号已关联工人档案",
            _ => "系统繁忙，请稍后重试",
        }
    }
}

impl From<sqlx::Error> for StaffingError {
    fn from(err: sqlx::Error) -> Self {
        StaffingError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StaffingError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StaffingError::Database(format!("迁移失败: {err}"))
    }
}

impl From<serde_json::Error> for StaffingError {
    fn from(err: serde_json::Error) -> Self {
        StaffingError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for StaffingError {
    fn from(err: anyhow::Error) -> Self {
        StaffingError::Internal(err.to_string())
    }
}

/// 统一的Result类型
pub type StaffingResult<T> = std::result::Result<T, StaffingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            StaffingError::OfferNotFound { id: 1 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StaffingError::OfferNotSent {
                id: 1,
                status: "ACCEPTED".to_string()
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            StaffingError::OfferExpired { id: 1 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            StaffingError::invalid_argument("workerIds required").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            StaffingError::WorkerAlreadyLinked { user_id: 5 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            StaffingError::NotYourOffer { offer_id: 3 }.kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            StaffingError::WorkerProfileMissing.kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            StaffingError::Database("locked".to_string()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(StaffingError::ShiftNotFound { id: 9 }.is_client_error());
        assert!(!StaffingError::Internal("boom".to_string()).is_client_error());
    }

    #[test]
    fn test_error_display() {
        let err = StaffingError::OfferNotSent {
            id: 7,
            status: "REJECTED".to_string(),
        };
        assert_eq!(err.to_string(), "邀约 7 当前状态为 REJECTED，不是 SENT");
        assert_eq!(err.user_message(), "邀约已处理，无法重复操作");
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: StaffingError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StaffingError::Database(_)));
    }
}
