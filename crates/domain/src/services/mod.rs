//! # 领域服务
//!
//! - [`MatchingService`]: 为工单排序候选工人
//! - [`OfferService`]: 邀约的发送、接受、拒绝与删除，以及工人视角的归属检查
//! - [`ShiftService`]: 班次签到签退与考勤坐标
//! - [`IdentityResolver`]: 登录身份到工人档案的解析
//! - [`WorkOrderService`] / [`WorkerService`]: 工单与工人档案的登记和查询
//!
//! 服务本身无状态，事务边界由仓储实现负责。

pub mod identity;
pub mod matching;
pub mod offers;
pub mod shifts;
pub mod work_orders;
pub mod workers;

pub use identity::IdentityResolver;
pub use matching::{DistanceEstimator, MatchingService, PlaceholderDistance};
pub use offers::{OfferService, SendOffers};
pub use shifts::ShiftService;
pub use work_orders::WorkOrderService;
pub use workers::WorkerService;
