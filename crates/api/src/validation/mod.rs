pub mod offer;
pub mod shift;
pub mod work_order;
pub mod worker;

pub use offer::SendOffersRequest;
pub use shift::CheckpointRequest;
pub use work_order::CreateWorkOrderRequest;
pub use worker::CreateWorkerRequest;
