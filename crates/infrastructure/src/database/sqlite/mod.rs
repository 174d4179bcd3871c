pub mod sqlite_assignment_repository;
pub mod sqlite_offer_repository;
pub mod sqlite_shift_repository;
pub mod sqlite_work_order_repository;
pub mod sqlite_worker_repository;

pub use sqlite_assignment_repository::SqliteAssignmentRepository;
pub use sqlite_offer_repository::SqliteOfferRepository;
pub use sqlite_shift_repository::SqliteShiftRepository;
pub use sqlite_work_order_repository::SqliteWorkOrderRepository;
pub use sqlite_worker_repository::SqliteWorkerRepository;

pub type DbPool = sqlx::SqlitePool;
