pub mod manager;
pub mod mapping;
pub mod sqlite;

pub use manager::DatabaseManager;
pub use sqlite::{
    DbPool, SqliteAssignmentRepository, SqliteOfferRepository, SqliteShiftRepository,
    SqliteWorkOrderRepository, SqliteWorkerRepository,
};
