pub mod entities;
pub mod repositories;
pub mod services;
pub mod sqlx_impls;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod testing;

pub use entities::*;
pub use repositories::*;
pub use services::*;
pub use staffing_core::{StaffingError, StaffingResult};
pub use value_objects::*;
