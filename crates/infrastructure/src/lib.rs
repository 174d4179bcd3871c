pub mod database;
pub mod seed;

pub use database::*;
pub use seed::{seed_demo, DEMO_USER_ID};
