pub mod assignments;
pub mod health;
pub mod matching;
pub mod offers;
pub mod shifts;
pub mod work_orders;
pub mod workers;
