pub mod health;
pub mod user_history;

pub use health::health_check;
pub use user_history::{json_config, user_history_config};
