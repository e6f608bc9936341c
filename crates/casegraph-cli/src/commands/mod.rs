//! Command implementations.

pub mod audit;
pub mod config;
pub mod person;
pub mod score;
pub mod search;
pub mod view;

pub use self::audit::execute_audit;
pub use self::config::execute_config;
pub use self::person::execute_person;
pub use self::score::execute_score;
pub use self::search::execute_search;
pub use self::view::{build_update, execute_view};
