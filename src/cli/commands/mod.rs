//! CLI command implementations

pub mod clear;
pub mod config;
pub mod history;
pub mod record;
pub mod search;

pub use clear::execute as clear;
pub use config::execute as config;
pub use history::execute as history;
pub use record::execute as record;
pub use search::execute as search;
