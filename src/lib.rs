pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod modules;

pub use infrastructure::config;
pub use modules::integrations::cloud_vision;
pub use modules::scanner;
