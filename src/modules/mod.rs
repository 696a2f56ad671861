pub mod integrations;
pub mod scanner;
