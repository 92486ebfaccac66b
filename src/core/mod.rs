pub mod config;
pub mod paths;
pub mod validation;
pub mod version;
