//! Configuration schema and loading

mod loader;
mod schema;

pub use loader::Config;
pub use schema::{BuildTypeConfig, ConfigSchema, ProjectConfig, SdkConfig, SigningConfig};
