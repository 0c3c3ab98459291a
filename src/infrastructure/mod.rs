//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{default_config_file, expand_tilde, get_data_dir, storage_file};
