pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::builder::{build_from_path, build_records};
pub use crate::core::classifier::{tag, tag_all, tag_all_concurrent, tag_all_sequential};
pub use crate::core::report::{MemorySink, StdoutSink};
pub use crate::core::template::Template;
pub use crate::core::{etl::TaggingEngine, pipeline::UserPipeline};
pub use domain::model::{Record, Strategy};
pub use utils::error::{Result, TagError, TaggerError};
