pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::Strategy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_existing_file, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "user-tagger")]
#[command(about = "Render csv rows through a json template and tag users as spenders")]
pub struct CliConfig {
    /// Path to the csv data file
    #[arg(long, default_value = "data.csv")]
    pub data_path: PathBuf,

    /// Path to the json template file
    #[arg(long, default_value = "template.json")]
    pub template_path: PathBuf,

    /// Path to the output json file
    #[arg(long, default_value = "output/output.json")]
    pub output_path: PathBuf,

    /// Tag users iteratively (false: use the worker pool)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub iter: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn strategy(&self) -> Strategy {
        Strategy::from_iter_flag(self.iter)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_existing_file("data_path", &self.data_path)?;
        validate_existing_file("template_path", &self.template_path)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
