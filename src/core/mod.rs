pub mod builder;
pub mod classifier;
pub mod etl;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod template;

pub use crate::domain::model::{Record, Row, Strategy};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ReportSink, Storage};
pub use crate::utils::error::Result;
