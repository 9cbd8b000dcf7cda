use crate::core::builder::build_records;
use crate::core::classifier::tag_all;
use crate::core::output;
use crate::core::template::Template;
use crate::core::{ConfigProvider, Pipeline, Record, ReportSink, Storage};
use crate::utils::error::{Result, TaggerError};
use std::sync::Arc;

pub struct UserPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    sink: Arc<dyn ReportSink>,
}

impl<S: Storage, C: ConfigProvider> UserPipeline<S, C> {
    pub fn new(storage: S, config: C, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            storage,
            config,
            sink,
        }
    }

    async fn load_template(&self) -> Result<Template> {
        let bytes = self.storage.read_file(self.config.template_path()).await?;
        let text = String::from_utf8(bytes).map_err(|e| TaggerError::ProcessingError {
            message: format!(
                "template {} is not valid utf-8: {}",
                self.config.template_path().display(),
                e
            ),
        })?;
        Ok(Template::new(text))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for UserPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let template = self.load_template().await?;
        tracing::debug!(
            "Loaded template {} with placeholders {:?}",
            self.config.template_path().display(),
            template.placeholders()
        );

        let data = self.storage.read_file(self.config.data_path()).await?;
        build_records(data.as_slice(), &template)
    }

    async fn load(&self, records: &[Record]) -> Result<String> {
        let output_path = self.config.output_path();
        output::persist(&self.storage, output_path, records).await?;
        Ok(output_path.display().to_string())
    }

    async fn classify(&self, records: Vec<Record>) -> Result<()> {
        let strategy = self.config.strategy();
        let sink = Arc::clone(&self.sink);

        tracing::debug!("Tagging {} records ({})", records.len(), strategy);

        // 分類會 sleep，放到 blocking 執行緒避免卡住 runtime
        tokio::task::spawn_blocking(move || tag_all(&records, strategy, sink.as_ref()))
            .await
            .map_err(|e| TaggerError::ProcessingError {
                message: format!("tagging task failed: {}", e),
            })?
    }
}
