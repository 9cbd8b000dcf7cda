use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// build -> persist -> tag 的執行順序
pub struct TaggingEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> TaggingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting user tagging run");
        self.monitor.log_stats("Start");

        tracing::info!("📥 Building records...");
        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Built {} records", records.len());
        self.monitor.log_stats("Build");

        tracing::info!("💾 Writing records...");
        let output_path = self.pipeline.load(&records).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("Persist");

        tracing::info!("🏷️ Tagging {} users...", records.len());
        self.pipeline.classify(records).await?;
        self.monitor.log_stats("Tag");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;
    use crate::utils::error::TaggerError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPipeline {
        calls: Mutex<Vec<String>>,
        fail_extract: bool,
    }

    impl RecordingPipeline {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<Vec<Record>> {
            self.calls.lock().unwrap().push("extract".to_string());
            if self.fail_extract {
                return Err(TaggerError::SchemaMismatch {
                    missing: vec!["food".to_string()],
                    extra: vec![],
                });
            }
            Ok(vec![Record::new(serde_json::json!({"user": {"name": "Ann"}}))])
        }

        async fn load(&self, records: &[Record]) -> Result<String> {
            self.calls.lock().unwrap().push(format!("load {}", records.len()));
            Ok("out/output.json".to_string())
        }

        async fn classify(&self, records: Vec<Record>) -> Result<()> {
            self.calls.lock().unwrap().push(format!("classify {}", records.len()));
            Ok(())
        }
    }

    #[test]
    fn test_run_order() {
        let engine = TaggingEngine::new(RecordingPipeline::default());
        let output = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(output, "out/output.json");
        assert_eq!(engine.pipeline.calls(), vec!["extract", "load 1", "classify 1"]);
    }

    #[tokio::test]
    async fn test_extract_failure_stops_run() {
        let engine = TaggingEngine::new(RecordingPipeline {
            fail_extract: true,
            ..Default::default()
        });

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, TaggerError::SchemaMismatch { .. }));
        assert_eq!(engine.pipeline.calls(), vec!["extract"]);
    }
}
