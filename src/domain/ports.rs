use crate::domain::model::{Record, Strategy};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &Path;
    fn template_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn strategy(&self) -> Strategy;
}

/// 分類結果的輸出通道；實作必須保證每一行完整寫出，不與其他執行緒交錯
pub trait ReportSink: Send + Sync {
    fn emit(&self, line: &str);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn load(&self, records: &[Record]) -> Result<String>;
    async fn classify(&self, records: Vec<Record>) -> Result<()>;
}
