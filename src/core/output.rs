use crate::core::Storage;
use crate::domain::model::Record;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// 整份記錄陣列序列化為一個 JSON 文件，四格縮排
pub fn to_pretty_json(records: &[Record]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

pub fn from_json(data: &[u8]) -> Result<Vec<Record>> {
    Ok(serde_json::from_slice(data)?)
}

/// 一次寫入整個緩衝區
pub async fn persist<S: Storage>(storage: &S, path: &Path, records: &[Record]) -> Result<()> {
    let data = to_pretty_json(records)?;
    tracing::debug!("💾 Writing {} records ({} bytes) to {}", records.len(), data.len(), path.display());
    storage.write_file(path, &data).await
}

pub async fn read_back<S: Storage>(storage: &S, path: &Path) -> Result<Vec<Record>> {
    let data = storage.read_file(path).await?;
    from_json(&data)
}
