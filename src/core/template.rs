use crate::domain::model::Row;
use crate::utils::error::{Result, TaggerError};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

// 與 `{identifier}` 格式的佔位符對應
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// JSON 模板，`{column}` 佔位符會被每一列的原始值取代
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TaggerError::InputNotFound {
                path: path.display().to_string(),
            },
            _ => TaggerError::IoError(e),
        })?;
        Ok(Self::new(text))
    }

    /// 模板中出現過的佔位符名稱（去重）
    pub fn placeholders(&self) -> BTreeSet<String> {
        PLACEHOLDER
            .captures_iter(&self.text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// 以 `row` 的值取代所有佔位符。值原樣插入，不做 JSON 跳脫。
    pub fn render(&self, row: &Row, row_index: usize) -> Result<String> {
        let mut rendered = String::with_capacity(self.text.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.text) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let key = key.as_str();
            let value = row.get(key).ok_or_else(|| TaggerError::RowFormatError {
                row: row_index,
                key: key.to_string(),
            })?;

            rendered.push_str(&self.text[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }
        rendered.push_str(&self.text[last..]);

        Ok(rendered)
    }
}
