use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一列 CSV：欄位名稱 -> 原始字串值
pub type Row = HashMap<String, String>;

/// 以模板填入一列資料後解析出的 JSON 文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: serde_json::Value,
}

impl Record {
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// 依 `a.b.c` 路徑取值
    pub fn get_path(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.data, |value, key| value.get(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Sequential,
    Parallel,
}

impl Strategy {
    pub fn from_iter_flag(iterative: bool) -> Self {
        if iterative {
            Strategy::Sequential
        } else {
            Strategy::Parallel
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Sequential => write!(f, "sequential"),
            Strategy::Parallel => write!(f, "parallel"),
        }
    }
}
