use crate::core::template::Template;
use crate::domain::model::{Record, Row};
use crate::utils::error::{Result, TaggerError};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// 欄位不足時補上的值
pub const MISSING_CELL: &str = "None";

/// 讀取 CSV 並以模板將每一列轉成 [`Record`]。
///
/// CSV 標頭與模板佔位符必須是完全相同的集合，否則整個執行中止。
/// 欄位不足的列以 [`MISSING_CELL`] 補齊，交給分類時逐筆失敗；
/// 欄位過多或模板填值後不是合法 JSON 則中止，不會回傳部分結果。
pub fn build_records<R: Read>(reader: R, template: &Template) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns: BTreeSet<String> = headers.iter().map(str::to_string).collect();
    check_schema(&columns, &template.placeholders())?;

    tracing::debug!("🔧 Template placeholders match csv columns: {:?}", columns);

    let mut records = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let csv_record = result.map_err(|e| TaggerError::ProcessingError {
            message: format!("row {}: {}", row_number, e),
        })?;

        if csv_record.len() > headers.len() {
            return Err(TaggerError::ProcessingError {
                message: format!(
                    "row {}: {} fields but the header has {} columns",
                    row_number,
                    csv_record.len(),
                    headers.len()
                ),
            });
        }

        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = csv_record.get(i).unwrap_or(MISSING_CELL);
                (column.to_string(), value.to_string())
            })
            .collect();

        let rendered = template.render(&row, row_number)?;
        let data: serde_json::Value =
            serde_json::from_str(&rendered).map_err(|source| TaggerError::TemplateError {
                row: row_number,
                source,
            })?;

        records.push(Record::new(data));
    }

    tracing::debug!("🔧 Built {} records from csv", records.len());
    Ok(records)
}

/// 欄位與佔位符以集合比較：順序不重要，重複的佔位符也接受
pub fn check_schema(columns: &BTreeSet<String>, placeholders: &BTreeSet<String>) -> Result<()> {
    if columns == placeholders {
        return Ok(());
    }

    let missing: Vec<String> = placeholders.difference(columns).cloned().collect();
    let extra: Vec<String> = columns.difference(placeholders).cloned().collect();
    tracing::error!(
        "❌ Column mismatch: missing from csv {:?}, not in template {:?}",
        missing,
        extra
    );
    Err(TaggerError::SchemaMismatch { missing, extra })
}

/// 只讀取 CSV 標頭
pub fn read_columns<R: Read>(reader: R) -> Result<BTreeSet<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    Ok(csv_reader.headers()?.iter().map(str::to_string).collect())
}

pub fn build_from_path<P: AsRef<Path>>(data_path: P, template: &Template) -> Result<Vec<Record>> {
    let data_path = data_path.as_ref();
    let file = std::fs::File::open(data_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TaggerError::InputNotFound {
            path: data_path.display().to_string(),
        },
        _ => TaggerError::IoError(e),
    })?;

    tracing::info!("📥 Reading records from {}", data_path.display());
    build_records(std::io::BufReader::new(file), template)
}
