//! Spender / non-spender classification.
//!
//! Every record yields exactly one report line. Per-record failures (bad
//! name, non-numeric amounts, missing groups) are turned into a report line
//! and never stop the other records.

use crate::domain::model::{Record, Strategy};
use crate::domain::ports::ReportSink;
use crate::utils::error::{Result, TagError, TaggerError};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;

/// 每筆記錄分類後的模擬處理時間
pub const SIMULATED_WORK: Duration = Duration::from_millis(100);

// 只允許字母，最多一個中間空白
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]+(?: [a-zA-Z]+)?$").expect("name pattern is valid")
});

const UNKNOWN_USER: &str = "<unknown>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Spender,
    NotSpender,
}

/// 判斷單筆記錄，不產生任何輸出
pub fn classify(record: &Record) -> std::result::Result<Verdict, TagError> {
    let name = user_name(record)?;
    if !NAME_PATTERN.is_match(name) {
        return Err(TagError::NameValidation {
            name: name.to_string(),
        });
    }

    let expenses = record
        .get_path("expenses")
        .and_then(Value::as_object)
        .ok_or_else(|| TagError::MissingField {
            field: "expenses".to_string(),
        })?;

    let mut expenses_sum: i64 = 0;
    for (key, value) in expenses {
        let field = format!("expenses.{}", key);
        let amount = parse_integer(&field, value)?;
        expenses_sum = expenses_sum
            .checked_add(amount)
            .ok_or(TagError::Overflow { field })?;
    }

    let salary = record
        .get_path("user.salary")
        .ok_or_else(|| TagError::MissingField {
            field: "user.salary".to_string(),
        })
        .and_then(|value| parse_integer("user.salary", value))?;

    if expenses_sum > salary {
        Ok(Verdict::Spender)
    } else {
        Ok(Verdict::NotSpender)
    }
}

/// 分類並輸出一行結果，接著模擬處理時間。錯誤只會變成報告內容。
pub fn tag(record: &Record, sink: &dyn ReportSink) {
    let line = match classify(record) {
        Ok(Verdict::Spender) => format!("{} is a spender.", display_name(record)),
        Ok(Verdict::NotSpender) => format!("{} is not a spender.", display_name(record)),
        Err(e) => {
            tracing::debug!("Tagging failed for {}: {}", display_name(record), e);
            format!("Tagging user: {}, failed due to {}", display_name(record), e)
        }
    };
    sink.emit(&line);

    std::thread::sleep(SIMULATED_WORK);
}

pub fn tag_all_sequential(records: &[Record], sink: &dyn ReportSink) {
    for record in records {
        tag(record, sink);
    }
}

/// 以固定大小的 worker pool 分配記錄，回傳前所有記錄都已處理完畢。
/// 輸出順序不保證與輸入相同。
pub fn tag_all_concurrent(records: &[Record], sink: &dyn ReportSink) -> Result<()> {
    let workers = worker_count();
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("tagger-{}", index))
        .build()
        .map_err(|e| TaggerError::ProcessingError {
            message: format!("failed to build worker pool: {}", e),
        })?;

    tracing::debug!("🧵 Tagging {} records on {} workers", records.len(), workers);
    pool.install(|| {
        records
            .par_iter()
            .with_max_len(1)
            .for_each(|record| tag(record, sink))
    });

    Ok(())
}

pub fn tag_all(records: &[Record], strategy: Strategy, sink: &dyn ReportSink) -> Result<()> {
    match strategy {
        Strategy::Sequential => {
            tag_all_sequential(records, sink);
            Ok(())
        }
        Strategy::Parallel => tag_all_concurrent(records, sink),
    }
}

pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn user_name(record: &Record) -> std::result::Result<&str, TagError> {
    match record.get_path("user.name") {
        Some(Value::String(name)) => Ok(name),
        Some(other) => Err(TagError::NameValidation {
            name: other.to_string(),
        }),
        None => Err(TagError::MissingField {
            field: "user.name".to_string(),
        }),
    }
}

fn display_name(record: &Record) -> String {
    match record.get_path("user.name") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Null) | None => UNKNOWN_USER.to_string(),
        Some(other) => other.to_string(),
    }
}

fn parse_integer(field: &str, value: &Value) -> std::result::Result<i64, TagError> {
    let parsed = match value {
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        Value::Number(number) => number.as_i64(),
        _ => None,
    };

    parsed.ok_or_else(|| TagError::NumericParse {
        field: field.to_string(),
        value: match value {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::MemorySink;
    use serde_json::json;

    fn user(name: &str, salary: &str, food: &str, clothes: &str) -> Record {
        Record::new(json!({
            "user": {"name": name, "salary": salary},
            "expenses": {"food": food, "clothes": clothes}
        }))
    }

    #[test]
    fn test_spender_when_sum_exceeds_salary() {
        assert_eq!(classify(&user("Hank Martinez", "3000", "2500", "900")), Ok(Verdict::Spender));
    }

    #[test]
    fn test_equal_sum_is_not_spender() {
        assert_eq!(classify(&user("Ann Lee", "1000", "600", "400")), Ok(Verdict::NotSpender));
    }

    #[test]
    fn test_numeric_json_values_accepted() {
        let record = Record::new(json!({
            "user": {"name": "Ann", "salary": 10},
            "expenses": {"food": 7, "clothes": " 4 "}
        }));
        assert_eq!(classify(&record), Ok(Verdict::Spender));
    }

    #[test]
    fn test_name_validation() {
        for bad in ["Davi8909Garcia", "Hank  Martinez", "Mary Ann Lee", "O'Brien", " Ann", ""] {
            let err = classify(&user(bad, "10", "1", "1")).unwrap_err();
            assert_eq!(err, TagError::NameValidation { name: bad.to_string() });
        }
        assert!(classify(&user("Cher", "10", "1", "1")).is_ok());
    }

    #[test]
    fn test_empty_expense_is_numeric_error() {
        let err = classify(&user("Ann Lee", "10", "", "1")).unwrap_err();
        assert_eq!(
            err,
            TagError::NumericParse {
                field: "expenses.food".to_string(),
                value: String::new()
            }
        );
    }

    #[test]
    fn test_bad_salary_is_numeric_error() {
        let err = classify(&user("Ann Lee", "lots", "1", "1")).unwrap_err();
        assert!(matches!(err, TagError::NumericParse { ref field, .. } if field == "user.salary"));
    }

    #[test]
    fn test_missing_expenses_group() {
        let record = Record::new(json!({"user": {"name": "Ann", "salary": "1"}}));
        assert_eq!(
            classify(&record),
            Err(TagError::MissingField { field: "expenses".to_string() })
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = i64::MAX.to_string();
        let err = classify(&user("Ann Lee", "1", &max, "1")).unwrap_err();
        assert!(matches!(err, TagError::Overflow { .. }));
    }

    #[test]
    fn test_tag_emits_one_line() {
        let sink = MemorySink::new();
        tag(&user("Grace Davis", "5000", "1200", "300"), &sink);
        tag(&user("Davi8909Garcia", "5000", "1200", "300"), &sink);
        assert_eq!(
            sink.lines(),
            vec![
                "Grace Davis is not a spender.".to_string(),
                "Tagging user: Davi8909Garcia, failed due to Invalid name: Davi8909Garcia -name should contain only letters and at most one space.".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_name_reports_unknown_user() {
        let sink = MemorySink::new();
        tag(&Record::new(json!({"expenses": {}})), &sink);
        assert_eq!(
            sink.lines(),
            vec!["Tagging user: <unknown>, failed due to missing field 'user.name'".to_string()]
        );
    }

    #[test]
    fn test_tag_all_dispatches_on_strategy() {
        let records = vec![
            user("Grace Davis", "5000", "1200", "300"),
            user("Hank Martinez", "3000", "2500", "900"),
        ];

        let sequential = MemorySink::new();
        tag_all(&records, Strategy::Sequential, &sequential).unwrap();

        let parallel = MemorySink::new();
        tag_all(&records, Strategy::Parallel, &parallel).unwrap();

        let mut expected = sequential.lines();
        let mut actual = parallel.lines();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_every_record_waits_simulated_work() {
        let records = vec![
            user("Grace Davis", "5000", "1200", "300"),
            user("Davi8909Garcia", "4000", "1000", "500"),
            user("Hank Martinez", "3000", "", "900"),
        ];

        let sink = MemorySink::new();
        let started = std::time::Instant::now();
        tag_all_sequential(&records, &sink);
        let elapsed = started.elapsed();

        assert_eq!(sink.len(), 3);
        assert!(
            elapsed >= SIMULATED_WORK * records.len() as u32,
            "three records finished in {:?}",
            elapsed
        );
    }

    #[test]
    fn test_worker_count_positive() {
        assert!(worker_count() >= 1);
    }
}
