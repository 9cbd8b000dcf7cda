use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Mismatch in columns between csv data and template (missing from csv: {missing:?}, not in template: {extra:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("Row {row}: key '{key}' not found in row")]
    RowFormatError { row: usize, key: String },

    #[error("Template is not valid json format (row {row}): {source}")]
    TemplateError {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected error when processing csv: {message}")]
    ProcessingError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Template,
    Output,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TaggerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TaggerError::InputNotFound { .. } | TaggerError::CsvError(_) => ErrorCategory::Input,
            TaggerError::SchemaMismatch { .. } | TaggerError::RowFormatError { .. } => {
                ErrorCategory::Schema
            }
            TaggerError::TemplateError { .. } => ErrorCategory::Template,
            TaggerError::IoError(_) | TaggerError::SerializationError(_) => ErrorCategory::Output,
            TaggerError::ConfigError { .. } | TaggerError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            TaggerError::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Output | ErrorCategory::Internal => ErrorSeverity::Critical,
            ErrorCategory::Input
            | ErrorCategory::Schema
            | ErrorCategory::Template
            | ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TaggerError::InputNotFound { .. } => "Check that the data path points to an existing csv file",
            TaggerError::SchemaMismatch { .. } => {
                "Make the csv header and the template placeholders use exactly the same names"
            }
            TaggerError::RowFormatError { .. } => "Check the csv row has a value for every column",
            TaggerError::TemplateError { .. } => {
                "Make sure the template is valid json once every placeholder is filled in"
            }
            TaggerError::CsvError(_) => "Check the csv file is well formed and utf-8 encoded",
            TaggerError::IoError(_) => "Check the output path is writable",
            TaggerError::SerializationError(_) => "Check the records can be serialized as json",
            TaggerError::ConfigError { .. } | TaggerError::InvalidConfigValueError { .. } => {
                "Fix the configuration and run again"
            }
            TaggerError::ProcessingError { .. } => "Inspect the input files for unexpected content",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TaggerError::InputNotFound { path } => {
                format!("Error opening data_path: {}, file not found", path)
            }
            TaggerError::SchemaMismatch { .. } => {
                "Mismatch in columns between csv data and template".to_string()
            }
            TaggerError::RowFormatError { key, .. } => format!("KeyError: '{}' not found in template", key),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaggerError>;

/// 單筆記錄分類失敗；只影響該筆，不會中止整個執行
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Invalid name: {name} -name should contain only letters and at most one space.")]
    NameValidation { name: String },

    #[error("invalid integer literal '{value}' in field '{field}'")]
    NumericParse { field: String, value: String },

    #[error("missing field '{field}'")]
    MissingField { field: String },

    #[error("integer overflow while summing '{field}'")]
    Overflow { field: String },
}
