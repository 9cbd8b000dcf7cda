use crate::utils::error::{Result, TaggerError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();
    if raw.trim().is_empty() {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.contains('\0') {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 輸入檔必須已存在；輸出檔的目錄可以之後再建立
pub fn validate_existing_file(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, path)?;
    if !path.is_file() {
        return Err(TaggerError::InputNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(TaggerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", Path::new("out/output.json")).is_ok());
        assert!(validate_path("output_path", Path::new("")).is_err());
        assert!(validate_path("output_path", Path::new("  ")).is_err());
    }

    #[test]
    fn test_validate_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_existing_file("data_path", file.path()).is_ok());

        let missing = PathBuf::from("definitely/not/here.csv");
        match validate_existing_file("data_path", &missing) {
            Err(TaggerError::InputNotFound { path }) => assert!(path.contains("here.csv")),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("iterations", 3, 1).is_ok());
        assert!(validate_positive_number("iterations", 0, 1).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        let allowed = ["sequential", "parallel"];
        assert!(validate_one_of("classify.strategy", "parallel", &allowed).is_ok());
        assert!(validate_one_of("classify.strategy", "random", &allowed).is_err());
    }
}
