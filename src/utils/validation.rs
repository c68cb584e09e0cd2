use crate::utils::error::{HktError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HktError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// 密鑰與 Drive id 不可為空白；錯誤訊息不回顯內容
pub fn validate_non_empty_secret(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HktError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HktError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("google.api_base", "https://www.googleapis.com").is_ok());
        assert!(validate_url("google.api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("google.api_base", "").is_err());
        assert!(validate_url("google.api_base", "invalid-url").is_err());
        assert!(validate_url("google.api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("workflow.input_file", "HomeKitaTage.xlsx").is_ok());
        assert!(validate_path("workflow.input_file", "").is_err());
        assert!(validate_path("workflow.input_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["xlsx", "xls"];
        assert!(validate_file_extension("input_file", "HomeKitaTage.xlsx", &allowed).is_ok());
        assert!(validate_file_extension("input_file", "HomeKitaTage.XLSX", &allowed).is_ok());
        assert!(validate_file_extension("input_file", "HomeKitaTage.csv", &allowed).is_err());
        assert!(validate_file_extension("input_file", "HomeKitaTage", &allowed).is_err());
    }

    #[test]
    fn test_validate_non_empty_secret_hides_value() {
        let err = validate_non_empty_secret("GOOGLE_WORKSPACE_SERVICE_ACCOUNT_KEY", "  ").unwrap_err();
        assert!(matches!(err, HktError::MissingConfigError { .. }));
        assert!(validate_non_empty_secret("INPUT_FILE_ID", "1AbC").is_ok());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("google.request_timeout_seconds", 60, 1, 600).is_ok());
        assert!(validate_range("google.request_timeout_seconds", 0, 1, 600).is_err());
        assert!(validate_range("google.request_timeout_seconds", 601, 1, 600).is_err());
    }
}
