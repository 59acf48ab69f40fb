use crate::utils::error::{PosError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> PosError {
    PosError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Catalog endpoints must be absolute `http` or `https` URLs.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str).map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(invalid(field_name, url_str, format!("Unsupported URL scheme: {}", url.scheme())))
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        Err(invalid(field_name, path, "Path cannot be empty"))
    } else if path.contains('\0') {
        Err(invalid(field_name, path, "Path contains null bytes"))
    } else {
        Ok(())
    }
}

/// Case-insensitive check of `file`'s extension against `allowed_extensions`.
pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let Some(extension) = Path::new(file).extension().and_then(|ext| ext.to_str()) else {
        return Err(invalid(field_name, file, "File has no extension"));
    };

    if allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(extension)) {
        Ok(())
    } else {
        Err(invalid(
            field_name,
            file,
            format!("Expected a .{} file", allowed_extensions.join(" or .")),
        ))
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PosError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(field_name: &str, value: T, min: T, max: T) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field_name, value, format!("Value must be between {} and {}", min, max)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog.endpoint", "https://abc.supabase.co").is_ok());
        assert!(validate_url("catalog.endpoint", "http://localhost:54321").is_ok());
        assert!(validate_url("catalog.endpoint", "").is_err());
        assert!(validate_url("catalog.endpoint", "invalid-url").is_err());
        assert!(validate_url("catalog.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("catalog.path", "productos.csv", &["csv", "json"]).is_ok());
        assert!(validate_file_extension("catalog.path", "PRODUCTOS.JSON", &["csv", "json"]).is_ok());
        assert!(validate_file_extension("catalog.path", "plu_kretz.txt", &["csv", "json"]).is_err());
        assert!(validate_file_extension("catalog.path", "catalog", &["csv", "json"]).is_err());

        match validate_file_extension("catalog.path", "plu.txt", &["csv", "json"]) {
            Err(PosError::InvalidConfigValueError { reason, .. }) => {
                assert_eq!(reason, "Expected a .csv or .json file")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("--catalog", "productos.csv").is_ok());
        assert!(validate_path("--catalog", "").is_err());
        assert!(validate_path("--catalog", "bad\0path.csv").is_err());
    }

    #[test]
    fn test_validate_range_and_required() {
        assert!(validate_range("matcher.loose_min_len", 3, 1, 10).is_ok());
        assert!(validate_range("matcher.loose_min_len", 0, 1, 10).is_err());
        assert!(validate_range("catalog.timeout_seconds", 300u64, 1, 300).is_ok());

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("catalog.endpoint", &missing),
            Err(PosError::MissingConfigError { .. })
        ));
        assert!(validate_non_empty_string("store.id", "  ").is_err());
    }
}
