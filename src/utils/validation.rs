use crate::utils::error::{LeadError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Extensions accepted for the input file.
pub const INPUT_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

pub const MAX_TOP_N: usize = 1000;

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LeadError::InvalidConfigValueError {
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
        Some(extension) => Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses a delimiter setting: `auto` -> `None`, `tab`/`\t` -> tab, or a single ASCII character.
pub fn parse_delimiter(field_name: &str, value: &str) -> Result<Option<u8>> {
    let invalid = |reason: &str| LeadError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value {
        "auto" | "" => Ok(None),
        "tab" | "\\t" | "\t" => Ok(Some(b'\t')),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => match c {
                    '"' | '\r' | '\n' => Err(invalid("Quote and line breaks cannot be delimiters")),
                    _ => Ok(Some(c as u8)),
                },
                (Some(_), None) => Err(invalid("Delimiter must be an ASCII character")),
                _ => Err(invalid("Delimiter must be 'auto', 'tab' or a single character")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "leads.csv").is_ok());
        assert!(validate_path("input", "  ").is_err());
        assert!(validate_path("input", "lea\0ds.csv").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "data/leads.csv", &INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "LEADS.CSV", &INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "leads.xlsx", &INPUT_EXTENSIONS).is_err());
        assert!(validate_file_extension("input", "leads", &INPUT_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("top_n", 10, 1, MAX_TOP_N).is_ok());
        assert!(validate_range("top_n", 0, 1, MAX_TOP_N).is_err());
        assert!(validate_range("top_n", 1001, 1, MAX_TOP_N).is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("delimiter", "auto").unwrap(), None);
        assert_eq!(parse_delimiter("delimiter", "tab").unwrap(), Some(b'\t'));
        assert_eq!(parse_delimiter("delimiter", ";").unwrap(), Some(b';'));
        assert!(parse_delimiter("delimiter", "\"").is_err());
        assert!(parse_delimiter("delimiter", ";;").is_err());
        assert!(parse_delimiter("delimiter", "é").is_err());
    }
}
