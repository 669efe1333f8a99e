use crate::utils::error::{Result, SplitError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A bare file name that stays inside the output directory.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    let reason = if name.contains('/') || name.contains('\\') {
        Some("File name must not contain path separators")
    } else if name == "." || name == ".." {
        Some("File name must not refer to a directory")
    } else if name.contains('\0') {
        Some("File name contains null bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(SplitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}
