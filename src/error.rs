use std::fmt;

use thiserror::Error;

/// Form fields that must be filled before a listing is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Link,
    Image,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Title => "title",
            RequiredField::Link => "link",
            RequiredField::Image => "image",
        };
        write!(f, "{name}")
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Missing required field(s): {}", join_fields(.missing))]
    Validation { missing: Vec<RequiredField> },

    #[error("Project {id} not found")]
    NotFound { id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(String),
}

impl CatalogError {
    /// Fields reported by a validation failure; empty for every other kind.
    pub fn missing_fields(&self) -> &[RequiredField] {
        match self {
            CatalogError::Validation { missing } => missing,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_missing_field() {
        let err = CatalogError::Validation {
            missing: vec![RequiredField::Title, RequiredField::Image],
        };
        assert_eq!(err.to_string(), "Missing required field(s): title, image");
        assert_eq!(
            err.missing_fields(),
            &[RequiredField::Title, RequiredField::Image]
        );
    }

    #[test]
    fn not_found_names_the_id() {
        let err = CatalogError::NotFound { id: "42".into() };
        assert_eq!(err.to_string(), "Project 42 not found");
        assert!(err.missing_fields().is_empty());
    }
}
