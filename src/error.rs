use thiserror::Error;

pub type GridmapResult<T> = Result<T, GridmapError>;

#[derive(Error, Debug)]
pub enum GridmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidResourceReference(String),

    #[error("Unexpected fields in node input")]
    SchemaMismatch {
        field: String,
        item_index: usize,
        description: String,
    },

    #[error("Invalid range format '{0}'")]
    InvalidRange(String),

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl GridmapError {
    /// Remediation hint attached to the error, if any
    pub fn description(&self) -> Option<&str> {
        match self {
            GridmapError::SchemaMismatch { description, .. } => Some(description),
            _ => None,
        }
    }

    /// Position of the offending input item, if the error is tied to one
    pub fn item_index(&self) -> Option<usize> {
        match self {
            GridmapError::SchemaMismatch { item_index, .. } => Some(*item_index),
            _ => None,
        }
    }

    /// Message and description joined for terminal and API output
    pub fn detailed(&self) -> String {
        match self.description() {
            Some(description) => format!("{}: {}", self, description),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_accessors() {
        let err = GridmapError::SchemaMismatch {
            field: "phone".to_string(),
            item_index: 3,
            description: "no column".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected fields in node input");
        assert_eq!(err.item_index(), Some(3));
        assert_eq!(err.description(), Some("no column"));
        assert_eq!(err.detailed(), "Unexpected fields in node input: no column");
    }

    #[test]
    fn test_plain_errors_have_no_description() {
        let err = GridmapError::SheetNotFound("Data".to_string());
        assert_eq!(err.to_string(), "Sheet 'Data' not found");
        assert!(err.description().is_none());
        assert!(err.item_index().is_none());
        assert_eq!(err.detailed(), "Sheet 'Data' not found");
    }
}
