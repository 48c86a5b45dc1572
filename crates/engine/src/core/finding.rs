use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Finding {
    pub analysis: String,

    pub file: String,

    pub line: usize,

    pub column: usize,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub severity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub offset: Option<usize>,
}

impl Finding {
    pub fn new(analysis: String, file: String, line: usize, message: String) -> Self {
        Self {
            analysis,
            file,
            line,
            column: 0,
            message,
            severity: None,
            offset: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_severity(mut self, severity: &str) -> Self {
        self.severity = Some(severity.to_string());
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Key used by line-level deduplication: two findings on the same
    /// file and line are considered reports of one problem.
    pub fn line_key(&self) -> (&str, usize) {
        (&self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_optional_fields() {
        let finding = Finding::new(
            "line-length".to_string(),
            "src/lib.rs".to_string(),
            12,
            "line is 140 characters long, limit is 120".to_string(),
        )
        .with_column(121)
        .with_severity("warning")
        .with_offset(512);

        assert_eq!(finding.column, 121);
        assert_eq!(finding.severity.as_deref(), Some("warning"));
        assert_eq!(finding.offset, Some(512));
        assert_eq!(finding.line_key(), ("src/lib.rs", 12));
    }

    #[test]
    fn test_serialization_skips_empty_optionals() {
        let finding = Finding::new(
            "trailing-space".to_string(),
            "main.rs".to_string(),
            3,
            "trailing whitespace".to_string(),
        );

        let json = serde_json::to_string(&finding).unwrap();
        assert!(!json.contains("severity"));
        assert!(!json.contains("offset"));

        let back: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, finding);
    }
}
