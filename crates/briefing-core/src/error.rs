use std::fmt;

/// Error for schema ingestion, page handling and controller misuse.
///
/// `code` is a stable machine-readable tag (`schema.parse`,
/// `page.invalid`, ...); `message` is for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub code: String,
    pub message: String,
}

impl FormError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.message)
    }
}

impl std::error::Error for FormError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code_and_message() {
        let err = FormError::new("page.invalid", "no such page");
        assert_eq!(err.to_string(), "page.invalid - no such page");
    }
}
