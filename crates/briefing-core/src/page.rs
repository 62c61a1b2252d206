use crate::error::FormError;
use serde::{Deserialize, Serialize};

/// The two pages of a briefing form. Anything else is a caller defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPage {
    Request,
    User,
}

impl FormPage {
    pub fn parse(name: &str) -> Result<Self, FormError> {
        match name {
            "request" => Ok(FormPage::Request),
            "user" => Ok(FormPage::User),
            other => Err(FormError::new(
                "page.invalid",
                format!("'{other}' is not a form page (expected 'request' or 'user')"),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormPage::Request => "request",
            FormPage::User => "user",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_pages() {
        assert_eq!(FormPage::parse("request").unwrap(), FormPage::Request);
        assert_eq!(FormPage::parse("user").unwrap(), FormPage::User);
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for bad in ["", "Request", "users", "admin"] {
            let err = FormPage::parse(bad).unwrap_err();
            assert_eq!(err.code, "page.invalid");
        }
    }

    #[test]
    fn test_round_trip_as_str() {
        assert_eq!(FormPage::parse(FormPage::User.as_str()).unwrap(), FormPage::User);
    }
}
