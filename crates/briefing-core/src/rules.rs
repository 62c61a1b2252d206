use regex::Regex;
use std::sync::OnceLock;

pub const REQUIRED_MESSAGE: &str = "this field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "invalid email";
pub const CHOOSE_ONE_MESSAGE: &str = "select at least one option";

/// Value of the "nothing selected" option on single-select controls.
pub const UNSELECTED: &str = "-1";

const EMAIL_PATTERN: &str = r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// True when the value is empty after removing all whitespace.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Required rule for plain text-like fields.
pub fn check_text(value: &str) -> Option<&'static str> {
    if is_blank(value) {
        Some(REQUIRED_MESSAGE)
    } else {
        None
    }
}

/// Required rule plus address shape for email fields.
pub fn check_email(value: &str) -> Option<&'static str> {
    if is_blank(value) {
        Some(REQUIRED_MESSAGE)
    } else if !is_email(value) {
        Some(INVALID_EMAIL_MESSAGE)
    } else {
        None
    }
}

/// Required rule for single-select fields.
pub fn check_single_choice(value: &str) -> Option<&'static str> {
    if value == UNSELECTED {
        Some(REQUIRED_MESSAGE)
    } else {
        None
    }
}

/// Required rule for checkbox groups.
pub fn check_multi_choice(any_checked: bool) -> Option<&'static str> {
    if any_checked {
        None
    } else {
        Some(CHOOSE_ONE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \t \n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_text_rule() {
        assert_eq!(check_text("  "), Some(REQUIRED_MESSAGE));
        assert_eq!(check_text("anything"), None);
    }

    #[test]
    fn test_email_rule() {
        assert_eq!(check_email(""), Some(REQUIRED_MESSAGE));
        assert_eq!(check_email("not-an-email"), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(check_email("a@b.co"), None);
        assert_eq!(check_email("first.last+tag@mail.example.org"), None);
    }

    #[test]
    fn test_email_rejects_missing_domain_label() {
        assert_eq!(check_email("user@"), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(check_email("@example.com"), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_single_choice_rule() {
        assert_eq!(check_single_choice(UNSELECTED), Some(REQUIRED_MESSAGE));
        assert_eq!(check_single_choice("Homem"), None);
    }

    #[test]
    fn test_multi_choice_rule() {
        assert_eq!(check_multi_choice(false), Some(CHOOSE_ONE_MESSAGE));
        assert_eq!(check_multi_choice(true), None);
    }
}
