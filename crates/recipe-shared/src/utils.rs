//! Utility functions

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims and drops empty strings.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().count() {
            0 => format!("***{}", domain),
            1 | 2 => format!("{}***{}", local.chars().next().unwrap_or('*'), domain),
            _ => format!("{}***{}", local.chars().take(2).collect::<String>(), domain),
        }
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("chef@example.com"), "ch***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("nope"), "***");
    }

    #[test]
    fn normalizes_emails() {
        assert_eq!(normalize_email("  Chef@Example.COM "), "chef@example.com");
    }

    #[test]
    fn non_empty_drops_blank_strings() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" pasta ".into())), Some("pasta".into()));
        assert_eq!(non_empty(None), None);
    }
}
