/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Phone numbers: optional; digits with `+ - ( )` and spaces, 5-20 chars.
pub fn validate_phone(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    if !allowed || !(5..=20).contains(&trimmed.len()) || digits < 5 {
        return Some(format!("{field_name} must be a valid phone number"));
    }
    None
}
