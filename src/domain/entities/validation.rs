use std::borrow::Cow;

use validator::ValidationError;

use crate::entities::option_fields::OptionField;

pub const MAX_TITLE_LENGTH: u64 = 200;
pub const MAX_SLUG_LENGTH: u64 = 255;

// ───── Plain values ─────────────────────────────────────────────────

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, underscores or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

/// A blank slug on creation means "derive it from the title".
pub fn validate_slug_input(slug: &str) -> Result<(), ValidationError> {
    if slug.trim().is_empty() {
        return Ok(());
    }
    validate_slug(slug)
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(new_validation_error("title_blank", "Title cannot be blank"));
    }
    Ok(())
}

// ───── PATCH fields ─────────────────────────────────────────────────

pub fn validate_required_field<T>(value: &OptionField<T>) -> Result<(), ValidationError> {
    if value.is_set_to_null() {
        return Err(new_validation_error("required", "This field cannot be null"));
    }
    Ok(())
}

pub fn validate_title_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    validate_required_field(value)?;
    if let OptionField::SetToValue(title) = value {
        validate_title(title)?;
    }
    Ok(())
}

/// Slug edits must be explicit: a blank or null slug keeps the stored one.
pub fn validate_slug_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(slug) = value {
        validate_slug_input(slug)?;
    }
    Ok(())
}

pub fn validate_url_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(url) = value {
        validate_url(url)?;
    }
    Ok(())
}

pub fn validate_required_url_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    validate_required_field(value)?;
    validate_url_field(value)
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_style_slugs() {
        assert!(validate_slug("race-condition").is_ok());
        assert!(validate_slug("rust_2024").is_ok());
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Has Spaces").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("double--hyphen").is_err());
    }

    #[test]
    fn blank_slug_input_is_allowed() {
        assert!(validate_slug_input("").is_ok());
        assert!(validate_slug_input("  ").is_ok());
        assert!(validate_slug_input("Bad Slug").is_err());
    }

    #[test]
    fn urls_need_http_scheme() {
        assert!(validate_url("https://github.com/me/repo").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn required_fields_reject_null() {
        assert!(validate_required_field(&OptionField::<bool>::SetToNull).is_err());
        assert!(validate_required_field(&OptionField::<bool>::Unchanged).is_ok());
        assert!(validate_required_url_field(&OptionField::SetToValue("nope".to_string())).is_err());
    }
}
