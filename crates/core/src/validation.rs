//! Field-level validation helpers layered on the `validator` crate.
//!
//! DTOs derive [`validator::Validate`]; rejections are flattened by
//! [`field_error_map`] into `{ "path": ["message", ...] }` for the
//! `errors` member of a `VALIDATION_ERROR` response.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::slug::is_valid_slug;

/// Field path -> human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

static ISO_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid regex"));

/// Flatten nested `validator` errors into dotted / indexed paths such as
/// `statistics[1].label`.
pub fn field_error_map(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            // Struct-level (schema) errors are filed under the field named
            // by their code.
            ValidationErrorsKind::Field(list) if *field == "__all__" => {
                for error in list {
                    let path = if prefix.is_empty() {
                        error.code.to_string()
                    } else {
                        format!("{prefix}.{}", error.code)
                    };
                    out.entry(path).or_default().push(message_for(error));
                }
            }
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                messages.extend(list.iter().map(message_for));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "length" => "Invalid length".to_string(),
        "email" => "Must be a valid email address".to_string(),
        "url" => "Must be a valid URL".to_string(),
        "range" => "Value is out of range".to_string(),
        other => format!("Invalid value ({other})"),
    }
}

/// Build a one-field error map, for checks that happen outside `validator`.
pub fn single_field_error(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut out = FieldErrors::new();
    out.insert(field.to_string(), vec![message.into()]);
    out
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Rejects strings that are empty or whitespace only.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if !is_valid_slug(value) {
        return Err(error(
            "slug",
            "Slug may contain lowercase letters, digits and single hyphens",
        ));
    }
    Ok(())
}

/// A slug derived from `title` when none is given must not come out empty.
pub fn validate_derivable_slug(
    slug: Option<&str>,
    title: &str,
) -> Result<(), ValidationError> {
    if slug.is_none() && crate::slug::slugify(title).is_empty() {
        return Err(error(
            "slug",
            "Slug is required when the title has no letters or digits",
        ));
    }
    Ok(())
}

/// ISO 3166-1 alpha-3 country code, upper case (`AZE`).
pub fn validate_iso_code(value: &str) -> Result<(), ValidationError> {
    if !ISO_CODE_RE.is_match(value) {
        return Err(error(
            "iso_code",
            "ISO code must be three upper-case letters",
        ));
    }
    Ok(())
}

/// Page keys name the public page a section block belongs to (`blog`).
pub fn validate_page_key(value: &str) -> Result<(), ValidationError> {
    if !is_valid_slug(value) {
        return Err(error(
            "page_key",
            "Page key may contain lowercase letters, digits and single hyphens",
        ));
    }
    Ok(())
}
