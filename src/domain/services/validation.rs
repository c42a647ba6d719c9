use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::domain::models::booking::BookingSubmission;
use crate::error::AppError;

/// Turns a raw JSON body into a typed submission with defaults applied.
///
/// Shape errors (wrong types, unknown trip type, missing attendee) and field
/// rules (required date/time/name, email syntax) both end up as a list of
/// field-level messages in [`AppError::InvalidSubmission`].
pub fn parse_submission(body: Value) -> Result<BookingSubmission, AppError> {
    if !body.is_object() {
        return Err(AppError::InvalidSubmission(vec!["Request body must be a JSON object".into()]));
    }

    let submission: BookingSubmission =
        serde_json::from_value(body).map_err(|e| AppError::InvalidSubmission(vec![e.to_string()]))?;

    submission
        .validate()
        .map_err(|errors| AppError::InvalidSubmission(collect_messages(&errors)))?;

    Ok(submission)
}

/// Flattens validator output into sorted `path: message` strings.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    walk(errors, "", &mut messages);
    messages.sort();
    messages
}

fn walk(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => walk(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    walk(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}
