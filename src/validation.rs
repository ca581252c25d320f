//! Explicit request-body validation. Inputs arrive as raw JSON so that a
//! missing or mistyped field turns into a structured 400 body instead of an
//! extractor rejection; every rule violation is reported, not just the first.

use crate::models::{Condition, NewGiveaway};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn required_string(body: &Value, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            errors.push(FieldError::new(field, format!("{field} must not be empty")));
            None
        }
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a string")));
            None
        }
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

fn required_int(body: &Value, field: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    match body.get(field) {
        Some(value) => match value.as_i64() {
            Some(n) => Some(n),
            None => {
                errors.push(FieldError::new(field, format!("{field} must be an integer")));
                None
            }
        },
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

/// Validates a giveaway creation body. Required: title, description,
/// category, estimatedValue (cents, >= 0), imageUrl, hostUsername, duration
/// (1-30 days). Optional: condition, location.
pub fn new_giveaway(body: &Value) -> Result<NewGiveaway, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = required_string(body, "title", &mut errors);
    let description = required_string(body, "description", &mut errors);
    let category = required_string(body, "category", &mut errors);
    let image_url = required_string(body, "imageUrl", &mut errors);
    let host_username = required_string(body, "hostUsername", &mut errors);

    let estimated_value = required_int(body, "estimatedValue", &mut errors).and_then(|n| {
        if n >= 0 {
            Some(n)
        } else {
            errors.push(FieldError::new(
                "estimatedValue",
                "Estimated value must be at least $0",
            ));
            None
        }
    });

    let duration = required_int(body, "duration", &mut errors).and_then(|n| {
        if (1..=30).contains(&n) {
            Some(n)
        } else {
            errors.push(FieldError::new(
                "duration",
                "Duration must be between 1-30 days",
            ));
            None
        }
    });

    let condition = match body.get("condition") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match Condition::parse(s) {
            Some(condition) => Some(condition),
            None => {
                errors.push(FieldError::new(
                    "condition",
                    "condition must be one of: new, like-new, good, fair",
                ));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new("condition", "condition must be a string"));
            None
        }
    };

    let location = match body.get("location") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new("location", "location must be a string"));
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewGiveaway {
        // Unwraps cannot fire: a None above always pushed an error.
        title: title.unwrap(),
        description: description.unwrap(),
        category: category.unwrap(),
        estimated_value: estimated_value.unwrap(),
        image_url: image_url.unwrap(),
        host_username: host_username.unwrap(),
        duration: duration.unwrap(),
        condition,
        location,
    })
}
