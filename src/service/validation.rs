//! Form validation from schema-derived rules.

use crate::error::AppError;
use crate::response::Row;
use crate::schema::ValidationRule;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

pub struct FormValidator;

impl FormValidator {
    /// Validate a form body against per-field rules. All required fields
    /// must be present and non-null.
    pub fn validate(
        body: &Row,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (field, rule) in rules {
            let val = body.get(field);
            if rule.required == Some(true)
                && (val.is_none() || val == Some(&Value::Null) || is_blank(val))
            {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
            if let Some(v) = val {
                validate_field(field, v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (partial update). Required
    /// is not enforced for missing fields.
    pub fn validate_partial(
        body: &Row,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<(), AppError> {
        for (field, v) in body {
            if let Some(rule) = rules.get(field) {
                validate_field(field, v, rule)?;
            }
        }
        Ok(())
    }
}

fn is_blank(val: Option<&Value>) -> bool {
    matches!(val, Some(Value::String(s)) if s.trim().is_empty())
}

fn validate_field(field: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    if let Some(format) = &rule.format {
        validate_format(field, v, format)?;
    }
    if let Some(max) = rule.max_length {
        if let Some(s) = v.as_str() {
            if s.len() > max as usize {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    field, max
                )));
            }
        }
    }
    if let Some(min) = rule.min_length {
        if let Some(s) = v.as_str() {
            if s.len() < min as usize {
                return Err(AppError::Validation(format!(
                    "{} must be at least {} characters",
                    field, min
                )));
            }
        }
    }
    if let Some(ref pattern) = rule.pattern {
        let re = Regex::new(pattern)
            .map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
        if let Some(s) = v.as_str() {
            if !re.is_match(s) {
                return Err(AppError::Validation(format!(
                    "{} does not match required pattern",
                    field
                )));
            }
        }
    }
    if let Some(ref allowed) = rule.allowed {
        if !allowed.iter().any(|a| value_eq(v, a)) {
            return Err(AppError::Validation(format!(
                "{} must be one of: {:?}",
                field,
                allowed.iter().take(5).collect::<Vec<_>>()
            )));
        }
    }
    if let Some(min) = rule.minimum {
        if let Some(n) = v.as_f64() {
            if n < min {
                return Err(AppError::Validation(format!(
                    "{} must be at least {}",
                    field, min
                )));
            }
        }
    }
    if let Some(max) = rule.maximum {
        if let Some(n) = v.as_f64() {
            if n > max {
                return Err(AppError::Validation(format!(
                    "{} must be at most {}",
                    field, max
                )));
            }
        }
    }
    Ok(())
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(s), Value::String(t)) => s == t,
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

fn validate_format(field: &str, v: &Value, format: &str) -> Result<(), AppError> {
    let Some(s) = v.as_str() else {
        return Ok(());
    };
    match format.to_lowercase().as_str() {
        "email" => {
            if !s.contains('@') || s.len() < 3 {
                return Err(AppError::Validation(format!(
                    "{} must be a valid email",
                    field
                )));
            }
        }
        "url" => {
            if !s.starts_with("http://") && !s.starts_with("https://") {
                return Err(AppError::Validation(format!("{} must be a valid URL", field)));
            }
        }
        "uuid" => {
            if uuid::Uuid::parse_str(s).is_err() {
                return Err(AppError::Validation(format!(
                    "{} must be a valid UUID",
                    field
                )));
            }
        }
        "date" => {
            if chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                return Err(AppError::Validation(format!(
                    "{} must be a date (YYYY-MM-DD)",
                    field
                )));
            }
        }
        "time" => {
            let ok = chrono::NaiveTime::parse_from_str(s, "%H:%M").is_ok()
                || chrono::NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok();
            if !ok {
                return Err(AppError::Validation(format!(
                    "{} must be a time (HH:MM)",
                    field
                )));
            }
        }
        _ => {}
    }
    Ok(())
}
