use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

/// Build a rule violation with a human-readable message
pub fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Reject strings that are empty or whitespace only
pub fn require_text(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("blank", message));
    }
    Ok(())
}

/// Same as [`require_text`] but an absent value passes (partial updates)
pub fn require_text_if_present(
    value: Option<&str>,
    message: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => require_text(v, message),
        None => Ok(()),
    }
}

/// Largest price a `NUMERIC(10,2)` column can hold, exclusive
const PRICE_LIMIT: i64 = 100_000_000;

/// Price must be >= 0, below 100 000 000 and carry at most two decimal places
pub fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(rule_error(
            "price_negative",
            "Price must be greater than or equal to 0",
        ));
    }
    if *price >= Decimal::from(PRICE_LIMIT) {
        return Err(rule_error(
            "price_too_large",
            "Price must be less than 100000000",
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(rule_error(
            "price_precision",
            "Price cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}

/// Length limit in characters, counted after trimming
pub fn max_trimmed_chars(
    value: &str,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().chars().count() > max {
        return Err(rule_error("length", message));
    }
    Ok(())
}

pub fn positive_duration(minutes: i32) -> Result<(), ValidationError> {
    if minutes < 1 {
        return Err(rule_error(
            "duration_not_positive",
            "Duration must be a positive number of minutes",
        ));
    }
    Ok(())
}

/// Flatten validator output into one message per violation, ordered by field name
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, e.code),
            })
        })
        .collect()
}
