//! Per-type validation of submitted custom field values.
//!
//! [`clean_value`] turns the raw form value into the canonical string that is
//! stored in `ticket_custom_field_values`, or returns the message shown next to
//! the field.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use db::models::custom_field::{CustomFieldType, Model as CustomFieldModel};
use std::net::IpAddr;
use validator::{ValidateEmail, ValidateUrl};

pub const REQUIRED: &str = "This field is required.";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Validates `raw` against `field` and returns the value to store.
///
/// `raw` is `None` when the key was absent from the submission. Booleans follow
/// checkbox semantics: any non-false value means checked.
pub fn clean_value(field: &CustomFieldModel, raw: Option<&str>) -> Result<String, String> {
    if field.data_type == CustomFieldType::Boolean {
        return clean_boolean(field, raw);
    }

    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        return if field.required {
            Err(REQUIRED.to_string())
        } else {
            Ok(String::new())
        };
    }

    match field.data_type {
        CustomFieldType::Varchar | CustomFieldType::Text => check_length(field, value),
        CustomFieldType::Integer => value
            .parse::<i64>()
            .map(|n| n.to_string())
            .map_err(|_| "Enter a whole number.".to_string()),
        CustomFieldType::Decimal => check_decimal(field, value),
        CustomFieldType::List => {
            if field.choices().iter().any(|c| c == value) {
                Ok(value.to_string())
            } else {
                Err(format!(
                    "Select a valid choice. {value} is not one of the available choices."
                ))
            }
        }
        CustomFieldType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|_| "Enter a valid date.".to_string()),
        CustomFieldType::Time => NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .map(|t| t.format("%H:%M:%S").to_string())
            .map_err(|_| "Enter a valid time.".to_string()),
        CustomFieldType::Datetime => DATETIME_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .ok_or_else(|| "Enter a valid date/time.".to_string()),
        CustomFieldType::Email => {
            if value.validate_email() {
                check_length(field, value)
            } else {
                Err("Enter a valid email address.".to_string())
            }
        }
        CustomFieldType::Url => {
            let has_scheme = value.starts_with("http://") || value.starts_with("https://");
            if has_scheme && value.validate_url() {
                check_length(field, value)
            } else {
                Err("Enter a valid URL.".to_string())
            }
        }
        CustomFieldType::Ipaddress => value
            .parse::<IpAddr>()
            .map(|ip| ip.to_string())
            .map_err(|_| "Enter a valid IPv4 or IPv6 address.".to_string()),
        CustomFieldType::Slug => {
            if value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                check_length(field, value)
            } else {
                Err("Enter a valid slug consisting of letters, numbers, underscores or hyphens."
                    .to_string())
            }
        }
        CustomFieldType::Boolean => clean_boolean(field, Some(value)),
    }
}

/// Checkbox semantics: absent, empty and the usual false spellings are unchecked.
pub fn is_checked(raw: Option<&str>) -> bool {
    raw.map(str::trim)
        .is_some_and(|v| !matches!(v.to_ascii_lowercase().as_str(), "" | "false" | "0" | "off"))
}

fn clean_boolean(field: &CustomFieldModel, raw: Option<&str>) -> Result<String, String> {
    let checked = is_checked(raw);
    if field.required && !checked {
        return Err(REQUIRED.to_string());
    }
    Ok(if checked { "True" } else { "False" }.to_string())
}

fn check_length(field: &CustomFieldModel, value: &str) -> Result<String, String> {
    let len = value.chars().count();
    match field.max_length {
        Some(max) if max >= 0 && len > max as usize => Err(format!(
            "Ensure this value has at most {max} characters (it has {len})."
        )),
        _ => Ok(value.to_string()),
    }
}

fn check_decimal(field: &CustomFieldModel, value: &str) -> Result<String, String> {
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let digits_ok = whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
        && !(whole.is_empty() && fraction.is_empty());
    if !digits_ok {
        return Err("Enter a number.".to_string());
    }

    if let Some(places) = field.decimal_places {
        if places >= 0 && fraction.len() > places as usize {
            return Err(format!(
                "Ensure that there are no more than {places} decimal places."
            ));
        }
    }

    Ok(value.to_string())
}
