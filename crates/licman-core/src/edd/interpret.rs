//! Turn a raw EDD response into a `ValidationResult`.

use crate::action::LicenseAction;
use crate::messages::{build_error_messages, DateFormatter};
use crate::provider::{RawResponse, ValidationResult, DEFAULT_LICENSE_STATUS};
use serde_json::{Map, Value};

pub(crate) fn interpret_response(
    raw: &RawResponse,
    action: LicenseAction,
    plugin_name: &str,
    formatter: &dyn DateFormatter,
) -> ValidationResult {
    let response = match &raw.outcome {
        Err(e) => {
            let messages = build_error_messages(plugin_name, None, formatter);
            let message = if e.message.trim().is_empty() {
                messages.default_message().to_string()
            } else {
                e.message.clone()
            };
            return ValidationResult::failure(message);
        }
        Ok(resp) => resp,
    };

    if !response.is_ok() {
        let messages = build_error_messages(plugin_name, None, formatter);
        return ValidationResult::failure(messages.default_message());
    }

    let body = match parse_body(&response.body) {
        Some(body) => body,
        None => {
            tracing::debug!("unparseable license response: {:?}", response.body_text());
            let messages = build_error_messages(plugin_name, None, formatter);
            return ValidationResult::failure(messages.default_message());
        }
    };

    let expires = body.get("expires").and_then(Value::as_str);
    let messages = build_error_messages(plugin_name, expires, formatter);

    let success = is_truthy(body.get("success"));
    let message = if success {
        messages.lookup_or_default(action.as_str())
    } else {
        match body.get("error").and_then(Value::as_str) {
            Some(code) => messages.lookup_or_default(code),
            None => messages.default_message().to_string(),
        }
    };
    let license_status = body
        .get("license")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LICENSE_STATUS)
        .to_string();

    ValidationResult {
        success,
        license_status,
        message,
        raw_response: Value::Object(body),
    }
}

/// Body must be a JSON object; anything else is a protocol error.
fn parse_body(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Loose truthiness: servers send `true`, `1` or `"1"` interchangeably.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Null) | None => false,
    }
}
