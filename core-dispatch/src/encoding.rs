//! Parameter encoding for plain and multipart requests.
//!
//! Form encoding walks parameters in key order. Nested objects flatten to
//! `key[sub]`, arrays to repeated `key[]`, booleans become `1`/`0` and null
//! becomes an empty value. Keys and values are percent-encoded.

use serde_json::Value;

use crate::request::Parameters;

/// Encode parameters as `application/x-www-form-urlencoded` text.
pub fn encode_form(parameters: &Parameters) -> String {
    let mut components = Vec::new();

    for (key, value) in parameters {
        query_components(key, value, &mut components);
    }

    components
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_components(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (nested_key, nested) in map {
                query_components(&format!("{}[{}]", key, nested_key), nested, out);
            }
        }
        Value::Array(items) => {
            let array_key = format!("{}[]", key);
            for item in items {
                query_components(&array_key, item, out);
            }
        }
        Value::Bool(flag) => out.push((escape(key), if *flag { "1" } else { "0" }.to_string())),
        Value::Null => out.push((escape(key), String::new())),
        Value::Number(number) => out.push((escape(key), escape(&number.to_string()))),
        Value::String(text) => out.push((escape(key), escape(text))),
    }
}

fn escape(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Append an encoded query to `url`, keeping any existing query and fragment.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };

    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };

    let mut out = format!("{}{}{}", base, separator, query);
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// String form of a parameter sent as a multipart text field.
///
/// Strings go out verbatim; every other value is rendered as compact JSON.
pub fn form_field_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
