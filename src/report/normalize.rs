//! Record flattening.
//!
//! Every API record is reduced to a single-level row of display values:
//! foreign keys resolve through the lookup table, timestamps are formatted,
//! nested objects collapse to their most human field and arrays are joined.

use crate::domain::model::{FlatRow, FlatValue, LookupTable, Record};
use crate::report::format::{format_number, format_timestamp};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("Invalid regex")
});

const OBJECT_LABEL_KEYS: [&str; 5] = ["code", "full_name", "name", "username", "email"];

/// A JSON value sorted into the shapes the normalizer distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Bool(bool),
    Number(&'a serde_json::Number),
    Text(&'a str),
    Timestamp(NaiveDateTime),
    Object(&'a Map<String, Value>),
    List(&'a [Value]),
}

impl<'a> FieldValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => match parse_date_like(s) {
                Some(ts) => FieldValue::Timestamp(ts),
                None => FieldValue::Text(s),
            },
            Value::Array(items) => FieldValue::List(items),
            Value::Object(obj) => FieldValue::Object(obj),
        }
    }
}

/// Flatten every record, preserving record and key order.
pub fn flatten_data(records: &[Record], lookups: Option<&LookupTable>) -> Vec<FlatRow> {
    records
        .iter()
        .map(|record| flatten_record(record, lookups))
        .collect()
}

pub fn flatten_record(record: &Record, lookups: Option<&LookupTable>) -> FlatRow {
    let mut row = FlatRow::new();
    for (key, value) in record {
        row.push(key.clone(), flatten_field(key, value, lookups));
    }

    let has_currency = row.get("currency").map(|v| !v.is_blank()).unwrap_or(false);
    if has_currency && row.contains_key("currency_code") {
        row.remove("currency_code");
    }

    row
}

fn flatten_field(key: &str, value: &Value, lookups: Option<&LookupTable>) -> FlatValue {
    if let (Some(lookups), Value::String(raw)) = (lookups, value) {
        if let Some(resolved) = resolve_lookup(key, raw, lookups) {
            return FlatValue::text(resolved);
        }
    }

    match FieldValue::classify(value) {
        FieldValue::Timestamp(ts) => FlatValue::Text(format_timestamp(&ts)),
        FieldValue::List(items) => FlatValue::Text(flatten_list(items)),
        FieldValue::Object(obj) => FlatValue::Text(object_label(obj)),
        FieldValue::Text(s) if UUID_PATTERN.is_match(s) => FlatValue::Text(short_id(s)),
        FieldValue::Text(s) => FlatValue::text(s.trim()),
        FieldValue::Number(n) => FlatValue::Number(n.clone()),
        FieldValue::Bool(b) => FlatValue::Bool(b),
        FieldValue::Null => FlatValue::Null,
    }
}

fn resolve_lookup<'a>(key: &str, raw: &str, lookups: &'a LookupTable) -> Option<&'a str> {
    let lowered = key.to_lowercase();
    if lowered.contains("currency") {
        if let Some(code) = lookups.currencies.get(raw) {
            return Some(code);
        }
    }
    if lowered.contains("shipment") {
        if let Some(code) = lookups.shipments.get(raw) {
            return Some(code);
        }
    }
    None
}

/// ISO-8601 detection: only strings with a dash that either carry a `T` or are
/// exactly ten characters long are tried.
pub fn parse_date_like(s: &str) -> Option<NaiveDateTime> {
    if !s.contains('-') || !(s.contains('T') || s.len() == 10) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `#` followed by the first eight characters.
pub fn short_id(s: &str) -> String {
    format!("#{}", s.chars().take(8).collect::<String>())
}

fn flatten_list(items: &[Value]) -> String {
    if items.is_empty() {
        return "None".to_string();
    }

    if items.first().map(Value::is_object).unwrap_or(false) {
        return items
            .iter()
            .map(line_item_label)
            .collect::<Vec<_>>()
            .join(", ");
    }

    items
        .iter()
        .map(primitive_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// "Tilapia (5KG)" for manifest lines, or just the product name.
fn line_item_label(item: &Value) -> String {
    let name = ["/product_details/name", "/product/name", "/name"]
        .iter()
        .filter_map(|path| item.pointer(path))
        .find_map(non_empty_text)
        .unwrap_or_else(|| "Item".to_string());

    match item.get("quantity").filter(|q| !q.is_null()) {
        Some(quantity) => {
            let unit = match item.get("unit") {
                Some(Value::Object(unit)) => unit
                    .get("code")
                    .or_else(|| unit.get("name"))
                    .and_then(non_empty_text)
                    .unwrap_or_default(),
                Some(Value::String(unit)) => unit.clone(),
                _ => String::new(),
            };
            format!("{} ({}{})", name, primitive_text(quantity), unit)
        }
        None => name,
    }
}

fn object_label(obj: &Map<String, Value>) -> String {
    if let Some(label) = OBJECT_LABEL_KEYS
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(non_empty_text)
    {
        return label;
    }

    match obj.get("id") {
        Some(Value::String(id)) if id.chars().count() > 8 => short_id(id),
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(n)) => format_number(n),
        _ => serde_json::to_string(obj).unwrap_or_default(),
    }
}

/// Strings and numbers that are not empty; other shapes do not count as labels.
fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        _ => None,
    }
}

fn primitive_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
