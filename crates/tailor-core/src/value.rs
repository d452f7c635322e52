//! Prop values and insertion-ordered prop bags.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::target::Target;

/// Inline style declarations keyed by property name, in insertion order.
pub type StyleMap = IndexMap<String, String>;

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicitly unset. Never forwarded to the rendered element.
    Undefined,
    /// Boolean flag: `disabled`, `outlined`
    Bool(bool),
    /// Numeric value: `tabIndex={0}`
    Number(f64),
    /// String value: `type="button"`
    String(String),
    /// Inline style object
    Style(StyleMap),
    /// Element type or component, used by `as` and `forwardedAs`
    Target(Target),
}

impl Value {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool if it's a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the style map if this is a style value.
    pub fn as_style(&self) -> Option<&StyleMap> {
        match self {
            Value::Style(style) => Some(style),
            _ => None,
        }
    }

    /// Whether this value is [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Key used to look this value up in a variant table.
    ///
    /// `true` and [`Value::Undefined`] select the `"true"` entry, strings and
    /// numbers select their string form. `false`, styles and targets select
    /// nothing.
    pub fn variant_key(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Bool(true) | Value::Undefined => Some(Cow::Borrowed("true")),
            Value::Bool(false) => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(format_number(*n))),
            Value::Style(_) | Value::Target(_) => None,
        }
    }

    /// Text contributed to a class list, if any.
    pub fn class_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(format_number(*n))),
            _ => None,
        }
    }
}

/// Format a number the way it reads in markup: `2` rather than `2.0`.
///
/// Very large and very small magnitudes use exponent form (`1e+21`, `1e-7`),
/// with the same thresholds as JavaScript number stringification.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        return format!("{sign}Infinity");
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // Shortest round-trip digits and exponent, e.g. "1.2345e3"
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    // Position of the decimal point relative to the first digit
    let point = exponent + 1;
    let len = digits.len() as i32;
    let sign = if n < 0.0 { "-" } else { "" };

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let exponent_sign = if exponent < 0 { "-" } else { "+" };
        if rest.is_empty() {
            format!("{first}e{exponent_sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{exponent_sign}{}", exponent.abs())
        }
    };

    format!("{sign}{body}")
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<StyleMap> for Value {
    fn from(value: StyleMap) -> Self {
        Value::Style(value)
    }
}

impl From<Target> for Value {
    fn from(value: Target) -> Self {
        Value::Target(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// Shape accepted from manifest files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Number(f64),
    String(String),
    Style(StyleMap),
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Number(n) => Value::Number(n),
            RawValue::String(s) => Value::String(s),
            RawValue::Style(style) => Value::Style(style),
        })
    }
}

impl Serialize for Value {
    /// Targets are written as their tag or component name.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Style(style) => style.serialize(serializer),
            Value::Target(target) => serializer.serialize_str(&target.component_name()),
        }
    }
}

/// Insertion-ordered prop bag.
///
/// Every render stage walks the keys in this order and visits each key once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(IndexMap<String, Value>);

impl Props {
    /// Create an empty prop bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, keeping the key's original position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a value mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether the key is present and not [`Value::Undefined`].
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_undefined())
    }

    /// Whether the key is present at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a key, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Props {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Recursively merge `overlay` onto `base`.
///
/// Style maps present on both sides are merged key by key. Every other
/// value from `overlay` replaces the one in `base`.
pub fn deep_merge(mut base: Props, overlay: Props) -> Props {
    for (key, value) in overlay {
        let merged = match (base.get(&key), value) {
            (Some(Value::Style(existing)), Value::Style(style)) => {
                let mut merged = existing.clone();
                merged.extend(style);
                Value::Style(merged)
            }
            (_, value) => value,
        };
        base.insert(key, merged);
    }
    base
}
