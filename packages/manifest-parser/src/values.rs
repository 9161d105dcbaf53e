//! Semi-structured value tree shared by the XML loader and all handlers.
//!
//! Paths are `.`-separated dictionary keys. By convention the loader stores
//! attributes under `@name`, element text under `#text` and the resolved
//! namespace URI under `@namespace`, so `widget.application.@id` addresses
//! the `id` attribute of `<widget><application id="..."/></widget>`.
//!
//! Lookups never panic: a missing segment or a segment of the wrong variant
//! is simply a miss.

use std::collections::BTreeMap;
use std::fmt;

/// A node of the semi-structured value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Dictionary(Dictionary),
    List(Vec<Value>),
}

impl Value {
    /// Human-readable variant name, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Dictionary(_) => "dictionary",
            Value::List(_) => "list",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of the value.
    ///
    /// Strings are parsed, since XML text and attributes always arrive as
    /// strings. Text that is not an integer is a miss.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Int(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s == "true" => Some(true),
            Value::String(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dictionary_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Dictionary(d) => write!(f, "{{{} keys}}", d.len()),
            Value::List(items) => write!(f, "[{} items]", items.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dictionary(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// String-keyed map of values with path-based access.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, Value>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Direct child lookup; `key` may contain dots.
    #[must_use]
    pub fn get_without_path_expansion(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Direct child insertion; `key` may contain dots.
    pub fn insert_without_path_expansion(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up the value at `path`.
    ///
    /// # Examples
    /// ```
    /// use manifest_parser::{Dictionary, Value};
    ///
    /// let mut dict = Dictionary::new();
    /// dict.set_string("widget.@id", "http://example.com/app");
    /// assert_eq!(dict.get_string("widget.@id"), Some("http://example.com/app"));
    /// assert!(dict.get("widget.@id.deeper").is_none());
    /// assert!(matches!(dict.get("widget"), Some(Value::Dictionary(_))));
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;
        for segment in segments {
            current = current.as_dictionary()?.entries.get(segment)?;
        }
        Some(current)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        let mut segments = path.split('.');
        let mut current = self.entries.get_mut(segments.next()?)?;
        for segment in segments {
            current = current.as_dictionary_mut()?.entries.get_mut(segment)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Integer at `path`; non-numeric text is a miss.
    #[must_use]
    pub fn get_integer(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_integer)
    }

    #[must_use]
    pub fn get_double(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_double)
    }

    /// Boolean at `path`; the strings `"true"` and `"false"` are accepted.
    #[must_use]
    pub fn get_boolean(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_dictionary(&self, path: &str) -> Option<&Dictionary> {
        self.get(path).and_then(Value::as_dictionary)
    }

    #[must_use]
    pub fn get_list(&self, path: &str) -> Option<&[Value]> {
        self.get(path).and_then(Value::as_list)
    }

    /// Whether `key` is a direct child, without path expansion.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Store `value` at `path`, creating intermediate dictionaries.
    ///
    /// An intermediate segment that holds a non-dictionary value is replaced
    /// by an empty dictionary.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let value = value.into();
        match path.split_once('.') {
            None => {
                self.entries.insert(path.to_string(), value);
            }
            Some((head, rest)) => {
                let child = self
                    .entries
                    .entry(head.to_string())
                    .or_insert_with(|| Value::Dictionary(Dictionary::new()));
                if !matches!(child, Value::Dictionary(_)) {
                    *child = Value::Dictionary(Dictionary::new());
                }
                if let Value::Dictionary(dict) = child {
                    dict.set(rest, value);
                }
            }
        }
    }

    pub fn set_string(&mut self, path: &str, value: impl Into<String>) {
        self.set(path, Value::String(value.into()));
    }

    /// Remove and return the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        match path.rsplit_once('.') {
            None => self.entries.remove(path),
            Some((parent, last)) => self
                .get_mut(parent)?
                .as_dictionary_mut()?
                .entries
                .remove(last),
        }
    }
}

impl FromIterator<(String, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
