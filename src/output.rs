//! Flattened rendering of components
//!
//! Components write their logical content into an [`OutputSink`] as
//! dotted key/value pairs (`relatedResource.link.href`); the sink then
//! formats the collected pairs as HTML meta tags, plain text lines or a
//! flat JSON object.

use crate::settings::IndexLevel;
use quick_xml::escape::escape;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Output format for rendered components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<meta name="key" content="value" />` lines
    #[default]
    Html,
    /// `key: value` lines
    Text,
    /// A flat JSON object; repeated keys become arrays
    Json,
}

impl OutputFormat {
    /// Parse an output format name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "html" => Some(OutputFormat::Html),
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Collects the key/value pairs a component tree renders to
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    entries: Vec<(String, String)>,
    index_level: IndexLevel,
}

impl OutputSink {
    /// Create an empty sink
    pub fn new(index_level: IndexLevel) -> Self {
        Self {
            entries: Vec::new(),
            index_level,
        }
    }

    /// Record a value; blank values are skipped
    pub fn push(&mut self, key: impl Into<String>, value: &str) {
        if !value.trim().is_empty() {
            self.entries.push((key.into(), value.to_string()));
        }
    }

    /// Record an optional value
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Record a list value as a space-separated string
    pub fn push_list(&mut self, key: impl Into<String>, values: &[String]) {
        self.push(key, &values.join(" "));
    }

    /// Record each item of a repeated value under an indexed key
    pub fn push_each(&mut self, key: &str, values: &[String]) {
        for (i, value) in values.iter().enumerate() {
            let indexed = format!("{}{}", key, self.index(i, values.len()));
            self.push(indexed, value);
        }
    }

    /// The index suffix for item `index` (zero based) out of `total`
    pub fn index(&self, index: usize, total: usize) -> String {
        self.index_level.suffix(index, total)
    }

    /// The recorded pairs
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Check whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the recorded pairs
    pub fn render(&self, format: OutputFormat, pretty: bool) -> String {
        match format {
            OutputFormat::Html => self
                .entries
                .iter()
                .map(|(k, v)| format!("<meta name=\"{}\" content=\"{}\" />\n", escape(k), escape(v)))
                .collect(),
            OutputFormat::Text => self
                .entries
                .iter()
                .map(|(k, v)| format!("{}: {}\n", k, v))
                .collect(),
            OutputFormat::Json => {
                let value = self.to_json();
                if pretty {
                    format!("{:#}", value)
                } else {
                    value.to_string()
                }
            }
        }
    }

    /// The recorded pairs as a flat JSON object
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (key, value) in &self.entries {
            let value = JsonValue::String(value.clone());
            match map.get_mut(key) {
                Some(JsonValue::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = JsonValue::Array(vec![first, value]);
                }
                None => {
                    map.insert(key.clone(), value);
                }
            }
        }
        JsonValue::Object(map)
    }
}

/// Join a key prefix, a name and a suffix into the prefix for nested keys
pub fn build_prefix(prefix: &str, name: &str, suffix: &str) -> String {
    format!("{}{}{}.", prefix, name, suffix)
}
