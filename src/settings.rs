//! Library settings
//!
//! Settings control the prefixes written for newly built elements, the
//! version a default [`crate::VersionContext`] starts in, and how rendered
//! output is indexed and formatted. They can be built fluently or loaded
//! from a JSON document; every field has a default.

use crate::error::{Error, Result};
use crate::namespaces::NamespaceFamily;
use crate::version::DdmsVersion;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When repeated children get a positional `[n]` suffix in rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexLevel {
    /// Never index
    #[default]
    Never,
    /// Index only when there is more than one item
    WhenMultiple,
    /// Always index
    Always,
}

impl IndexLevel {
    /// The suffix for item `index` (zero based) out of `total`
    pub fn suffix(&self, index: usize, total: usize) -> String {
        match self {
            IndexLevel::Never => String::new(),
            IndexLevel::WhenMultiple if total <= 1 => String::new(),
            _ => format!("[{}]", index + 1),
        }
    }
}

/// Prefixes used when writing each namespace family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefixes {
    /// DDMS core prefix
    pub ddms: String,
    /// ISM prefix
    pub ism: String,
    /// NTK prefix
    pub ntk: String,
    /// GML prefix
    pub gml: String,
    /// XLink prefix
    pub xlink: String,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            ddms: "ddms".to_string(),
            ism: "ISM".to_string(),
            ntk: "ntk".to_string(),
            gml: "gml".to_string(),
            xlink: "xlink".to_string(),
        }
    }
}

impl Prefixes {
    /// Get the prefix for a family
    pub fn get(&self, family: NamespaceFamily) -> &str {
        match family {
            NamespaceFamily::Ddms => &self.ddms,
            NamespaceFamily::Ism => &self.ism,
            NamespaceFamily::Ntk => &self.ntk,
            NamespaceFamily::Gml => &self.gml,
            NamespaceFamily::Xlink => &self.xlink,
        }
    }

    fn slot(&mut self, family: NamespaceFamily) -> &mut String {
        match family {
            NamespaceFamily::Ddms => &mut self.ddms,
            NamespaceFamily::Ism => &mut self.ism,
            NamespaceFamily::Ntk => &mut self.ntk,
            NamespaceFamily::Gml => &mut self.gml,
            NamespaceFamily::Xlink => &mut self.xlink,
        }
    }
}

/// Library settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Version used by contexts created from these settings
    pub default_version: DdmsVersion,
    /// Prefixes for newly built elements and attributes
    pub prefixes: Prefixes,
    /// Index suffixes on repeated children in rendered output
    pub output_index_level: IndexLevel,
    /// Pretty print JSON output
    pub json_pretty_print: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_version: DdmsVersion::LATEST,
            prefixes: Prefixes::default(),
            output_index_level: IndexLevel::default(),
            json_pretty_print: false,
        }
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.check()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the default version
    pub fn with_default_version(mut self, version: DdmsVersion) -> Self {
        self.default_version = version;
        self
    }

    /// Set the prefix of a namespace family
    pub fn with_prefix(mut self, family: NamespaceFamily, prefix: impl Into<String>) -> Self {
        *self.prefixes.slot(family) = prefix.into();
        self
    }

    /// Set the output index level
    pub fn with_output_index_level(mut self, level: IndexLevel) -> Self {
        self.output_index_level = level;
        self
    }

    /// Set JSON pretty printing
    pub fn with_json_pretty_print(mut self, pretty: bool) -> Self {
        self.json_pretty_print = pretty;
        self
    }

    fn check(&self) -> Result<()> {
        for family in NamespaceFamily::ALL {
            let prefix = self.prefixes.get(family);
            if !crate::names::is_valid_ncname(prefix) {
                return Err(Error::Config(format!(
                    "the {} prefix '{}' is not a valid NCName",
                    family, prefix
                )));
            }
        }
        Ok(())
    }
}
