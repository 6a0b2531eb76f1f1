//! DDMS versions and the version context
//!
//! Every element name lookup and every version-gated rule reads the
//! version from a [`VersionContext`] passed in explicitly at construction
//! time. A component remembers the version it was built under; changing
//! the context afterwards does not touch existing components.

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::{NamespaceFamily, QName, XLINK_NAMESPACE};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A supported DDMS version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DdmsVersion {
    /// DDMS 2.0
    V2_0,
    /// DDMS 3.0
    V3_0,
    /// DDMS 3.1
    V3_1,
    /// DDMS 4.0.1
    V4_0_1,
    /// DDMS 4.1
    V4_1,
    /// DDMS 5.0
    V5_0,
}

impl DdmsVersion {
    /// All supported versions, oldest first
    pub const ALL: [DdmsVersion; 6] = [
        DdmsVersion::V2_0,
        DdmsVersion::V3_0,
        DdmsVersion::V3_1,
        DdmsVersion::V4_0_1,
        DdmsVersion::V4_1,
        DdmsVersion::V5_0,
    ];

    /// The newest supported version
    pub const LATEST: DdmsVersion = DdmsVersion::V5_0;

    /// Get the version identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DdmsVersion::V2_0 => "2.0",
            DdmsVersion::V3_0 => "3.0",
            DdmsVersion::V3_1 => "3.1",
            DdmsVersion::V4_0_1 => "4.0.1",
            DdmsVersion::V4_1 => "4.1",
            DdmsVersion::V5_0 => "5.0",
        }
    }

    /// Check whether this version is the same as or newer than `other`
    pub fn is_at_least(&self, other: DdmsVersion) -> bool {
        *self >= other
    }

    /// The namespace URI bound to a family in this version, if the family
    /// exists in this version
    pub fn namespace(&self, family: NamespaceFamily) -> Option<&'static str> {
        use DdmsVersion::*;
        match family {
            NamespaceFamily::Ddms => Some(self.ddms_namespace()),
            NamespaceFamily::Ism => Some(match self {
                V2_0 => "urn:us:gov:ic:ism:v2",
                _ => "urn:us:gov:ic:ism",
            }),
            NamespaceFamily::Ntk => self.is_at_least(V4_0_1).then_some("urn:us:gov:ic:ntk"),
            NamespaceFamily::Gml => Some(match self {
                V2_0 => "http://www.opengis.net/gml",
                _ => "http://www.opengis.net/gml/3.2",
            }),
            NamespaceFamily::Xlink => Some(XLINK_NAMESPACE),
        }
    }

    /// The DDMS core namespace of this version
    pub fn ddms_namespace(&self) -> &'static str {
        match self {
            DdmsVersion::V2_0 => "http://metadata.dod.mil/mdr/ns/DDMS/2.0/",
            DdmsVersion::V3_0 => "http://metadata.dod.mil/mdr/ns/DDMS/3.0/",
            DdmsVersion::V3_1 => "http://metadata.dod.mil/mdr/ns/DDMS/3.1/",
            DdmsVersion::V4_0_1 | DdmsVersion::V4_1 => "urn:us:mil:ces:metadata:ddms:4",
            DdmsVersion::V5_0 => "urn:us:mil:ces:metadata:ddms:5",
        }
    }

    /// Reverse lookup of a DDMS core namespace.
    ///
    /// Versions sharing a namespace resolve to the newest of them.
    pub fn for_namespace(uri: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .rev()
            .find(|v| v.ddms_namespace() == uri)
            .copied()
            .ok_or_else(|| {
                Error::UnsupportedVersion(format!("no DDMS version uses the namespace '{}'", uri))
            })
    }
}

impl FromStr for DdmsVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "2.0" => Ok(DdmsVersion::V2_0),
            "3.0" => Ok(DdmsVersion::V3_0),
            "3.1" => Ok(DdmsVersion::V3_1),
            "4.0" | "4.0.1" => Ok(DdmsVersion::V4_0_1),
            "4.1" => Ok(DdmsVersion::V4_1),
            "5.0" => Ok(DdmsVersion::V5_0),
            other => Err(Error::UnsupportedVersion(other.to_string())),
        }
    }
}

impl TryFrom<String> for DdmsVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DdmsVersion> for String {
    fn from(version: DdmsVersion) -> Self {
        version.as_str().to_string()
    }
}

impl Default for DdmsVersion {
    fn default() -> Self {
        DdmsVersion::LATEST
    }
}

impl fmt::Display for DdmsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The version (and settings) a construction or validation pass runs under
#[derive(Debug, Clone)]
pub struct VersionContext {
    version: DdmsVersion,
    settings: Arc<Settings>,
}

impl VersionContext {
    /// Create a context for a version with default settings
    pub fn new(version: DdmsVersion) -> Self {
        Self {
            version,
            settings: Arc::new(Settings::default()),
        }
    }

    /// Create a context from a version identifier such as `"4.1"`
    pub fn parse(version: &str) -> Result<Self> {
        Ok(Self::new(version.parse()?))
    }

    /// Create a context for the settings' default version
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            version: settings.default_version,
            settings: Arc::new(settings),
        }
    }

    /// Create a context for the version that owns a DDMS namespace
    pub fn for_namespace(uri: &str) -> Result<Self> {
        Ok(Self::new(DdmsVersion::for_namespace(uri)?))
    }

    /// Create a context for the version a parsed element is written in
    pub fn for_element(element: &Element) -> Result<Self> {
        let namespace = element.namespace().ok_or_else(|| {
            Error::UnsupportedVersion(format!(
                "element '{}' has no namespace to infer a DDMS version from",
                element.local_name()
            ))
        })?;
        Self::for_namespace(namespace)
    }

    /// The same settings under another version
    pub fn with_version(&self, version: DdmsVersion) -> Self {
        Self {
            version,
            settings: Arc::clone(&self.settings),
        }
    }

    /// Replace the settings
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    /// The active version
    pub fn version(&self) -> DdmsVersion {
        self.version
    }

    /// The active settings
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Check whether the active version is at least the named version.
    ///
    /// Unknown version identifiers are a configuration error.
    pub fn is_at_least(&self, version: &str) -> Result<bool> {
        let other: DdmsVersion = version.parse()?;
        Ok(self.version.is_at_least(other))
    }

    /// The namespace URI bound to a family in the active version
    pub fn namespace(&self, family: NamespaceFamily) -> Result<&'static str> {
        self.version.namespace(family).ok_or_else(|| {
            Error::Namespace(format!(
                "the {} namespace does not exist in DDMS {}",
                family, self.version
            ))
        })
    }

    /// The configured prefix for a family
    pub fn prefix(&self, family: NamespaceFamily) -> &str {
        self.settings.prefixes.get(family)
    }

    /// A prefixed name in a family's namespace
    pub fn qname(&self, family: NamespaceFamily, local_name: &str) -> Result<QName> {
        Ok(QName::prefixed(self.prefix(family), self.namespace(family)?, local_name))
    }
}

impl Default for VersionContext {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}
