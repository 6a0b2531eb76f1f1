//! XML namespace handling
//!
//! Qualified names (QNames), the namespace families DDMS components draw
//! their names from, and prefix mappings used when writing element trees
//! back out.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// XLink namespace, identical in every DDMS version
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// The vocabularies a DDMS version binds to namespace URIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceFamily {
    /// DDMS core elements and attributes
    Ddms,
    /// Intelligence Community security markings
    Ism,
    /// Need-To-Know access metadata
    Ntk,
    /// Geography Markup Language
    Gml,
    /// XML Linking Language
    Xlink,
}

impl NamespaceFamily {
    /// All families, in declaration order
    pub const ALL: [NamespaceFamily; 5] = [
        NamespaceFamily::Ddms,
        NamespaceFamily::Ism,
        NamespaceFamily::Ntk,
        NamespaceFamily::Gml,
        NamespaceFamily::Xlink,
    ];

    /// Get the family as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            NamespaceFamily::Ddms => "ddms",
            NamespaceFamily::Ism => "ism",
            NamespaceFamily::Ntk => "ntk",
            NamespaceFamily::Gml => "gml",
            NamespaceFamily::Xlink => "xlink",
        }
    }
}

impl fmt::Display for NamespaceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualified name (QName) - combination of namespace and local name.
///
/// The prefix is carried for serialization only; equality and hashing
/// consider the namespace and local name.
#[derive(Debug, Clone, Eq)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
    /// Preferred prefix when written out
    pub prefix: Option<Prefix>,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Create a namespaced QName with a preferred prefix
    pub fn prefixed(
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        let prefix = prefix.into();
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
            prefix: (!prefix.is_empty()).then_some(prefix),
        }
    }

    /// Check whether this name has the given namespace and local name
    pub fn matches(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }

    /// The name as written in a document: `prefix:local` or just `local`
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_name == other.local_name
    }
}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_name.hash(state);
    }
}

/// Clark notation: `{namespace}local`
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace context for resolving and declaring prefixes
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI, in declaration order
    prefixes: IndexMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping.
    ///
    /// Fails if the prefix is already bound to a different namespace.
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Result<()> {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.prefixes.get(&prefix) {
            Some(existing) if *existing != namespace => Err(Error::Namespace(format!(
                "Prefix '{}' is bound to both '{}' and '{}'",
                prefix, existing, namespace
            ))),
            Some(_) => Ok(()),
            None => {
                self.prefixes.insert(prefix, namespace);
                Ok(())
            }
        }
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Iterate over prefix declarations in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

}
