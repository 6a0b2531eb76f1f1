//! Extensible attributes
//!
//! Some components accept arbitrary attributes from namespaces DDMS does
//! not reserve for itself.

use super::{AttributeGroup, GroupBuilder};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::is_valid_ncname;
use crate::namespaces::{NamespaceFamily, QName, XMLNS_NAMESPACE, XML_NAMESPACE};
use crate::output::OutputSink;
use crate::version::{DdmsVersion, VersionContext};
use std::hash::{Hash, Hasher};

/// One attribute from a foreign namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensibleAttribute {
    /// Attribute name; always namespaced
    pub name: QName,
    /// Attribute value
    pub value: String,
}

impl ExtensibleAttribute {
    /// Create an attribute
    pub fn new(
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: QName::prefixed(prefix, namespace, local_name),
            value: value.into(),
        }
    }
}

/// Attributes from non-DDMS namespaces attached to a component
#[derive(Debug, Clone)]
pub struct ExtensibleAttributes {
    version: DdmsVersion,
    attributes: Vec<ExtensibleAttribute>,
}

fn is_reserved(namespace: &str, version: DdmsVersion) -> bool {
    namespace == XML_NAMESPACE
        || namespace == XMLNS_NAMESPACE
        || NamespaceFamily::ALL
            .iter()
            .any(|family| version.namespace(*family) == Some(namespace))
}

impl ExtensibleAttributes {
    /// Build from explicit attributes
    pub fn new(attributes: Vec<ExtensibleAttribute>, ctx: &VersionContext) -> Result<Self> {
        let attrs = Self {
            version: ctx.version(),
            attributes,
        };
        attrs.validate()?;
        Ok(attrs)
    }

    /// An empty instance
    pub fn empty(ctx: &VersionContext) -> Self {
        Self {
            version: ctx.version(),
            attributes: Vec::new(),
        }
    }

    /// The candidate, or an empty instance if there is none
    pub fn non_null(candidate: Option<Self>, ctx: &VersionContext) -> Self {
        candidate.unwrap_or_else(|| Self::empty(ctx))
    }

    /// Collect every attribute of an element that lives in a namespace
    /// DDMS does not reserve
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let attributes = element
            .attributes
            .iter()
            .filter(|(qname, _)| {
                qname
                    .namespace
                    .as_deref()
                    .is_some_and(|ns| !is_reserved(ns, ctx.version()))
            })
            .map(|(qname, value)| ExtensibleAttribute {
                name: qname.clone(),
                value: value.clone(),
            })
            .collect();
        Self::new(attributes, ctx)
    }

    /// The attributes, in document order
    pub fn attributes(&self) -> &[ExtensibleAttribute] {
        &self.attributes
    }

    /// Look up an attribute value
    pub fn get(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.matches(namespace, local_name))
            .map(|attr| attr.value.as_str())
    }

    /// Fail if any attribute is set; for components that cannot carry
    /// extensible attributes in their version
    pub fn require_absent(&self, reason: &str) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid(reason.to_string()))
        }
    }
}

impl AttributeGroup for ExtensibleAttributes {
    fn group_name(&self) -> &'static str {
        "extensible attributes"
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (i, attr) in self.attributes.iter().enumerate() {
            let namespace = attr.name.namespace.as_deref().ok_or_else(|| {
                Error::invalid(format!(
                    "Extensible attribute {} must be in a namespace.",
                    attr.name.local_name
                ))
            })?;
            if is_reserved(namespace, self.version) {
                return Err(Error::invalid(format!(
                    "Extensible attributes cannot be in the reserved namespace {}.",
                    namespace
                )));
            }
            match attr.name.prefix.as_deref() {
                Some(prefix) if is_valid_ncname(prefix) && !prefix.eq_ignore_ascii_case("xmlns") => {}
                _ => {
                    return Err(Error::invalid(format!(
                        "Extensible attribute {} must have a namespace prefix.",
                        attr.name
                    )));
                }
            }
            if !is_valid_ncname(&attr.name.local_name) {
                return Err(Error::invalid(format!(
                    "{} is not a valid attribute name.",
                    attr.name.local_name
                )));
            }
            if self.attributes[..i].iter().any(|prev| prev.name == attr.name) {
                return Err(Error::invalid(format!(
                    "The extensible attribute {} is set more than once.",
                    attr.name
                )));
            }
        }
        Ok(())
    }

    fn add_to(&self, element: &mut Element) {
        for attr in &self.attributes {
            element.set_attribute(attr.name.clone(), attr.value.clone());
        }
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str) {
        for attr in &self.attributes {
            out.push(format!("{}{}", prefix, attr.name.qualified()), &attr.value);
        }
    }
}

impl PartialEq for ExtensibleAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
    }
}

impl Eq for ExtensibleAttributes {}

impl Hash for ExtensibleAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attributes.hash(state);
    }
}

/// Builder for [`ExtensibleAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensibleAttributesBuilder {
    /// Attributes to attach; entries with a blank value are dropped
    pub attributes: Vec<ExtensibleAttribute>,
}

impl ExtensibleAttributesBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute
    pub fn push(&mut self, attribute: ExtensibleAttribute) -> &mut Self {
        self.attributes.push(attribute);
        self
    }
}

impl GroupBuilder for ExtensibleAttributesBuilder {
    type Target = ExtensibleAttributes;

    fn is_empty(&self) -> bool {
        self.attributes.iter().all(|attr| attr.value.trim().is_empty())
    }

    fn commit(&self, ctx: &VersionContext) -> Result<ExtensibleAttributes> {
        let attributes: Vec<_> = self
            .attributes
            .iter()
            .filter(|attr| !attr.value.trim().is_empty())
            .cloned()
            .collect();
        let candidate = if attributes.is_empty() {
            None
        } else {
            Some(ExtensibleAttributes::new(attributes, ctx)?)
        };
        Ok(ExtensibleAttributes::non_null(candidate, ctx))
    }
}

impl From<&ExtensibleAttributes> for ExtensibleAttributesBuilder {
    fn from(attrs: &ExtensibleAttributes) -> Self {
        Self {
            attributes: attrs.attributes.clone(),
        }
    }
}
