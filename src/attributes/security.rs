//! ISM security attributes
//!
//! The set of ISM attributes a component may carry is table driven: each
//! entry names the attribute, its lexical kind and the versions in which it
//! is legal. Values of controlled vocabularies other than the
//! classification are only checked lexically.

use super::{AttributeGroup, GroupBuilder};
use crate::datatypes::{is_xs_boolean, is_xs_date};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::{is_valid_nmtoken, is_valid_nmtokens, split_list};
use crate::namespaces::{NamespaceFamily, QName};
use crate::output::OutputSink;
use crate::version::{DdmsVersion, VersionContext};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Lexical kind of an ISM attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsmValueKind {
    /// A single NMTOKEN
    Token,
    /// A whitespace separated list of NMTOKENs
    TokenList,
    /// Free text
    Text,
    /// An xs:date
    Date,
    /// An xs:boolean
    Boolean,
}

/// Declaration of one ISM attribute
#[derive(Debug, Clone, Copy)]
pub struct IsmAttribute {
    /// Attribute local name
    pub name: &'static str,
    /// Lexical kind of the value
    pub kind: IsmValueKind,
    /// First version the attribute is legal in
    pub since: Option<DdmsVersion>,
    /// Last version the attribute is legal in
    pub until: Option<DdmsVersion>,
}

impl IsmAttribute {
    const fn new(name: &'static str, kind: IsmValueKind) -> Self {
        Self {
            name,
            kind,
            since: None,
            until: None,
        }
    }

    const fn since(mut self, version: DdmsVersion) -> Self {
        self.since = Some(version);
        self
    }

    const fn until(mut self, version: DdmsVersion) -> Self {
        self.until = Some(version);
        self
    }

    /// Check whether the attribute is legal in a version
    pub fn is_legal_in(&self, version: DdmsVersion) -> bool {
        self.since.map_or(true, |since| version >= since) && self.until.map_or(true, |until| version <= until)
    }

    fn check_value(&self, value: &str) -> Result<()> {
        let ok = match self.kind {
            IsmValueKind::Token => is_valid_nmtoken(value),
            IsmValueKind::TokenList => is_valid_nmtokens(value),
            IsmValueKind::Text => true,
            IsmValueKind::Date => is_xs_date(value),
            IsmValueKind::Boolean => is_xs_boolean(value),
        };
        if ok {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "The {} attribute value '{}' is not a valid {}.",
                self.name,
                value,
                match self.kind {
                    IsmValueKind::Token => "NMTOKEN",
                    IsmValueKind::TokenList => "list of NMTOKENs",
                    IsmValueKind::Text => "string",
                    IsmValueKind::Date => "xs:date",
                    IsmValueKind::Boolean => "xs:boolean",
                }
            )))
        }
    }
}

use IsmValueKind::*;

/// Every ISM attribute a DDMS component may carry, in output order
pub static ISM_ATTRIBUTES: &[IsmAttribute] = &[
    IsmAttribute::new("classification", Token),
    IsmAttribute::new("ownerProducer", TokenList),
    IsmAttribute::new("SCIcontrols", TokenList),
    IsmAttribute::new("SARIdentifier", TokenList),
    IsmAttribute::new("atomicEnergyMarkings", TokenList).since(DdmsVersion::V4_0_1),
    IsmAttribute::new("disseminationControls", TokenList),
    IsmAttribute::new("displayOnlyTo", TokenList).since(DdmsVersion::V4_0_1),
    IsmAttribute::new("FGIsourceOpen", TokenList),
    IsmAttribute::new("FGIsourceProtected", TokenList),
    IsmAttribute::new("releasableTo", TokenList),
    IsmAttribute::new("nonICmarkings", TokenList),
    IsmAttribute::new("nonUSControls", TokenList).since(DdmsVersion::V4_0_1),
    IsmAttribute::new("classifiedBy", Text),
    IsmAttribute::new("compilationReason", Text),
    IsmAttribute::new("derivativelyClassifiedBy", Text),
    IsmAttribute::new("classificationReason", Text),
    IsmAttribute::new("derivedFrom", Text),
    IsmAttribute::new("declassDate", Date),
    IsmAttribute::new("declassEvent", Text),
    IsmAttribute::new("declassException", TokenList),
    IsmAttribute::new("declassManualReview", Boolean).until(DdmsVersion::V3_0),
    IsmAttribute::new("typeOfExemptedSource", TokenList).until(DdmsVersion::V3_0),
    IsmAttribute::new("dateOfExemptedSource", Date).until(DdmsVersion::V3_0),
    IsmAttribute::new("compliesWith", TokenList).since(DdmsVersion::V3_1),
];

/// Legal values of the classification attribute (US and NATO markings)
pub const CLASSIFICATIONS: &[&str] = &[
    "U", "R", "C", "S", "TS", "NU", "NR", "NC", "NS", "CTS", "CTS-B", "CTS-BALK", "CTSA", "NCA",
    "NSAT",
];

fn lookup(name: &str) -> Option<&'static IsmAttribute> {
    ISM_ATTRIBUTES.iter().find(|attr| attr.name == name)
}

/// ISM security markings attached to a component
#[derive(Debug, Clone)]
pub struct SecurityAttributes {
    version: DdmsVersion,
    namespace: &'static str,
    prefix: String,
    values: BTreeMap<String, String>,
}

impl SecurityAttributes {
    /// Build from explicit name/value pairs; blank values are ignored
    pub fn new<I, K, V>(values: I, ctx: &VersionContext) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::empty(ctx);
        for (name, value) in values {
            let name = name.into();
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            if lookup(&name).is_none() {
                return Err(Error::invalid(format!("Unknown ISM attribute: {}", name)));
            }
            attrs.values.insert(name, value.trim().to_string());
        }
        attrs.validate()?;
        Ok(attrs)
    }

    /// Shorthand for the two attributes most components require
    pub fn with_classification(
        classification: &str,
        owner_producers: &[&str],
        ctx: &VersionContext,
    ) -> Result<Self> {
        Self::new(
            [
                ("classification", classification.to_string()),
                ("ownerProducer", owner_producers.join(" ")),
            ],
            ctx,
        )
    }

    /// An empty instance
    pub fn empty(ctx: &VersionContext) -> Self {
        let family = NamespaceFamily::Ism;
        Self {
            version: ctx.version(),
            namespace: ctx.version().namespace(family).unwrap_or_default(),
            prefix: ctx.prefix(family).to_string(),
            values: BTreeMap::new(),
        }
    }

    /// The candidate, or an empty instance if there is none
    pub fn non_null(candidate: Option<Self>, ctx: &VersionContext) -> Self {
        candidate.unwrap_or_else(|| Self::empty(ctx))
    }

    /// Read the ISM attributes of an element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let mut attrs = Self::empty(ctx);
        for (qname, value) in &element.attributes {
            if qname.namespace.as_deref() != Some(attrs.namespace) {
                continue;
            }
            if let Some(decl) = lookup(&qname.local_name) {
                if !value.trim().is_empty() {
                    attrs.values.insert(decl.name.to_string(), value.trim().to_string());
                }
            }
        }
        if let Some(prefix) = element
            .attributes
            .keys()
            .find(|q| q.namespace.as_deref() == Some(attrs.namespace))
            .and_then(|q| q.prefix.clone())
        {
            attrs.prefix = prefix;
        }
        attrs.validate()?;
        Ok(attrs)
    }

    /// Get an attribute value by local name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The classification marking
    pub fn classification(&self) -> Option<&str> {
        self.get("classification")
    }

    /// The owner/producer tokens
    pub fn owner_producers(&self) -> Vec<String> {
        self.get("ownerProducer").map(split_list).unwrap_or_default()
    }

    /// Iterate over the set attributes in output order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        ISM_ATTRIBUTES
            .iter()
            .filter_map(move |decl| self.get(decl.name).map(|value| (decl.name, value)))
    }

    /// Require a classification and at least one owner/producer
    pub fn require_classification(&self) -> Result<()> {
        if self.classification().is_none() {
            return Err(Error::invalid("classification is required."));
        }
        if self.owner_producers().is_empty() {
            return Err(Error::invalid("At least 1 ownerProducer must be set."));
        }
        Ok(())
    }
}

impl AttributeGroup for SecurityAttributes {
    fn group_name(&self) -> &'static str {
        "security attributes"
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in &self.values {
            let decl = lookup(name).ok_or_else(|| Error::invalid(format!("Unknown ISM attribute: {}", name)))?;
            if let Some(since) = decl.since.filter(|since| self.version < *since) {
                return Err(Error::invalid(format!(
                    "The {} attribute cannot be used until DDMS {} or later.",
                    decl.name, since
                )));
            }
            if let Some(until) = decl.until.filter(|until| self.version > *until) {
                return Err(Error::invalid(format!(
                    "The {} attribute cannot be used after DDMS {}.",
                    decl.name, until
                )));
            }
            decl.check_value(value)?;
        }
        if let Some(classification) = self.classification() {
            if !CLASSIFICATIONS.contains(&classification) {
                return Err(Error::invalid(format!(
                    "{} is not a valid classification.",
                    classification
                )));
            }
        }
        Ok(())
    }

    fn add_to(&self, element: &mut Element) {
        for (name, value) in self.iter() {
            element.set_attribute(QName::prefixed(self.prefix.as_str(), self.namespace, name), value);
        }
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str) {
        for (name, value) in self.iter() {
            out.push(format!("{}{}", prefix, name), value);
        }
    }
}

impl PartialEq for SecurityAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for SecurityAttributes {}

impl Hash for SecurityAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

/// Builder for [`SecurityAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityAttributesBuilder {
    /// Attribute values keyed by ISM local name
    pub values: BTreeMap<String, String>,
}

impl SecurityAttributesBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set an attribute value, by value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }
}

impl GroupBuilder for SecurityAttributesBuilder {
    type Target = SecurityAttributes;

    fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }

    fn commit(&self, ctx: &VersionContext) -> Result<SecurityAttributes> {
        let candidate = if self.is_empty() {
            None
        } else {
            Some(SecurityAttributes::new(self.values.clone(), ctx)?)
        };
        Ok(SecurityAttributes::non_null(candidate, ctx))
    }
}

impl From<&SecurityAttributes> for SecurityAttributesBuilder {
    fn from(attrs: &SecurityAttributes) -> Self {
        Self {
            values: attrs.values.clone(),
        }
    }
}
