//! XLink attributes
//!
//! Three shapes are supported: locator links (used by `ddms:link`), and the
//! simple and resource shapes DDMS introduced in 4.0.1.

use super::{AttributeGroup, GroupBuilder};
use crate::components::clean;
use crate::datatypes::is_valid_uri;
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::is_valid_ncname;
use crate::namespaces::{NamespaceFamily, QName, XLINK_NAMESPACE};
use crate::output::OutputSink;
use crate::version::{DdmsVersion, VersionContext};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const SHOW_VALUES: &[&str] = &["new", "replace", "embed", "other", "none"];
const ACTUATE_VALUES: &[&str] = &["onLoad", "onRequest", "other", "none"];

/// The xlink:type of an attribute set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XLinkType {
    /// A locator link
    Locator,
    /// A simple link
    Simple,
    /// A local resource
    Resource,
}

impl XLinkType {
    /// Get the type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            XLinkType::Locator => "locator",
            XLinkType::Simple => "simple",
            XLinkType::Resource => "resource",
        }
    }
}

impl FromStr for XLinkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "locator" => Ok(XLinkType::Locator),
            "simple" => Ok(XLinkType::Simple),
            "resource" => Ok(XLinkType::Resource),
            other => Err(Error::invalid(format!(
                "The type attribute must have a fixed value of locator, simple or resource, not {}.",
                other
            ))),
        }
    }
}

impl fmt::Display for XLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// XLink attributes attached to a component
#[derive(Debug, Clone)]
pub struct XLinkAttributes {
    version: DdmsVersion,
    prefix: String,
    link_type: Option<XLinkType>,
    href: Option<String>,
    role: Option<String>,
    title: Option<String>,
    arcrole: Option<String>,
    show: Option<String>,
    actuate: Option<String>,
    label: Option<String>,
}

impl XLinkAttributes {
    /// Locator attributes
    pub fn locator(
        href: &str,
        role: Option<&str>,
        title: Option<&str>,
        label: Option<&str>,
        ctx: &VersionContext,
    ) -> Result<Self> {
        let mut attrs = Self::empty(ctx);
        attrs.link_type = Some(XLinkType::Locator);
        attrs.href = clean(Some(href));
        attrs.role = clean(role);
        attrs.title = clean(title);
        attrs.label = clean(label);
        attrs.validate()?;
        Ok(attrs)
    }

    /// Simple link attributes
    pub fn simple(
        href: Option<&str>,
        role: Option<&str>,
        title: Option<&str>,
        arcrole: Option<&str>,
        show: Option<&str>,
        actuate: Option<&str>,
        ctx: &VersionContext,
    ) -> Result<Self> {
        let mut attrs = Self::empty(ctx);
        attrs.link_type = Some(XLinkType::Simple);
        attrs.href = clean(href);
        attrs.role = clean(role);
        attrs.title = clean(title);
        attrs.arcrole = clean(arcrole);
        attrs.show = clean(show);
        attrs.actuate = clean(actuate);
        attrs.validate()?;
        Ok(attrs)
    }

    /// Resource attributes
    pub fn resource(
        role: Option<&str>,
        title: Option<&str>,
        label: Option<&str>,
        ctx: &VersionContext,
    ) -> Result<Self> {
        let mut attrs = Self::empty(ctx);
        attrs.link_type = Some(XLinkType::Resource);
        attrs.role = clean(role);
        attrs.title = clean(title);
        attrs.label = clean(label);
        attrs.validate()?;
        Ok(attrs)
    }

    /// An empty instance
    pub fn empty(ctx: &VersionContext) -> Self {
        Self {
            version: ctx.version(),
            prefix: ctx.prefix(NamespaceFamily::Xlink).to_string(),
            link_type: None,
            href: None,
            role: None,
            title: None,
            arcrole: None,
            show: None,
            actuate: None,
            label: None,
        }
    }

    /// The candidate, or an empty instance if there is none
    pub fn non_null(candidate: Option<Self>, ctx: &VersionContext) -> Self {
        candidate.unwrap_or_else(|| Self::empty(ctx))
    }

    /// Read the XLink attributes of an element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let get = |name: &str| clean(element.get_attribute_ns(XLINK_NAMESPACE, name));
        let mut attrs = Self::empty(ctx);
        attrs.link_type = get("type").map(|t| t.parse()).transpose()?;
        attrs.href = get("href");
        attrs.role = get("role");
        attrs.title = get("title");
        attrs.arcrole = get("arcrole");
        attrs.show = get("show");
        attrs.actuate = get("actuate");
        attrs.label = get("label");
        if let Some(prefix) = element
            .attributes
            .keys()
            .find(|q| q.namespace.as_deref() == Some(XLINK_NAMESPACE))
            .and_then(|q| q.prefix.clone())
        {
            attrs.prefix = prefix;
        }
        attrs.validate()?;
        Ok(attrs)
    }

    /// xlink:type
    pub fn link_type(&self) -> Option<XLinkType> {
        self.link_type
    }

    /// xlink:href
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// xlink:role
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// xlink:title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// xlink:arcrole
    pub fn arcrole(&self) -> Option<&str> {
        self.arcrole.as_deref()
    }

    /// xlink:show
    pub fn show(&self) -> Option<&str> {
        self.show.as_deref()
    }

    /// xlink:actuate
    pub fn actuate(&self) -> Option<&str> {
        self.actuate.as_deref()
    }

    /// xlink:label
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Require a locator link with an href
    pub fn require_locator(&self) -> Result<()> {
        if self.link_type != Some(XLinkType::Locator) {
            return Err(Error::invalid("The type attribute must have a fixed value of locator."));
        }
        if self.href.is_none() {
            return Err(Error::invalid("href attribute is required."));
        }
        Ok(())
    }

    fn pairs(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("type", self.link_type.map(|t| t.as_str())),
            ("href", self.href()),
            ("role", self.role()),
            ("title", self.title()),
            ("arcrole", self.arcrole()),
            ("show", self.show()),
            ("actuate", self.actuate()),
            ("label", self.label()),
        ]
    }

    fn forbid(&self, link_type: XLinkType, name: &str, value: Option<&String>) -> Result<()> {
        if value.is_some() {
            return Err(Error::invalid(format!(
                "The {} attribute cannot be used on a {} link.",
                name, link_type
            )));
        }
        Ok(())
    }
}

fn require_uri(name: &str, value: Option<&String>) -> Result<()> {
    match value {
        Some(v) if !is_valid_uri(v) => Err(Error::invalid(format!("Invalid URI ({}): {}", name, v))),
        _ => Ok(()),
    }
}

impl AttributeGroup for XLinkAttributes {
    fn group_name(&self) -> &'static str {
        "XLink attributes"
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn is_empty(&self) -> bool {
        self.pairs().iter().all(|(_, value)| value.is_none())
    }

    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let link_type = self
            .link_type
            .ok_or_else(|| Error::invalid("The type attribute is required when any XLink attribute is set."))?;

        require_uri("href", self.href.as_ref())?;
        require_uri("role", self.role.as_ref())?;
        require_uri("arcrole", self.arcrole.as_ref())?;
        if let Some(label) = &self.label {
            if !is_valid_ncname(label) {
                return Err(Error::invalid(format!("The label attribute must be a valid NCName: {}", label)));
            }
        }

        match link_type {
            XLinkType::Locator => {
                if self.href.is_none() {
                    return Err(Error::invalid("href attribute is required."));
                }
                self.forbid(link_type, "arcrole", self.arcrole.as_ref())?;
                self.forbid(link_type, "show", self.show.as_ref())?;
                self.forbid(link_type, "actuate", self.actuate.as_ref())?;
            }
            XLinkType::Simple | XLinkType::Resource => {
                if !self.version.is_at_least(DdmsVersion::V4_0_1) {
                    return Err(Error::invalid(format!(
                        "{} XLink attributes cannot be used until DDMS 4.0.1 or later.",
                        link_type
                    )));
                }
                if link_type == XLinkType::Resource {
                    self.forbid(link_type, "href", self.href.as_ref())?;
                    self.forbid(link_type, "arcrole", self.arcrole.as_ref())?;
                    self.forbid(link_type, "show", self.show.as_ref())?;
                    self.forbid(link_type, "actuate", self.actuate.as_ref())?;
                } else {
                    self.forbid(link_type, "label", self.label.as_ref())?;
                }
            }
        }

        if let Some(show) = self.show.as_deref().filter(|s| !SHOW_VALUES.contains(s)) {
            return Err(Error::invalid(format!("The show attribute must be one of {:?}, not {}.", SHOW_VALUES, show)));
        }
        if let Some(actuate) = self.actuate.as_deref().filter(|a| !ACTUATE_VALUES.contains(a)) {
            return Err(Error::invalid(format!(
                "The actuate attribute must be one of {:?}, not {}.",
                ACTUATE_VALUES, actuate
            )));
        }
        Ok(())
    }

    fn add_to(&self, element: &mut Element) {
        for (name, value) in self.pairs() {
            element.set_optional_attribute(QName::prefixed(self.prefix.as_str(), XLINK_NAMESPACE, name), value);
        }
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str) {
        for (name, value) in self.pairs() {
            out.push_opt(format!("{}{}", prefix, name), value);
        }
    }
}

impl PartialEq for XLinkAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.pairs() == other.pairs()
    }
}

impl Eq for XLinkAttributes {}

impl Hash for XLinkAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pairs().hash(state);
    }
}

/// Builder for [`XLinkAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XLinkAttributesBuilder {
    /// xlink:type
    pub link_type: Option<String>,
    /// xlink:href
    pub href: Option<String>,
    /// xlink:role
    pub role: Option<String>,
    /// xlink:title
    pub title: Option<String>,
    /// xlink:arcrole
    pub arcrole: Option<String>,
    /// xlink:show
    pub show: Option<String>,
    /// xlink:actuate
    pub actuate: Option<String>,
    /// xlink:label
    pub label: Option<String>,
}

impl GroupBuilder for XLinkAttributesBuilder {
    type Target = XLinkAttributes;

    fn is_empty(&self) -> bool {
        [
            &self.link_type,
            &self.href,
            &self.role,
            &self.title,
            &self.arcrole,
            &self.show,
            &self.actuate,
            &self.label,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }

    fn commit(&self, ctx: &VersionContext) -> Result<XLinkAttributes> {
        if self.is_empty() {
            return Ok(XLinkAttributes::non_null(None, ctx));
        }
        let mut attrs = XLinkAttributes::empty(ctx);
        attrs.link_type = clean(self.link_type.as_deref()).map(|t| t.parse()).transpose()?;
        attrs.href = clean(self.href.as_deref());
        attrs.role = clean(self.role.as_deref());
        attrs.title = clean(self.title.as_deref());
        attrs.arcrole = clean(self.arcrole.as_deref());
        attrs.show = clean(self.show.as_deref());
        attrs.actuate = clean(self.actuate.as_deref());
        attrs.label = clean(self.label.as_deref());
        attrs.validate()?;
        Ok(attrs)
    }
}

impl From<&XLinkAttributes> for XLinkAttributesBuilder {
    fn from(attrs: &XLinkAttributes) -> Self {
        Self {
            link_type: attrs.link_type.map(|t| t.as_str().to_string()),
            href: attrs.href.clone(),
            role: attrs.role.clone(),
            title: attrs.title.clone(),
            arcrole: attrs.arcrole.clone(),
            show: attrs.show.clone(),
            actuate: attrs.actuate.clone(),
            label: attrs.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(version: DdmsVersion) -> VersionContext {
        VersionContext::new(version)
    }

    #[test]
    fn test_locator() {
        let attrs = XLinkAttributes::locator(
            "http://en.wikipedia.org/wiki/Tank",
            Some("tank"),
            Some("Tank Page"),
            Some("tank"),
            &ctx(DdmsVersion::V3_0),
        )
        .unwrap();
        assert_eq!(attrs.link_type(), Some(XLinkType::Locator));
        assert!(attrs.require_locator().is_ok());
    }

    #[test]
    fn test_locator_requires_href() {
        let err = XLinkAttributes::locator(" ", None, None, None, &ctx(DdmsVersion::V5_0)).unwrap_err();
        assert!(err.to_string().contains("href"));
    }

    #[test]
    fn test_bad_label() {
        let result = XLinkAttributes::locator("http://x", None, None, Some("1bad"), &ctx(DdmsVersion::V5_0));
        assert!(result.is_err());
    }

    #[test]
    fn test_simple_is_version_gated() {
        let args = (Some("http://x"), None, None, None, Some("new"), Some("onLoad"));
        assert!(XLinkAttributes::simple(args.0, args.1, args.2, args.3, args.4, args.5, &ctx(DdmsVersion::V3_1)).is_err());
        assert!(XLinkAttributes::simple(args.0, args.1, args.2, args.3, args.4, args.5, &ctx(DdmsVersion::V4_0_1)).is_ok());
    }

    #[test]
    fn test_show_vocabulary() {
        let result = XLinkAttributes::simple(None, None, None, None, Some("sideways"), None, &ctx(DdmsVersion::V5_0));
        assert!(result.is_err());
    }

    #[test]
    fn test_resource_forbids_href() {
        let mut builder = XLinkAttributesBuilder {
            link_type: Some("resource".to_string()),
            href: Some("http://x".to_string()),
            ..Default::default()
        };
        assert!(builder.commit(&ctx(DdmsVersion::V5_0)).is_err());
        builder.href = None;
        builder.label = Some("res".to_string());
        let attrs = builder.commit(&ctx(DdmsVersion::V5_0)).unwrap();
        assert_eq!(attrs.link_type(), Some(XLinkType::Resource));
    }

    #[test]
    fn test_missing_type() {
        let builder = XLinkAttributesBuilder {
            href: Some("http://x".to_string()),
            ..Default::default()
        };
        assert!(builder.commit(&ctx(DdmsVersion::V5_0)).is_err());
    }

    #[test]
    fn test_element_round_trip() {
        let c = ctx(DdmsVersion::V5_0);
        let attrs = XLinkAttributes::locator("http://x", Some("role"), None, None, &c).unwrap();
        let mut element = Element::new(QName::local("link"));
        attrs.add_to(&mut element);
        assert_eq!(element.get_attribute_ns(XLINK_NAMESPACE, "type"), Some("locator"));
        assert_eq!(element.attributes.len(), 3);
        assert_eq!(XLinkAttributes::from_element(&element, &c).unwrap(), attrs);
    }

    #[test]
    fn test_empty_builder_and_output() {
        let c = ctx(DdmsVersion::V5_0);
        let builder = XLinkAttributesBuilder::default();
        assert!(builder.is_empty());
        let attrs = builder.commit(&c).unwrap();
        assert!(attrs.is_empty());
        assert_eq!(attrs, XLinkAttributes::non_null(None, &c));

        let mut out = OutputSink::default();
        attrs.write_output(&mut out, "link.");
        assert!(out.is_empty());
    }
}
