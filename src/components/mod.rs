//! Versioned components
//!
//! A component is an immutable value representing one DDMS element. It is
//! created either by adopting a parsed [`Element`] or by assembling one
//! from explicit field values. Both paths end in the same staged
//! construction: element-specific validation, validation of the attached
//! attribute groups and nested components, collection of advisory
//! warnings, and (for assembled components) a fresh element snapshot
//! built from the already validated fields.
//!
//! Every component type contributes only its own fields and rules through
//! the [`Component`] trait; the shared state lives in [`ComponentCore`].

mod builder;
mod dates;
mod identifier;
mod keyword;
mod language;
mod link;
mod organization;
mod person;
mod related_resource;
mod role_entity;
mod simple_string;
mod sub_organization;

pub use builder::{all_blank, all_empty, commit_all, is_blank, Builder};
pub use dates::{Dates, DatesBuilder};
pub use identifier::{Identifier, IdentifierBuilder};
pub use keyword::{Keyword, KeywordBuilder};
pub use language::{Language, LanguageBuilder};
pub use link::{Link, LinkBuilder};
pub use organization::{Organization, OrganizationBuilder};
pub use person::{Person, PersonBuilder};
pub use related_resource::{Direction, RelatedResource, RelatedResourceBuilder};
pub use role_entity::{RoleEntity, RoleEntityBuilder};
pub use simple_string::{SimpleString, SimpleStringBuilder, SimpleStringKind};
pub use sub_organization::{SubOrganization, SubOrganizationBuilder};

pub(crate) use builder::{clean, non_blank, omitted};

use crate::attributes::AttributeGroup;
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::{NamespaceFamily, QName};
use crate::output::{OutputFormat, OutputSink};
use crate::settings::Settings;
use crate::version::{DdmsVersion, VersionContext};
use serde_json::Value as JsonValue;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Advisory; construction still succeeds
    Warning,
    /// Fatal
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Warning => write!(f, "warning"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

/// A message produced while validating a component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationMessage {
    /// Severity
    pub kind: MessageKind,
    /// Human readable text
    pub text: String,
    /// Qualified-name path of the element the message is about
    pub locator: String,
}

impl ValidationMessage {
    /// Create a warning
    pub fn warning(text: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            text: text.into(),
            locator: locator.into(),
        }
    }

    /// The same message seen from a parent element
    pub fn nested_under(&self, parent_locator: &str) -> Self {
        Self {
            kind: self.kind,
            text: self.text.clone(),
            locator: format!("{}{}", parent_locator, self.locator),
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.locator, self.text)
    }
}

/// State shared by every component
#[derive(Debug, Clone)]
pub struct ComponentCore {
    name: QName,
    version: DdmsVersion,
    settings: Arc<Settings>,
    element: Element,
    adopted: bool,
    warnings: Vec<ValidationMessage>,
}

impl ComponentCore {
    /// Adopt a parsed element, checking that it carries the name expected
    /// for the context's version
    pub fn adopt(element: &Element, local_name: &str, ctx: &VersionContext) -> Result<Self> {
        let namespace = ctx.version().ddms_namespace();
        if !element.qname.matches(namespace, local_name) {
            return Err(Error::MalformedComponent {
                expected: QName::namespaced(namespace, local_name).to_string(),
                found: element.qname.to_string(),
            });
        }
        Ok(Self {
            name: element.qname.clone(),
            version: ctx.version(),
            settings: Arc::clone(ctx.settings()),
            element: element.clone(),
            adopted: true,
            warnings: Vec::new(),
        })
    }

    /// Start a component assembled from values
    pub fn create(local_name: &str, ctx: &VersionContext) -> Result<Self> {
        let name = ctx.qname(NamespaceFamily::Ddms, local_name)?;
        Ok(Self {
            element: Element::new(name.clone()),
            name,
            version: ctx.version(),
            settings: Arc::clone(ctx.settings()),
            adopted: false,
            warnings: Vec::new(),
        })
    }

    /// Qualified name of the element
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Version the component was built under
    pub fn version(&self) -> DdmsVersion {
        self.version
    }

    /// Settings the component was built with
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// A context equivalent to the one the component was built under
    pub fn context(&self) -> VersionContext {
        VersionContext::new(self.version).with_settings((*self.settings).clone())
    }

    /// The backing element
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Whether the backing element was adopted from a parsed document
    pub fn is_adopted(&self) -> bool {
        self.adopted
    }

    /// The locator of this element, relative to its parent
    pub fn locator(&self) -> String {
        format!("/{}", self.name.qualified())
    }

    /// An invalid-component error located at this element
    pub fn fail(&self, message: impl Into<String>) -> Error {
        Error::invalid(message).located_at(&self.locator())
    }

    /// A name in this element's namespace, with its prefix
    pub fn child_name(&self, local_name: &str) -> QName {
        QName {
            namespace: self.name.namespace.clone(),
            local_name: local_name.to_string(),
            prefix: self.name.prefix.clone(),
        }
    }

    /// A fresh element with this component's name
    pub fn new_element(&self) -> Element {
        Element::new(self.name.clone())
    }

    /// Namespace of this element
    pub fn namespace(&self) -> &str {
        self.name.namespace.as_deref().unwrap_or_default()
    }
}

impl PartialEq for ComponentCore {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ComponentCore {}

impl Hash for ComponentCore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Behaviour shared by every DDMS component
pub trait Component: fmt::Debug {
    /// The shared state
    fn core(&self) -> &ComponentCore;

    /// Validate the element-specific rules
    fn validate(&self) -> Result<()>;

    /// Advisory messages about this element alone
    fn validate_warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Render the logical content under a key prefix and index suffix
    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str);

    /// Build an element snapshot from the validated fields
    fn build_element(&self) -> Element;

    /// Nested components, in document order
    fn nested_components(&self) -> Vec<&dyn Component> {
        Vec::new()
    }

    /// Attached attribute groups
    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        Vec::new()
    }

    /// Local name of the element
    fn name(&self) -> &str {
        &self.core().name().local_name
    }

    /// Namespace URI of the element
    fn namespace(&self) -> &str {
        self.core().namespace()
    }

    /// Prefixed name of the element
    fn qualified_name(&self) -> String {
        self.core().name().qualified()
    }

    /// Version the component was built under
    fn version(&self) -> DdmsVersion {
        self.core().version()
    }

    /// Warnings of this element and, located relative to it, of every
    /// nested component
    fn warnings(&self) -> &[ValidationMessage] {
        &self.core().warnings
    }

    /// The backing element
    fn to_element(&self) -> &Element {
        self.core().element()
    }

    /// Serialize the backing element
    fn to_xml(&self) -> Result<String> {
        self.to_element().to_xml_string(Some(2))
    }

    /// Render in any output format
    fn render(&self, format: OutputFormat, prefix: &str, suffix: &str) -> String {
        let settings = self.core().settings();
        let mut out = OutputSink::new(settings.output_index_level);
        self.write_output(&mut out, prefix, suffix);
        out.render(format, settings.json_pretty_print)
    }

    /// HTML meta tags
    fn to_html(&self) -> String {
        self.render(OutputFormat::Html, "", "")
    }

    /// Plain text lines
    fn to_text(&self) -> String {
        self.render(OutputFormat::Text, "", "")
    }

    /// A flat JSON object
    fn to_json(&self) -> JsonValue {
        let mut out = OutputSink::new(self.core().settings().output_index_level);
        self.write_output(&mut out, "", "");
        out.to_json()
    }
}

/// Validation every component gets after its own rules have passed
pub fn validate_base(component: &dyn Component) -> Result<()> {
    let version = component.version();
    for group in component.attribute_groups() {
        group.require_compatible(version)?;
        group.validate()?;
    }
    for child in component.nested_components() {
        if child.namespace() != component.namespace() {
            return Err(Error::invalid(format!(
                "A nested component, {}, is using a different version of DDMS ({}) than its parent ({}).",
                child.qualified_name(),
                child.version(),
                version
            )));
        }
    }
    Ok(())
}

fn collect_warnings(component: &dyn Component) -> Vec<ValidationMessage> {
    let locator = component.core().locator();
    let mut messages: Vec<ValidationMessage> = component
        .validate_warnings()
        .into_iter()
        .map(|text| ValidationMessage::warning(text, locator.as_str()))
        .collect();
    for child in component.nested_components() {
        messages.extend(child.warnings().iter().map(|m| m.nested_under(&locator)));
    }
    messages
}

/// Staged construction shared by every component type
pub(crate) trait Assemble: Component + Sized {
    fn core_mut(&mut self) -> &mut ComponentCore;

    /// Validate, collect warnings and freeze the element snapshot
    fn finalize(mut self) -> Result<Self> {
        let locator = self.core().locator();
        self.validate()
            .and_then(|_| validate_base(&self))
            .map_err(|e| e.located_at(&locator))?;

        let warnings = collect_warnings(&self);
        if !self.core().is_adopted() {
            let element = self.build_element();
            self.core_mut().element = element;
        }
        tracing::debug!(
            component = %self.qualified_name(),
            version = %self.version(),
            warnings = warnings.len(),
            "component validated"
        );
        self.core_mut().warnings = warnings;
        Ok(self)
    }
}

/// Read an attribute in the element's own namespace, trimmed
pub(crate) fn ddms_attribute(element: &Element, local_name: &str) -> Option<String> {
    element
        .get_attribute_ns(element.namespace().unwrap_or_default(), local_name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Text of every child with the given local name in the element's namespace
pub(crate) fn child_texts(element: &Element, local_name: &str) -> Vec<String> {
    element
        .children_named(element.namespace().unwrap_or_default(), local_name)
        .map(|child| child.text_content().trim().to_string())
        .collect()
}

/// Children with the given local name in the element's namespace
pub(crate) fn children<'a>(element: &'a Element, local_name: &'a str) -> Vec<&'a Element> {
    element
        .children_named(element.namespace().unwrap_or_default(), local_name)
        .collect()
}

/// Append one text child per value
pub(crate) fn add_text_children(element: &mut Element, core: &ComponentCore, local_name: &str, values: &[String]) {
    for value in values {
        let mut child = Element::new(core.child_name(local_name));
        child.set_text(value.as_str());
        element.add_child(child);
    }
}

/// Locator of the element a builder is about to assemble
pub(crate) fn locator_for(local_name: &str, ctx: &VersionContext) -> String {
    match ctx.prefix(NamespaceFamily::Ddms) {
        "" => format!("/{}", local_name),
        prefix => format!("/{}:{}", prefix, local_name),
    }
}

/// Local names of the components [`parse_component`] understands
pub fn supported_names(version: DdmsVersion) -> Vec<&'static str> {
    vec![
        Identifier::NAME,
        Language::NAME,
        SimpleStringKind::Title.name(),
        SimpleStringKind::Subtitle.name(),
        SimpleStringKind::Description.name(),
        SubOrganization::NAME,
        Keyword::NAME,
        Dates::NAME,
        Person::name_for(version),
        Organization::name_for(version),
        Link::NAME,
        RelatedResource::name_for(version),
    ]
}

/// Construct the component matching a parsed element
pub fn parse_component(element: &Element, ctx: &VersionContext) -> Result<Box<dyn Component>> {
    let version = ctx.version();
    let name = element.local_name();
    let component: Box<dyn Component> = match name {
        Identifier::NAME => Box::new(Identifier::from_element(element, ctx)?),
        Language::NAME => Box::new(Language::from_element(element, ctx)?),
        Keyword::NAME => Box::new(Keyword::from_element(element, ctx)?),
        Dates::NAME => Box::new(Dates::from_element(element, ctx)?),
        Link::NAME => Box::new(Link::from_element(element, ctx)?),
        SubOrganization::NAME => Box::new(SubOrganization::from_element(element, ctx)?),
        _ if name == Person::name_for(version) => Box::new(Person::from_element(element, ctx)?),
        _ if name == Organization::name_for(version) => Box::new(Organization::from_element(element, ctx)?),
        _ if name == RelatedResource::name_for(version) => {
            Box::new(RelatedResource::from_element(element, ctx)?)
        }
        _ => match SimpleStringKind::from_name(name) {
            Some(kind) => Box::new(SimpleString::from_element(kind, element, ctx)?),
            None => {
                return Err(Error::MalformedComponent {
                    expected: format!("one of {}", supported_names(version).join(", ")),
                    found: element.qname.to_string(),
                })
            }
        },
    };
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use pretty_assertions::assert_eq;

    const DDMS_5: &str = "urn:us:mil:ces:metadata:ddms:5";

    fn parse(xml: &str) -> Element {
        Document::from_string(xml).unwrap().into_root().unwrap()
    }

    #[test]
    fn test_adopt_rejects_wrong_name() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let element = parse(r#"<ddms:title xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"/>"#);
        let err = ComponentCore::adopt(&element, "identifier", &ctx).unwrap_err();
        assert!(matches!(err, Error::MalformedComponent { .. }));
    }

    #[test]
    fn test_adopt_rejects_wrong_version_namespace() {
        let ctx = VersionContext::new(DdmsVersion::V3_0);
        let element = parse(r#"<ddms:identifier xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"/>"#);
        assert!(ComponentCore::adopt(&element, "identifier", &ctx).is_err());
    }

    #[test]
    fn test_core_locator_and_child_names() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let core = ComponentCore::create("person", &ctx).unwrap();
        assert_eq!(core.locator(), "/ddms:person");
        assert_eq!(core.child_name("surname").qualified(), "ddms:surname");
        assert_eq!(core.namespace(), DDMS_5);
        assert!(!core.is_adopted());
    }

    #[test]
    fn test_core_equality_ignores_prefix() {
        let a = ComponentCore::create("title", &VersionContext::new(DdmsVersion::V5_0)).unwrap();
        let element = parse(r#"<d:title xmlns:d="urn:us:mil:ces:metadata:ddms:5"/>"#);
        let b = ComponentCore::adopt(&element, "title", &VersionContext::new(DdmsVersion::V5_0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_message_nesting() {
        let msg = ValidationMessage::warning("empty", "/ddms:subOrganization");
        let nested = msg.nested_under("/ddms:organization");
        assert_eq!(nested.locator, "/ddms:organization/ddms:subOrganization");
        assert_eq!(nested.to_string(), "warning at /ddms:organization/ddms:subOrganization: empty");
    }

    #[test]
    fn test_parse_component_dispatch() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let element = parse(
            r#"<ddms:identifier xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:qualifier="URI" ddms:value="x"/>"#,
        );
        let component = parse_component(&element, &ctx).unwrap();
        assert_eq!(component.name(), "identifier");
        assert_eq!(component.to_element(), &element);

        let unknown = parse(r#"<ddms:resource xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"/>"#);
        assert!(matches!(
            parse_component(&unknown, &ctx),
            Err(Error::MalformedComponent { .. })
        ));
    }

    #[test]
    fn test_parse_component_legacy_names() {
        let ctx = VersionContext::new(DdmsVersion::V3_0);
        let element = parse(
            r#"<ddms:Person xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/"><ddms:name>Brian</ddms:name><ddms:surname>Uri</ddms:surname></ddms:Person>"#,
        );
        let component = parse_component(&element, &ctx).unwrap();
        assert_eq!(component.qualified_name(), "ddms:Person");
        assert!(supported_names(DdmsVersion::V3_0).contains(&"Organization"));
        assert!(supported_names(DdmsVersion::V5_0).contains(&"organization"));
    }
}
