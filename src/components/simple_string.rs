//! ddms:title, ddms:subtitle and ddms:description
//!
//! Three elements with the same shape: child text plus ISM markings.

use super::{clean, locator_for, omitted, Assemble, Builder, Component, ComponentCore};
use crate::attributes::{AttributeGroup, GroupBuilder, SecurityAttributes, SecurityAttributesBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputSink;
use crate::version::VersionContext;
use std::fmt;

/// Which simple string element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SimpleStringKind {
    /// ddms:title
    #[default]
    Title,
    /// ddms:subtitle
    Subtitle,
    /// ddms:description
    Description,
}

impl SimpleStringKind {
    /// Element name in every version
    pub const fn name(&self) -> &'static str {
        match self {
            SimpleStringKind::Title => "title",
            SimpleStringKind::Subtitle => "subtitle",
            SimpleStringKind::Description => "description",
        }
    }

    /// Look up a kind by element name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(SimpleStringKind::Title),
            "subtitle" => Some(SimpleStringKind::Subtitle),
            "description" => Some(SimpleStringKind::Description),
            _ => None,
        }
    }
}

impl fmt::Display for SimpleStringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A marked block of text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleString {
    core: ComponentCore,
    kind: SimpleStringKind,
    text: String,
    security: SecurityAttributes,
}

impl SimpleString {
    /// Adopt a parsed element
    pub fn from_element(kind: SimpleStringKind, element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, kind.name(), ctx)?;
        let security = SecurityAttributes::from_element(element, ctx).map_err(|e| e.located_at(&core.locator()))?;
        Self {
            core,
            kind,
            text: element.text_content().trim().to_string(),
            security,
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(kind: SimpleStringKind, text: &str, security: SecurityAttributes, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::create(kind.name(), ctx)?,
            kind,
            text: text.trim().to_string(),
            security,
        }
        .finalize()
    }

    /// Assemble a ddms:title
    pub fn title(text: &str, security: SecurityAttributes, ctx: &VersionContext) -> Result<Self> {
        Self::new(SimpleStringKind::Title, text, security, ctx)
    }

    /// Assemble a ddms:subtitle
    pub fn subtitle(text: &str, security: SecurityAttributes, ctx: &VersionContext) -> Result<Self> {
        Self::new(SimpleStringKind::Subtitle, text, security, ctx)
    }

    /// Assemble a ddms:description
    pub fn description(text: &str, security: SecurityAttributes, ctx: &VersionContext) -> Result<Self> {
        Self::new(SimpleStringKind::Description, text, security, ctx)
    }

    /// Which element this is
    pub fn kind(&self) -> SimpleStringKind {
        self.kind
    }

    /// The text, trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// ISM markings
    pub fn security(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for SimpleString {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if self.kind == SimpleStringKind::Title && self.text.is_empty() {
            return Err(self.core.fail("title child text is required."));
        }
        self.security.require_classification()
    }

    fn validate_warnings(&self) -> Vec<String> {
        if self.kind != SimpleStringKind::Title && self.text.is_empty() {
            vec![format!("A ddms:{} element was found with no value.", self.kind)]
        } else {
            Vec::new()
        }
    }

    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        vec![&self.security]
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let key = format!("{}{}{}", prefix, self.name(), suffix);
        out.push(key.as_str(), &self.text);
        self.security.write_output(out, &format!("{}.", key));
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        if !self.text.is_empty() {
            element.set_text(self.text.as_str());
        }
        self.security.add_to(&mut element);
        element
    }
}

impl Assemble for SimpleString {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`SimpleString`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleStringBuilder {
    /// Which element to build
    pub kind: SimpleStringKind,
    /// The text
    pub text: Option<String>,
    /// ISM markings
    pub security: SecurityAttributesBuilder,
}

impl SimpleStringBuilder {
    /// An empty builder for a kind
    pub fn new(kind: SimpleStringKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

impl Builder for SimpleStringBuilder {
    type Target = SimpleString;

    fn is_empty(&self) -> bool {
        clean(self.text.as_deref()).is_none() && self.security.is_empty()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<SimpleString>> {
        if self.is_empty() {
            return omitted("SimpleStringBuilder");
        }
        let security = self
            .security
            .commit(ctx)
            .map_err(|e| e.located_at(&locator_for(self.kind.name(), ctx)))?;
        SimpleString::new(self.kind, self.text.as_deref().unwrap_or_default(), security, ctx).map(Some)
    }
}

impl From<&SimpleString> for SimpleStringBuilder {
    fn from(value: &SimpleString) -> Self {
        Self {
            kind: value.kind,
            text: Some(value.text.clone()),
            security: SecurityAttributesBuilder::from(&value.security),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::version::DdmsVersion;
    use pretty_assertions::assert_eq;

    fn ctx() -> VersionContext {
        VersionContext::new(DdmsVersion::V5_0)
    }

    fn unclassified() -> SecurityAttributes {
        SecurityAttributes::with_classification("U", &["USA"], &ctx()).unwrap()
    }

    #[test]
    fn test_from_element() {
        let xml = r#"<ddms:title xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" xmlns:ISM="urn:us:gov:ic:ism" ISM:classification="U" ISM:ownerProducer="USA">DDMSence Title</ddms:title>"#;
        let element = Document::from_string(xml).unwrap().into_root().unwrap();
        let title = SimpleString::from_element(SimpleStringKind::Title, &element, &ctx()).unwrap();
        assert_eq!(title.text(), "DDMSence Title");
        assert_eq!(title.security().classification(), Some("U"));
        assert_eq!(title, SimpleString::title("DDMSence Title", unclassified(), &ctx()).unwrap());
    }

    #[test]
    fn test_title_requires_text() {
        let err = SimpleString::title(" ", unclassified(), &ctx()).unwrap_err();
        assert!(err.to_string().contains("title child text is required."));
    }

    #[test]
    fn test_classification_required() {
        let err = SimpleString::title("A Title", SecurityAttributes::empty(&ctx()), &ctx()).unwrap_err();
        assert!(err.to_string().contains("classification is required."));
        assert_eq!(err.locator(), Some("/ddms:title"));
    }

    #[test]
    fn test_empty_description_warns() {
        let description = SimpleString::description("", unclassified(), &ctx()).unwrap();
        assert_eq!(description.warnings().len(), 1);
        assert!(description.warnings()[0].text.contains("ddms:description"));
    }

    #[test]
    fn test_security_version_must_match() {
        let old = SecurityAttributes::with_classification("U", &["USA"], &VersionContext::new(DdmsVersion::V3_0)).unwrap();
        assert!(SimpleString::subtitle("Sub", old, &ctx()).is_err());
    }

    #[test]
    fn test_output() {
        let title = SimpleString::title("A & B", unclassified(), &ctx()).unwrap();
        assert_eq!(
            title.to_html(),
            "<meta name=\"title\" content=\"A &amp; B\" />\n\
             <meta name=\"title.classification\" content=\"U\" />\n\
             <meta name=\"title.ownerProducer\" content=\"USA\" />\n"
        );
    }

    #[test]
    fn test_builder() {
        let mut builder = SimpleStringBuilder::new(SimpleStringKind::Subtitle);
        assert!(builder.commit(&ctx()).unwrap().is_none());

        builder.text = Some("Sub".to_string());
        assert!(builder.commit(&ctx()).is_err());

        builder.security.set("classification", "U").set("ownerProducer", "USA");
        let subtitle = builder.commit(&ctx()).unwrap().unwrap();
        assert_eq!(subtitle.kind(), SimpleStringKind::Subtitle);
        assert_eq!(SimpleStringBuilder::from(&subtitle).commit(&ctx()).unwrap(), Some(subtitle));
    }

    #[test]
    fn test_builder_errors_are_located() {
        let mut builder = SimpleStringBuilder::new(SimpleStringKind::Description);
        builder.text = Some("A description".to_string());
        builder.security.set("classification", "bogus").set("ownerProducer", "USA");
        let err = builder.commit(&ctx()).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:description"));
    }
}
