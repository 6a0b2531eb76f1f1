//! ddms:identifier

use super::{clean, ddms_attribute, omitted, Assemble, Builder, Component, ComponentCore};
use crate::datatypes::is_valid_uri;
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::VersionContext;

/// A qualifier/value pair identifying a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    core: ComponentCore,
    qualifier: String,
    value: String,
}

impl Identifier {
    /// Element name in every version
    pub const NAME: &'static str = "identifier";

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::adopt(element, Self::NAME, ctx)?,
            qualifier: ddms_attribute(element, "qualifier").unwrap_or_default(),
            value: ddms_attribute(element, "value").unwrap_or_default(),
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(qualifier: &str, value: &str, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::NAME, ctx)?,
            qualifier: qualifier.trim().to_string(),
            value: value.trim().to_string(),
        }
        .finalize()
    }

    /// The scheme the value belongs to
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// The identifier itself
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Component for Identifier {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if self.qualifier.is_empty() {
            return Err(self.core.fail("qualifier attribute is required."));
        }
        if !is_valid_uri(&self.qualifier) {
            return Err(self.core.fail(format!("Invalid URI: {}", self.qualifier)));
        }
        if self.value.is_empty() {
            return Err(self.core.fail("value attribute is required."));
        }
        Ok(())
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, self.name(), suffix);
        out.push(format!("{}qualifier", prefix), &self.qualifier);
        out.push(format!("{}value", prefix), &self.value);
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        element.set_attribute(self.core.child_name("qualifier"), self.qualifier.as_str());
        element.set_attribute(self.core.child_name("value"), self.value.as_str());
        element
    }
}

impl Assemble for Identifier {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Identifier`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierBuilder {
    /// The scheme the value belongs to
    pub qualifier: Option<String>,
    /// The identifier itself
    pub value: Option<String>,
}

impl Builder for IdentifierBuilder {
    type Target = Identifier;

    fn is_empty(&self) -> bool {
        clean(self.qualifier.as_deref()).is_none() && clean(self.value.as_deref()).is_none()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Identifier>> {
        if self.is_empty() {
            return omitted("IdentifierBuilder");
        }
        Identifier::new(
            self.qualifier.as_deref().unwrap_or_default(),
            self.value.as_deref().unwrap_or_default(),
            ctx,
        )
        .map(Some)
    }
}

impl From<&Identifier> for IdentifierBuilder {
    fn from(identifier: &Identifier) -> Self {
        Self {
            qualifier: Some(identifier.qualifier.clone()),
            value: Some(identifier.value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::version::DdmsVersion;
    use pretty_assertions::assert_eq;

    const QUALIFIER: &str = "URI";
    const VALUE: &str = "urn:buri:ddmsence:testIdentifier";

    #[test]
    fn test_from_element_in_every_version() {
        for version in DdmsVersion::ALL {
            let ctx = VersionContext::new(version);
            let xml = format!(
                r#"<ddms:identifier xmlns:ddms="{}" ddms:qualifier="{}" ddms:value="{}"/>"#,
                version.ddms_namespace(),
                QUALIFIER,
                VALUE
            );
            let element = Document::from_string(&xml).unwrap().into_root().unwrap();
            let identifier = Identifier::from_element(&element, &ctx).unwrap();
            assert_eq!(identifier.qualifier(), QUALIFIER);
            assert_eq!(identifier.value(), VALUE);
            assert_eq!(identifier, Identifier::new(QUALIFIER, VALUE, &ctx).unwrap());
        }
    }

    #[test]
    fn test_missing_value() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let err = Identifier::new(QUALIFIER, "", &ctx).unwrap_err();
        assert!(err.to_string().contains("value"));
        assert_eq!(err.locator(), Some("/ddms:identifier"));
    }

    #[test]
    fn test_invalid_qualifier() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        assert!(Identifier::new("", VALUE, &ctx).is_err());
        assert!(Identifier::new("not a uri", VALUE, &ctx).is_err());
    }

    #[test]
    fn test_output() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let identifier = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
        assert_eq!(
            identifier.to_text(),
            format!("identifier.qualifier: {}\nidentifier.value: {}\n", QUALIFIER, VALUE)
        );
        assert!(identifier.warnings().is_empty());
    }

    #[test]
    fn test_built_element() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let identifier = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
        assert_eq!(
            identifier.to_element().to_xml_string(None).unwrap(),
            format!(
                r#"<ddms:identifier xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:qualifier="{}" ddms:value="{}"/>"#,
                QUALIFIER, VALUE
            )
        );
    }

    #[test]
    fn test_builder() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = IdentifierBuilder::default();
        assert!(builder.is_empty());
        assert!(builder.commit(&ctx).unwrap().is_none());

        builder.value = Some(VALUE.to_string());
        assert!(builder.commit(&ctx).is_err());

        builder.qualifier = Some(QUALIFIER.to_string());
        let identifier = builder.commit(&ctx).unwrap().unwrap();
        assert_eq!(IdentifierBuilder::from(&identifier).commit(&ctx).unwrap(), Some(identifier));
    }
}
