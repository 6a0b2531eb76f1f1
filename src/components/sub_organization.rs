//! ddms:subOrganization

use super::{clean, locator_for, omitted, Assemble, Builder, Component, ComponentCore};
use crate::attributes::{AttributeGroup, GroupBuilder, SecurityAttributes, SecurityAttributesBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputSink;
use crate::version::{DdmsVersion, VersionContext};

/// A named unit within an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubOrganization {
    core: ComponentCore,
    text: String,
    security: SecurityAttributes,
}

impl SubOrganization {
    /// Element name
    pub const NAME: &'static str = "subOrganization";

    /// First version the element exists in
    pub const SINCE: DdmsVersion = DdmsVersion::V4_0_1;

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, Self::NAME, ctx)?;
        let security = SecurityAttributes::from_element(element, ctx).map_err(|e| e.located_at(&core.locator()))?;
        Self {
            core,
            text: element.text_content().trim().to_string(),
            security,
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(text: &str, security: SecurityAttributes, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::NAME, ctx)?,
            text: text.trim().to_string(),
            security,
        }
        .finalize()
    }

    /// The name of the unit
    pub fn text(&self) -> &str {
        &self.text
    }

    /// ISM markings
    pub fn security(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for SubOrganization {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if !self.version().is_at_least(Self::SINCE) {
            return Err(self.core.fail(format!(
                "The subOrganization element cannot be used until DDMS {} or later.",
                Self::SINCE
            )));
        }
        if self.text.is_empty() {
            return Err(self.core.fail("subOrganization value is required."));
        }
        Ok(())
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
        element.set_text(self.text.as_str());
        self.security.add_to(&mut element);
        element
    }
}

impl Assemble for SubOrganization {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`SubOrganization`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubOrganizationBuilder {
    /// The name of the unit
    pub text: Option<String>,
    /// ISM markings
    pub security: SecurityAttributesBuilder,
}

impl Builder for SubOrganizationBuilder {
    type Target = SubOrganization;

    fn is_empty(&self) -> bool {
        clean(self.text.as_deref()).is_none() && self.security.is_empty()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<SubOrganization>> {
        if self.is_empty() {
            return omitted("SubOrganizationBuilder");
        }
        let security = self
            .security
            .commit(ctx)
            .map_err(|e| e.located_at(&locator_for(SubOrganization::NAME, ctx)))?;
        SubOrganization::new(self.text.as_deref().unwrap_or_default(), security, ctx).map(Some)
    }
}

impl From<&SubOrganization> for SubOrganizationBuilder {
    fn from(sub: &SubOrganization) -> Self {
        Self {
            text: Some(sub.text.clone()),
            security: SecurityAttributesBuilder::from(&sub.security),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;

    #[test]
    fn test_from_element() {
        let ctx = VersionContext::new(DdmsVersion::V4_1);
        let xml = r#"<ddms:subOrganization xmlns:ddms="urn:us:mil:ces:metadata:ddms:4" xmlns:ISM="urn:us:gov:ic:ism" ISM:classification="U" ISM:ownerProducer="USA">sub1</ddms:subOrganization>"#;
        let element = Document::from_string(xml).unwrap().into_root().unwrap();
        let sub = SubOrganization::from_element(&element, &ctx).unwrap();
        assert_eq!(sub.text(), "sub1");
        assert!(!sub.security().is_empty());
    }

    #[test]
    fn test_version_gate() {
        for version in DdmsVersion::ALL {
            let ctx = VersionContext::new(version);
            let result = SubOrganization::new("sub1", SecurityAttributes::empty(&ctx), &ctx);
            assert_eq!(result.is_ok(), version.is_at_least(SubOrganization::SINCE), "{version}");
        }
    }

    #[test]
    fn test_text_required() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        assert!(SubOrganization::new("", SecurityAttributes::empty(&ctx), &ctx).is_err());
    }

    #[test]
    fn test_builder() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let builder = SubOrganizationBuilder {
            text: Some("sub1".to_string()),
            ..Default::default()
        };
        let sub = builder.commit(&ctx).unwrap().unwrap();
        assert!(sub.security().is_empty());
        assert_eq!(sub.to_text(), "subOrganization: sub1\n");
        assert_eq!(SubOrganizationBuilder::from(&sub), builder);
    }

    #[test]
    fn test_builder_errors_are_located() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = SubOrganizationBuilder {
            text: Some("sub1".to_string()),
            ..Default::default()
        };
        builder.security.set("classification", "bogus");
        let err = builder.commit(&ctx).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:subOrganization"));
    }
}
