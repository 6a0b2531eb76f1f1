//! ddms:keyword

use super::{clean, ddms_attribute, locator_for, omitted, Assemble, Builder, Component, ComponentCore};
use crate::attributes::{
    AttributeGroup, ExtensibleAttributes, ExtensibleAttributesBuilder, GroupBuilder, SecurityAttributes,
    SecurityAttributesBuilder,
};
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::{DdmsVersion, VersionContext};

/// A keyword describing a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword {
    core: ComponentCore,
    value: String,
    security: SecurityAttributes,
    extensible: ExtensibleAttributes,
}

impl Keyword {
    /// Element name in every version
    pub const NAME: &'static str = "keyword";

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, Self::NAME, ctx)?;
        let locator = core.locator();
        let security = SecurityAttributes::from_element(element, ctx).map_err(|e| e.located_at(&locator))?;
        let extensible = ExtensibleAttributes::from_element(element, ctx).map_err(|e| e.located_at(&locator))?;
        Self {
            core,
            value: ddms_attribute(element, "value").unwrap_or_default(),
            security,
            extensible,
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(
        value: &str,
        security: SecurityAttributes,
        extensible: ExtensibleAttributes,
        ctx: &VersionContext,
    ) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::NAME, ctx)?,
            value: value.trim().to_string(),
            security,
            extensible,
        }
        .finalize()
    }

    /// The keyword
    pub fn value(&self) -> &str {
        &self.value
    }

    /// ISM markings; only allowed from DDMS 4.1
    pub fn security(&self) -> &SecurityAttributes {
        &self.security
    }

    /// Attributes from foreign namespaces; not allowed in DDMS 2.0
    pub fn extensible(&self) -> &ExtensibleAttributes {
        &self.extensible
    }
}

impl Component for Keyword {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if self.value.is_empty() {
            return Err(self.core.fail("value attribute is required."));
        }
        if self.version() == DdmsVersion::V2_0 {
            self.extensible
                .require_absent("xs:anyAttribute cannot be applied to ddms:keyword in DDMS 2.0.")
                .map_err(|e| e.located_at(&self.core.locator()))?;
        }
        if !self.version().is_at_least(DdmsVersion::V4_1) && !self.security.is_empty() {
            return Err(self.core.fail(
                "Security attributes cannot be applied to this component until DDMS 4.1 or later.",
            ));
        }
        Ok(())
    }

    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        vec![&self.security as &dyn AttributeGroup, &self.extensible]
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, self.name(), suffix);
        out.push(format!("{}value", prefix), &self.value);
        self.security.write_output(out, &prefix);
        self.extensible.write_output(out, &prefix);
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        element.set_attribute(self.core.child_name("value"), self.value.as_str());
        self.security.add_to(&mut element);
        self.extensible.add_to(&mut element);
        element
    }
}

impl Assemble for Keyword {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Keyword`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordBuilder {
    /// The keyword
    pub value: Option<String>,
    /// ISM markings
    pub security: SecurityAttributesBuilder,
    /// Attributes from foreign namespaces
    pub extensible: ExtensibleAttributesBuilder,
}

impl Builder for KeywordBuilder {
    type Target = Keyword;

    fn is_empty(&self) -> bool {
        clean(self.value.as_deref()).is_none() && self.security.is_empty() && self.extensible.is_empty()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Keyword>> {
        if self.is_empty() {
            return omitted("KeywordBuilder");
        }
        let locator = locator_for(Keyword::NAME, ctx);
        Keyword::new(
            self.value.as_deref().unwrap_or_default(),
            self.security.commit(ctx).map_err(|e| e.located_at(&locator))?,
            self.extensible.commit(ctx).map_err(|e| e.located_at(&locator))?,
            ctx,
        )
        .map(Some)
    }
}

impl From<&Keyword> for KeywordBuilder {
    fn from(keyword: &Keyword) -> Self {
        Self {
            value: Some(keyword.value.clone()),
            security: SecurityAttributesBuilder::from(&keyword.security),
            extensible: ExtensibleAttributesBuilder::from(&keyword.extensible),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ExtensibleAttribute;
    use crate::documents::Document;
    use pretty_assertions::assert_eq;

    fn relevance() -> ExtensibleAttribute {
        ExtensibleAttribute::new("opensearch", "http://a9.com/-/spec/opensearch/1.1/", "relevance", "95")
    }

    fn plain(value: &str, ctx: &VersionContext) -> Result<Keyword> {
        Keyword::new(value, SecurityAttributes::empty(ctx), ExtensibleAttributes::empty(ctx), ctx)
    }

    #[test]
    fn test_from_element() {
        let ctx = VersionContext::new(DdmsVersion::V3_0);
        let xml = r#"<ddms:keyword xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/" ddms:value="DDMSence" opensearch:relevance="95"/>"#;
        let element = Document::from_string(xml).unwrap().into_root().unwrap();
        let keyword = Keyword::from_element(&element, &ctx).unwrap();
        assert_eq!(keyword.value(), "DDMSence");
        assert_eq!(keyword.extensible().attributes(), &[relevance()]);
        assert_eq!(keyword.to_element(), &element);
    }

    #[test]
    fn test_value_required() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let err = plain("", &ctx).unwrap_err();
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn test_extensible_not_in_2_0() {
        let ctx = VersionContext::new(DdmsVersion::V2_0);
        let extensible = ExtensibleAttributes::new(vec![relevance()], &ctx).unwrap();
        let err = Keyword::new("x", SecurityAttributes::empty(&ctx), extensible, &ctx).unwrap_err();
        assert!(err.to_string().contains("DDMS 2.0"));
    }

    #[test]
    fn test_security_version_gate() {
        for version in DdmsVersion::ALL {
            let ctx = VersionContext::new(version);
            let security = SecurityAttributes::with_classification("U", &["USA"], &ctx).unwrap();
            let result = Keyword::new("x", security, ExtensibleAttributes::empty(&ctx), &ctx);
            assert_eq!(result.is_ok(), version.is_at_least(DdmsVersion::V4_1), "{version}");
        }
    }

    #[test]
    fn test_output() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let extensible = ExtensibleAttributes::new(vec![relevance()], &ctx).unwrap();
        let keyword = Keyword::new("DDMSence", SecurityAttributes::empty(&ctx), extensible, &ctx).unwrap();
        assert_eq!(
            keyword.to_text(),
            "keyword.value: DDMSence\nkeyword.opensearch:relevance: 95\n"
        );
    }

    #[test]
    fn test_builder() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = KeywordBuilder::default();
        assert!(builder.commit(&ctx).unwrap().is_none());

        builder.extensible.push(relevance());
        assert!(!builder.is_empty());
        assert!(builder.commit(&ctx).is_err());

        builder.value = Some("DDMSence".to_string());
        let keyword = builder.commit(&ctx).unwrap().unwrap();
        assert_eq!(KeywordBuilder::from(&keyword).commit(&ctx).unwrap(), Some(keyword));
    }

    #[test]
    fn test_builder_errors_are_located() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = KeywordBuilder {
            value: Some("DDMSence".to_string()),
            ..Default::default()
        };
        builder.security.set("classification", "bogus");
        let err = builder.commit(&ctx).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:keyword"));

        let mut builder = KeywordBuilder {
            value: Some("DDMSence".to_string()),
            ..Default::default()
        };
        builder.extensible.push(ExtensibleAttribute::new("", "urn:other", "relevance", "95"));
        let err = builder.commit(&ctx).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:keyword"));
    }

    #[test]
    fn test_extensible_survives_xml_round_trip() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = KeywordBuilder {
            value: Some("DDMSence".to_string()),
            ..Default::default()
        };
        builder.extensible.push(relevance());
        let keyword = builder.commit(&ctx).unwrap().unwrap();

        let xml = keyword.to_xml().unwrap();
        assert!(xml.contains(r#"opensearch:relevance="95""#));
        let element = Document::from_string(&xml).unwrap().into_root().unwrap();
        let reparsed = Keyword::from_element(&element, &ctx).unwrap();
        assert_eq!(reparsed.extensible().attributes(), &[relevance()]);
        assert_eq!(reparsed, keyword);
    }
}
