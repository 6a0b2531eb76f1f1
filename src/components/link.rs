//! ddms:link

use super::{locator_for, omitted, Assemble, Builder, Component, ComponentCore};
use crate::attributes::{AttributeGroup, GroupBuilder, XLinkAttributes, XLinkAttributesBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::VersionContext;

/// An XLink locator pointing at a related resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    core: ComponentCore,
    xlink: XLinkAttributes,
}

impl Link {
    /// Element name in every version
    pub const NAME: &'static str = "link";

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, Self::NAME, ctx)?;
        let xlink = XLinkAttributes::from_element(element, ctx).map_err(|e| e.located_at(&core.locator()))?;
        Self { core, xlink }.finalize()
    }

    /// Assemble from values
    pub fn new(xlink: XLinkAttributes, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::NAME, ctx)?,
            xlink,
        }
        .finalize()
    }

    /// The locator attributes
    pub fn xlink(&self) -> &XLinkAttributes {
        &self.xlink
    }
}

impl Component for Link {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        self.xlink.require_locator()
    }

    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        vec![&self.xlink]
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        self.xlink.write_output(out, &build_prefix(prefix, self.name(), suffix));
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        self.xlink.add_to(&mut element);
        element
    }
}

impl Assemble for Link {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Link`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBuilder {
    /// The locator attributes
    pub xlink: XLinkAttributesBuilder,
}

impl LinkBuilder {
    /// A builder for a locator link to `href`
    pub fn locator(href: impl Into<String>) -> Self {
        Self {
            xlink: XLinkAttributesBuilder {
                link_type: Some("locator".to_string()),
                href: Some(href.into()),
                ..Default::default()
            },
        }
    }
}

impl Builder for LinkBuilder {
    type Target = Link;

    fn is_empty(&self) -> bool {
        self.xlink.is_empty()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Link>> {
        if self.is_empty() {
            return omitted("LinkBuilder");
        }
        let xlink = self
            .xlink
            .commit(ctx)
            .map_err(|e| e.located_at(&locator_for(Link::NAME, ctx)))?;
        Link::new(xlink, ctx).map(Some)
    }
}

impl From<&Link> for LinkBuilder {
    fn from(link: &Link) -> Self {
        Self {
            xlink: XLinkAttributesBuilder::from(&link.xlink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::version::DdmsVersion;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_element() {
        let ctx = VersionContext::new(DdmsVersion::V4_1);
        let xml = r#"<ddms:link xmlns:ddms="urn:us:mil:ces:metadata:ddms:4" xmlns:xlink="http://www.w3.org/1999/xlink" xlink:type="locator" xlink:href="http://en.wikipedia.org/wiki/Tank" xlink:role="tank" xlink:title="Tank Page" xlink:label="tank"/>"#;
        let element = Document::from_string(xml).unwrap().into_root().unwrap();
        let link = Link::from_element(&element, &ctx).unwrap();
        assert_eq!(link.xlink().href(), Some("http://en.wikipedia.org/wiki/Tank"));
        assert_eq!(link.xlink().label(), Some("tank"));
    }

    #[test]
    fn test_requires_locator() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let builder = LinkBuilder {
            xlink: XLinkAttributesBuilder {
                link_type: Some("simple".to_string()),
                href: Some("http://x".to_string()),
                ..Default::default()
            },
        };
        let err = builder.commit(&ctx).unwrap_err();
        assert!(err.to_string().contains("locator"));
        assert_eq!(err.locator(), Some("/ddms:link"));
    }

    #[test]
    fn test_output() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let link = LinkBuilder::locator("http://x").commit(&ctx).unwrap().unwrap();
        assert_eq!(link.to_text(), "link.type: locator\nlink.href: http://x\n");
    }

    #[test]
    fn test_builder_round_trip() {
        let ctx = VersionContext::new(DdmsVersion::V3_0);
        assert!(LinkBuilder::default().commit(&ctx).unwrap().is_none());
        let link = LinkBuilder::locator("http://x").commit(&ctx).unwrap().unwrap();
        assert_eq!(LinkBuilder::from(&link).commit(&ctx).unwrap(), Some(link.clone()));
        assert_eq!(Link::from_element(link.to_element(), &ctx).unwrap(), link);
    }

    #[test]
    fn test_builder_errors_are_located() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = LinkBuilder::locator("http://x");
        builder.xlink.show = Some("sideways".to_string());
        let err = builder.commit(&ctx).unwrap_err();
        assert!(err.to_string().contains("show"));
        assert_eq!(err.locator(), Some("/ddms:link"));
    }
}
