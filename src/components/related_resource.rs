//! ddms:relatedResource
//!
//! Before DDMS 4.0.1 the relationship lived on a `ddms:RelatedResources`
//! wrapper and the resource itself on nested `ddms:RelatedResource`
//! elements. Only the first nested resource of a wrapper is read; the rest
//! are dropped with a warning.

use super::{
    children, clean, commit_all, ddms_attribute, locator_for, omitted, Assemble, Builder, Component, ComponentCore, Link,
    LinkBuilder,
};
use crate::attributes::{AttributeGroup, GroupBuilder, SecurityAttributes, SecurityAttributesBuilder};
use crate::datatypes::is_valid_uri;
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::output::{build_prefix, OutputSink};
use crate::version::{DdmsVersion, VersionContext};
use std::fmt;
use std::str::FromStr;

const LEGACY_RESOURCE_NAME: &str = "RelatedResource";
const OUTPUT_NAME: &str = "relatedResource";

/// Direction of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The related resource points at this one
    Inbound,
    /// This resource points at the related one
    Outbound,
    /// Both
    Bidirectional,
}

impl Direction {
    /// The attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
            Direction::Bidirectional => "bidirectional",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inbound" => Ok(Direction::Inbound),
            "outbound" => Ok(Direction::Outbound),
            "bidirectional" => Ok(Direction::Bidirectional),
            other => Err(Error::invalid(format!(
                "The direction attribute must be one of inbound, outbound or bidirectional, not {}.",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resource related to the one being described
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelatedResource {
    core: ComponentCore,
    relationship: String,
    direction: Option<Direction>,
    qualifier: String,
    value: String,
    links: Vec<Link>,
    security: SecurityAttributes,
}

impl RelatedResource {
    /// Element name in a version
    pub fn name_for(version: DdmsVersion) -> &'static str {
        if version.is_at_least(DdmsVersion::V4_0_1) {
            "relatedResource"
        } else {
            "RelatedResources"
        }
    }

    fn is_legacy(version: DdmsVersion) -> bool {
        !version.is_at_least(DdmsVersion::V4_0_1)
    }

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, Self::name_for(ctx.version()), ctx)?;
        let locator = core.locator();
        let security = SecurityAttributes::from_element(element, ctx).map_err(|e| e.located_at(&locator))?;
        let direction = ddms_attribute(element, "direction")
            .map(|d| d.parse())
            .transpose()
            .map_err(|e: Error| e.located_at(&locator))?;

        let resource = if Self::is_legacy(ctx.version()) {
            children(element, LEGACY_RESOURCE_NAME)
                .first()
                .copied()
                .ok_or_else(|| core.fail("At least 1 RelatedResource element must exist."))?
        } else {
            element
        };
        let links = children(resource, Link::NAME)
            .into_iter()
            .map(|child| Link::from_element(child, ctx))
            .collect::<Result<Vec<_>>>()?;

        Self {
            relationship: ddms_attribute(element, "relationship").unwrap_or_default(),
            direction,
            qualifier: ddms_attribute(resource, "qualifier").unwrap_or_default(),
            value: ddms_attribute(resource, "value").unwrap_or_default(),
            links,
            security,
            core,
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(
        relationship: &str,
        direction: Option<Direction>,
        qualifier: &str,
        value: &str,
        links: Vec<Link>,
        security: SecurityAttributes,
        ctx: &VersionContext,
    ) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::name_for(ctx.version()), ctx)?,
            relationship: relationship.trim().to_string(),
            direction,
            qualifier: qualifier.trim().to_string(),
            value: value.trim().to_string(),
            links,
            security,
        }
        .finalize()
    }

    /// URI of the relationship
    pub fn relationship(&self) -> &str {
        &self.relationship
    }

    /// Direction of the relationship
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Scheme of the related resource's identifier
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// Identifier of the related resource
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Links to the related resource
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// ISM markings
    pub fn security(&self) -> &SecurityAttributes {
        &self.security
    }

    fn set_resource_attributes(&self, element: &mut Element) {
        element.set_attribute(self.core.child_name("qualifier"), self.qualifier.as_str());
        element.set_attribute(self.core.child_name("value"), self.value.as_str());
        for link in &self.links {
            element.add_child(link.to_element().clone());
        }
    }
}

impl Component for RelatedResource {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if self.relationship.is_empty() {
            return Err(self.core.fail("relationship attribute is required."));
        }
        if !is_valid_uri(&self.relationship) {
            return Err(self.core.fail(format!("Invalid URI: {}", self.relationship)));
        }
        if self.qualifier.is_empty() {
            return Err(self.core.fail("qualifier attribute is required."));
        }
        if !is_valid_uri(&self.qualifier) {
            return Err(self.core.fail(format!("Invalid URI: {}", self.qualifier)));
        }
        if self.value.is_empty() {
            return Err(self.core.fail("value attribute is required."));
        }
        if self.links.is_empty() {
            return Err(self.core.fail("At least 1 link must exist."));
        }
        Ok(())
    }

    fn validate_warnings(&self) -> Vec<String> {
        let element = self.core.element();
        if self.core.is_adopted()
            && Self::is_legacy(self.version())
            && children(element, LEGACY_RESOURCE_NAME).len() > 1
        {
            vec![format!(
                "A ddms:{} element contains more than 1 ddms:{}. Only the first one was loaded.",
                self.name(),
                LEGACY_RESOURCE_NAME
            )]
        } else {
            Vec::new()
        }
    }

    fn nested_components(&self) -> Vec<&dyn Component> {
        self.links.iter().map(|link| link as &dyn Component).collect()
    }

    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        vec![&self.security]
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, OUTPUT_NAME, suffix);
        out.push(format!("{}relationship", prefix), &self.relationship);
        out.push_opt(format!("{}direction", prefix), self.direction.map(|d| d.as_str()));
        out.push(format!("{}qualifier", prefix), &self.qualifier);
        out.push(format!("{}value", prefix), &self.value);
        let total = self.links.len();
        for (i, link) in self.links.iter().enumerate() {
            let index = out.index(i, total);
            link.write_output(out, &prefix, &index);
        }
        self.security.write_output(out, &prefix);
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        element.set_attribute(self.core.child_name("relationship"), self.relationship.as_str());
        element.set_optional_attribute(self.core.child_name("direction"), self.direction.map(|d| d.as_str()));
        if Self::is_legacy(self.version()) {
            let mut resource = Element::new(self.core.child_name(LEGACY_RESOURCE_NAME));
            self.set_resource_attributes(&mut resource);
            element.add_child(resource);
        } else {
            self.set_resource_attributes(&mut element);
        }
        self.security.add_to(&mut element);
        element
    }
}

impl Assemble for RelatedResource {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`RelatedResource`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedResourceBuilder {
    /// URI of the relationship
    pub relationship: Option<String>,
    /// Direction of the relationship
    pub direction: Option<String>,
    /// Scheme of the related resource's identifier
    pub qualifier: Option<String>,
    /// Identifier of the related resource
    pub value: Option<String>,
    /// Links to the related resource
    pub links: Vec<LinkBuilder>,
    /// ISM markings
    pub security: SecurityAttributesBuilder,
}

impl Builder for RelatedResourceBuilder {
    type Target = RelatedResource;

    fn is_empty(&self) -> bool {
        [&self.relationship, &self.direction, &self.qualifier, &self.value]
            .into_iter()
            .all(|v| clean(v.as_deref()).is_none())
            && super::all_empty(&self.links)
            && self.security.is_empty()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<RelatedResource>> {
        if self.is_empty() {
            return omitted("RelatedResourceBuilder");
        }
        let locator = locator_for(RelatedResource::name_for(ctx.version()), ctx);
        let direction = clean(self.direction.as_deref())
            .map(|d| d.parse())
            .transpose()
            .map_err(|e: Error| e.located_at(&locator))?;
        RelatedResource::new(
            self.relationship.as_deref().unwrap_or_default(),
            direction,
            self.qualifier.as_deref().unwrap_or_default(),
            self.value.as_deref().unwrap_or_default(),
            commit_all(&self.links, ctx)?,
            self.security.commit(ctx).map_err(|e| e.located_at(&locator))?,
            ctx,
        )
        .map(Some)
    }
}

impl From<&RelatedResource> for RelatedResourceBuilder {
    fn from(resource: &RelatedResource) -> Self {
        Self {
            relationship: Some(resource.relationship.clone()),
            direction: resource.direction.map(|d| d.as_str().to_string()),
            qualifier: Some(resource.qualifier.clone()),
            value: Some(resource.value.clone()),
            links: resource.links.iter().map(LinkBuilder::from).collect(),
            security: SecurityAttributesBuilder::from(&resource.security),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use pretty_assertions::assert_eq;

    const RELATIONSHIP: &str = "http://purl.org/dc/terms/references";

    fn builder() -> RelatedResourceBuilder {
        RelatedResourceBuilder {
            relationship: Some(RELATIONSHIP.to_string()),
            direction: Some("outbound".to_string()),
            qualifier: Some("http://purl.org/dc/terms/URI".to_string()),
            value: Some("http://en.wikipedia.org/wiki/Tank".to_string()),
            links: vec![LinkBuilder::locator("http://en.wikipedia.org/wiki/Tank")],
            ..Default::default()
        }
    }

    fn parse(xml: &str) -> Element {
        Document::from_string(xml).unwrap().into_root().unwrap()
    }

    #[test]
    fn test_from_element() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let element = parse(
            r#"<ddms:relatedResource xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" xmlns:xlink="http://www.w3.org/1999/xlink"
                ddms:relationship="http://purl.org/dc/terms/references" ddms:direction="outbound"
                ddms:qualifier="http://purl.org/dc/terms/URI" ddms:value="http://en.wikipedia.org/wiki/Tank">
                <ddms:link xlink:type="locator" xlink:href="http://en.wikipedia.org/wiki/Tank"/>
            </ddms:relatedResource>"#,
        );
        let resource = RelatedResource::from_element(&element, &ctx).unwrap();
        assert_eq!(resource.direction(), Some(Direction::Outbound));
        assert_eq!(resource.links().len(), 1);
        assert_eq!(resource, builder().commit(&ctx).unwrap().unwrap());
    }

    #[test]
    fn test_legacy_wrapper_keeps_first_resource() {
        let ctx = VersionContext::new(DdmsVersion::V3_0);
        let element = parse(
            r#"<ddms:RelatedResources xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/" xmlns:xlink="http://www.w3.org/1999/xlink"
                ddms:relationship="http://purl.org/dc/terms/references" ddms:direction="outbound">
                <ddms:RelatedResource ddms:qualifier="http://purl.org/dc/terms/URI" ddms:value="http://en.wikipedia.org/wiki/Tank">
                    <ddms:link xlink:type="locator" xlink:href="http://en.wikipedia.org/wiki/Tank"/>
                </ddms:RelatedResource>
                <ddms:RelatedResource ddms:qualifier="http://purl.org/dc/terms/URI" ddms:value="http://en.wikipedia.org/wiki/Car">
                    <ddms:link xlink:type="locator" xlink:href="http://en.wikipedia.org/wiki/Car"/>
                </ddms:RelatedResource>
            </ddms:RelatedResources>"#,
        );
        let resource = RelatedResource::from_element(&element, &ctx).unwrap();
        assert_eq!(resource.value(), "http://en.wikipedia.org/wiki/Tank");
        assert_eq!(resource.warnings().len(), 1);
        assert_eq!(resource.warnings()[0].locator, "/ddms:RelatedResources");
        assert_eq!(resource, builder().commit(&ctx).unwrap().unwrap());
    }

    #[test]
    fn test_legacy_element_shape() {
        let ctx = VersionContext::new(DdmsVersion::V2_0);
        let resource = builder().commit(&ctx).unwrap().unwrap();
        let element = resource.to_element();
        assert_eq!(element.local_name(), "RelatedResources");
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].local_name(), LEGACY_RESOURCE_NAME);
        assert_eq!(element.children[0].children[0].local_name(), "link");
        assert_eq!(RelatedResource::from_element(element, &ctx).unwrap(), resource);
        assert!(resource.warnings().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut no_links = builder();
        no_links.links.clear();
        assert!(no_links.commit(&ctx).unwrap_err().to_string().contains("link"));

        let mut bad_direction = builder();
        bad_direction.direction = Some("sideways".to_string());
        assert!(bad_direction.commit(&ctx).is_err());

        let mut no_value = builder();
        no_value.value = None;
        assert!(no_value.commit(&ctx).unwrap_err().to_string().contains("value"));
    }

    #[test]
    fn test_nested_link_error_is_located_at_link() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let element = parse(
            r#"<ddms:relatedResource xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" xmlns:xlink="http://www.w3.org/1999/xlink"
                ddms:relationship="http://purl.org/dc/terms/references"
                ddms:qualifier="http://purl.org/dc/terms/URI" ddms:value="x">
                <ddms:link xlink:type="locator"/>
            </ddms:relatedResource>"#,
        );
        let err = RelatedResource::from_element(&element, &ctx).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:link"));
    }

    #[test]
    fn test_output() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let resource = builder().commit(&ctx).unwrap().unwrap();
        assert_eq!(
            resource.to_text(),
            "relatedResource.relationship: http://purl.org/dc/terms/references\n\
             relatedResource.direction: outbound\n\
             relatedResource.qualifier: http://purl.org/dc/terms/URI\n\
             relatedResource.value: http://en.wikipedia.org/wiki/Tank\n\
             relatedResource.link.type: locator\n\
             relatedResource.link.href: http://en.wikipedia.org/wiki/Tank\n"
        );
    }

    #[test]
    fn test_builder_round_trip() {
        let ctx = VersionContext::new(DdmsVersion::V4_1);
        let resource = builder().commit(&ctx).unwrap().unwrap();
        assert_eq!(RelatedResourceBuilder::from(&resource), builder());
        assert!(RelatedResourceBuilder::default().commit(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_builder_errors_are_located() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut sideways = builder();
        sideways.direction = Some("sideways".to_string());
        let err = sideways.commit(&ctx).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:relatedResource"));

        let mut bogus = builder();
        bogus.security.set("classification", "bogus");
        let err = bogus.commit(&ctx).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:relatedResource"));

        let legacy = VersionContext::new(DdmsVersion::V3_0);
        let err = sideways.commit(&legacy).unwrap_err();
        assert_eq!(err.locator(), Some("/ddms:RelatedResources"));
    }
}
