//! ddms:organization (ddms:Organization before DDMS 4.0.1)

use super::{
    children, clean, commit_all, locator_for, omitted, Assemble, Builder, Component, ComponentCore, RoleEntity,
    RoleEntityBuilder, SubOrganization, SubOrganizationBuilder,
};
use crate::attributes::AttributeGroup;
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::{DdmsVersion, VersionContext};

/// An organization filling a producer role
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Organization {
    core: ComponentCore,
    entity: RoleEntity,
    sub_organizations: Vec<SubOrganization>,
    acronym: Option<String>,
}

impl Organization {
    /// Element name in a version
    pub fn name_for(version: DdmsVersion) -> &'static str {
        if version.is_at_least(DdmsVersion::V4_0_1) {
            "organization"
        } else {
            "Organization"
        }
    }

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, Self::name_for(ctx.version()), ctx)?;
        let entity = RoleEntity::from_element(element, ctx).map_err(|e| e.located_at(&core.locator()))?;
        let sub_organizations = children(element, SubOrganization::NAME)
            .into_iter()
            .map(|child| SubOrganization::from_element(child, ctx))
            .collect::<Result<Vec<_>>>()?;
        let acronym = element
            .get_attribute_ns(core.namespace(), "acronym")
            .and_then(|v| clean(Some(v)));
        Self {
            core,
            entity,
            sub_organizations,
            acronym,
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(
        entity: RoleEntity,
        sub_organizations: Vec<SubOrganization>,
        acronym: Option<&str>,
        ctx: &VersionContext,
    ) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::name_for(ctx.version()), ctx)?,
            entity,
            sub_organizations,
            acronym: clean(acronym),
        }
        .finalize()
    }

    /// Names, contacts and extensible attributes
    pub fn entity(&self) -> &RoleEntity {
        &self.entity
    }

    /// Names of the organization
    pub fn names(&self) -> &[String] {
        self.entity.names()
    }

    /// Units within the organization
    pub fn sub_organizations(&self) -> &[SubOrganization] {
        &self.sub_organizations
    }

    /// Short form of the name
    pub fn acronym(&self) -> Option<&str> {
        self.acronym.as_deref()
    }
}

impl Component for Organization {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        self.entity.validate()?;
        if !self.version().is_at_least(DdmsVersion::V4_0_1) {
            if !self.sub_organizations.is_empty() {
                return Err(self.core.fail("subOrganization elements cannot be used until DDMS 4.0.1 or later."));
            }
            if self.acronym.is_some() {
                return Err(self.core.fail("An organization cannot have an acronym until DDMS 4.0.1 or later."));
            }
        }
        Ok(())
    }

    fn nested_components(&self) -> Vec<&dyn Component> {
        self.sub_organizations.iter().map(|s| s as &dyn Component).collect()
    }

    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        vec![self.entity.extensible() as &dyn AttributeGroup]
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, self.name(), suffix);
        self.entity.write_names(out, &prefix);
        self.entity.write_contacts(out, &prefix);
        let total = self.sub_organizations.len();
        for (i, sub) in self.sub_organizations.iter().enumerate() {
            let index = out.index(i, total);
            sub.write_output(out, &prefix, &index);
        }
        out.push_opt(format!("{}acronym", prefix), self.acronym());
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        self.entity.add_names(&mut element, &self.core);
        self.entity.add_contacts(&mut element, &self.core);
        for sub in &self.sub_organizations {
            element.add_child(sub.to_element().clone());
        }
        element.set_optional_attribute(self.core.child_name("acronym"), self.acronym());
        self.entity.extensible().add_to(&mut element);
        element
    }
}

impl Assemble for Organization {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Organization`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationBuilder {
    /// Names, contacts and extensible attributes
    pub entity: RoleEntityBuilder,
    /// Units within the organization
    pub sub_organizations: Vec<SubOrganizationBuilder>,
    /// Short form of the name
    pub acronym: Option<String>,
}

impl Builder for OrganizationBuilder {
    type Target = Organization;

    fn is_empty(&self) -> bool {
        self.entity.is_empty() && super::all_empty(&self.sub_organizations) && clean(self.acronym.as_deref()).is_none()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Organization>> {
        if self.is_empty() {
            return omitted("OrganizationBuilder");
        }
        let entity = self
            .entity
            .commit(ctx)
            .map_err(|e| e.located_at(&locator_for(Organization::name_for(ctx.version()), ctx)))?;
        Organization::new(
            entity,
            commit_all(&self.sub_organizations, ctx)?,
            self.acronym.as_deref(),
            ctx,
        )
        .map(Some)
    }
}

impl From<&Organization> for OrganizationBuilder {
    fn from(organization: &Organization) -> Self {
        Self {
            entity: RoleEntityBuilder::from(&organization.entity),
            sub_organizations: organization.sub_organizations.iter().map(SubOrganizationBuilder::from).collect(),
            acronym: organization.acronym.clone(),
        }
    }
}
