//! ddms:person (ddms:Person before DDMS 4.0.1)

use super::{
    add_text_children, child_texts, children, clean, locator_for, omitted, Assemble, Builder, Component, ComponentCore,
    RoleEntity, RoleEntityBuilder,
};
use crate::attributes::AttributeGroup;
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::{DdmsVersion, VersionContext};

/// A person filling a producer role
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    core: ComponentCore,
    entity: RoleEntity,
    surname: String,
    user_id: Option<String>,
    affiliations: Vec<String>,
}

impl Person {
    /// Element name in a version
    pub fn name_for(version: DdmsVersion) -> &'static str {
        if version.is_at_least(DdmsVersion::V4_0_1) {
            "person"
        } else {
            "Person"
        }
    }

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        let core = ComponentCore::adopt(element, Self::name_for(ctx.version()), ctx)?;
        let surnames = child_texts(element, "surname");
        if surnames.len() != 1 {
            return Err(core.fail("Exactly 1 surname element must exist."));
        }
        if children(element, "userID").len() > 1 {
            return Err(core.fail("Only 1 userID element can exist."));
        }
        let entity = RoleEntity::from_element(element, ctx).map_err(|e| e.located_at(&core.locator()))?;
        Self {
            core,
            entity,
            surname: surnames.into_iter().next().unwrap_or_default(),
            user_id: clean(child_texts(element, "userID").first().map(String::as_str)),
            affiliations: super::non_blank(&child_texts(element, "affiliation")),
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(
        entity: RoleEntity,
        surname: &str,
        user_id: Option<&str>,
        affiliations: &[String],
        ctx: &VersionContext,
    ) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::name_for(ctx.version()), ctx)?,
            entity,
            surname: surname.trim().to_string(),
            user_id: clean(user_id),
            affiliations: super::non_blank(affiliations),
        }
        .finalize()
    }

    /// Names, contacts and extensible attributes
    pub fn entity(&self) -> &RoleEntity {
        &self.entity
    }

    /// Given names
    pub fn names(&self) -> &[String] {
        self.entity.names()
    }

    /// Family name
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// User identifier
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Organizational affiliations
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }
}

impl Component for Person {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        self.entity.validate()?;
        if self.surname.is_empty() {
            return Err(self.core.fail("surname is required."));
        }
        if !self.version().is_at_least(DdmsVersion::V4_0_1) && self.affiliations.len() > 1 {
            return Err(self.core.fail("Only 1 affiliation element can exist before DDMS 4.0.1."));
        }
        Ok(())
    }

    fn attribute_groups(&self) -> Vec<&dyn AttributeGroup> {
        vec![self.entity.extensible() as &dyn AttributeGroup]
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, self.name(), suffix);
        self.entity.write_names(out, &prefix);
        out.push(format!("{}surname", prefix), &self.surname);
        out.push_opt(format!("{}userID", prefix), self.user_id());
        out.push_each(&format!("{}affiliation", prefix), &self.affiliations);
        self.entity.write_contacts(out, &prefix);
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        self.entity.add_names(&mut element, &self.core);
        add_text_children(&mut element, &self.core, "surname", std::slice::from_ref(&self.surname));
        if let Some(user_id) = &self.user_id {
            add_text_children(&mut element, &self.core, "userID", std::slice::from_ref(user_id));
        }
        add_text_children(&mut element, &self.core, "affiliation", &self.affiliations);
        self.entity.add_contacts(&mut element, &self.core);
        self.entity.extensible().add_to(&mut element);
        element
    }
}

impl Assemble for Person {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Person`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonBuilder {
    /// Names, contacts and extensible attributes
    pub entity: RoleEntityBuilder,
    /// Family name
    pub surname: Option<String>,
    /// User identifier
    pub user_id: Option<String>,
    /// Organizational affiliations
    pub affiliations: Vec<String>,
}

impl Builder for PersonBuilder {
    type Target = Person;

    fn is_empty(&self) -> bool {
        self.entity.is_empty()
            && clean(self.surname.as_deref()).is_none()
            && clean(self.user_id.as_deref()).is_none()
            && super::all_blank(&self.affiliations)
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Person>> {
        if self.is_empty() {
            return omitted("PersonBuilder");
        }
        let entity = self
            .entity
            .commit(ctx)
            .map_err(|e| e.located_at(&locator_for(Person::name_for(ctx.version()), ctx)))?;
        Person::new(
            entity,
            self.surname.as_deref().unwrap_or_default(),
            self.user_id.as_deref(),
            &self.affiliations,
            ctx,
        )
        .map(Some)
    }
}

impl From<&Person> for PersonBuilder {
    fn from(person: &Person) -> Self {
        Self {
            entity: RoleEntityBuilder::from(&person.entity),
            surname: Some(person.surname.clone()),
            user_id: person.user_id.clone(),
            affiliations: person.affiliations.clone(),
        }
    }
}
