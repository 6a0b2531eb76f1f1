//! Fields shared by the people and organizations that fill producer roles

use super::{add_text_children, all_blank, child_texts, non_blank, ComponentCore};
use crate::attributes::{AttributeGroup, ExtensibleAttributes, ExtensibleAttributesBuilder, GroupBuilder};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::output::OutputSink;
use crate::version::VersionContext;

/// Names, contact details and extensible attributes of a role entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleEntity {
    names: Vec<String>,
    phones: Vec<String>,
    emails: Vec<String>,
    extensible: ExtensibleAttributes,
}

impl RoleEntity {
    /// Collect the shared fields from explicit values; blank entries are dropped
    pub fn new(names: &[String], phones: &[String], emails: &[String], extensible: ExtensibleAttributes) -> Self {
        Self {
            names: non_blank(names),
            phones: non_blank(phones),
            emails: non_blank(emails),
            extensible,
        }
    }

    /// Read the shared fields from a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        Ok(Self::new(
            &child_texts(element, "name"),
            &child_texts(element, "phone"),
            &child_texts(element, "email"),
            ExtensibleAttributes::from_element(element, ctx)?,
        ))
    }

    /// Names of the entity
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Phone numbers
    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    /// Email addresses
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// Attributes from foreign namespaces
    pub fn extensible(&self) -> &ExtensibleAttributes {
        &self.extensible
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.names.is_empty() {
            return Err(Error::invalid("At least 1 name element must have a non-empty value."));
        }
        Ok(())
    }

    pub(crate) fn add_names(&self, element: &mut Element, core: &ComponentCore) {
        add_text_children(element, core, "name", &self.names);
    }

    pub(crate) fn add_contacts(&self, element: &mut Element, core: &ComponentCore) {
        add_text_children(element, core, "phone", &self.phones);
        add_text_children(element, core, "email", &self.emails);
    }

    pub(crate) fn write_names(&self, out: &mut OutputSink, prefix: &str) {
        out.push_each(&format!("{}name", prefix), &self.names);
    }

    pub(crate) fn write_contacts(&self, out: &mut OutputSink, prefix: &str) {
        out.push_each(&format!("{}phone", prefix), &self.phones);
        out.push_each(&format!("{}email", prefix), &self.emails);
        self.extensible.write_output(out, prefix);
    }
}

/// Builder for [`RoleEntity`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleEntityBuilder {
    /// Names of the entity
    pub names: Vec<String>,
    /// Phone numbers
    pub phones: Vec<String>,
    /// Email addresses
    pub emails: Vec<String>,
    /// Attributes from foreign namespaces
    pub extensible: ExtensibleAttributesBuilder,
}

impl RoleEntityBuilder {
    /// Check whether nothing was set
    pub fn is_empty(&self) -> bool {
        all_blank(&self.names) && all_blank(&self.phones) && all_blank(&self.emails) && self.extensible.is_empty()
    }

    /// Commit the shared fields; the extensible attributes resolve to an
    /// empty group when none were set
    pub fn commit(&self, ctx: &VersionContext) -> Result<RoleEntity> {
        let extensible = self.extensible.commit(ctx)?;
        Ok(RoleEntity::new(&self.names, &self.phones, &self.emails, extensible))
    }
}

impl From<&RoleEntity> for RoleEntityBuilder {
    fn from(entity: &RoleEntity) -> Self {
        Self {
            names: entity.names.clone(),
            phones: entity.phones.clone(),
            emails: entity.emails.clone(),
            extensible: ExtensibleAttributesBuilder::from(&entity.extensible),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::DdmsVersion;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_blank_entries_dropped() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let entity = RoleEntity::new(
            &strings(&["Brian", " "]),
            &strings(&["703-885-1000"]),
            &strings(&[""]),
            ExtensibleAttributes::empty(&ctx),
        );
        assert_eq!(entity.names(), &["Brian".to_string()]);
        assert!(entity.emails().is_empty());
        assert!(entity.validate().is_ok());
    }

    #[test]
    fn test_name_required() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let entity = RoleEntity::new(&strings(&[" "]), &[], &[], ExtensibleAttributes::empty(&ctx));
        assert!(entity.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let mut builder = RoleEntityBuilder::default();
        assert!(builder.is_empty());
        builder.names.push("".to_string());
        assert!(builder.is_empty());
        builder.emails.push("ddms@fgm.com".to_string());
        assert!(!builder.is_empty());

        let entity = builder.commit(&ctx).unwrap();
        assert_eq!(entity.emails(), &["ddms@fgm.com".to_string()]);
        assert!(entity.extensible().is_empty());
    }
}
