//! Attribute groups
//!
//! Attribute groups are small immutable bundles of attributes that many
//! element types carry: ISM security markings, extensible attributes from
//! foreign namespaces, and XLink attributes. Each group parses itself from
//! an element's attributes (looking only at its own namespace), validates
//! independently, and writes itself back onto an element.
//!
//! Components never hold an optional group. An absent group is an empty
//! instance obtained through the group's `non_null` constructor, and a
//! [`GroupBuilder`] always commits to a group, empty or not.

mod extensible;
mod security;
mod xlink;

pub use extensible::{ExtensibleAttribute, ExtensibleAttributes, ExtensibleAttributesBuilder};
pub use security::{
    IsmAttribute, IsmValueKind, SecurityAttributes, SecurityAttributesBuilder, CLASSIFICATIONS,
    ISM_ATTRIBUTES,
};
pub use xlink::{XLinkAttributes, XLinkAttributesBuilder, XLinkType};

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::output::OutputSink;
use crate::version::{DdmsVersion, VersionContext};
use std::fmt;

/// Behaviour shared by all attribute groups
pub trait AttributeGroup: fmt::Debug {
    /// Short name used in messages
    fn group_name(&self) -> &'static str;

    /// Version the group was built under
    fn version(&self) -> DdmsVersion;

    /// Check whether no attribute is set
    fn is_empty(&self) -> bool;

    /// Validate the group against its version's rules
    fn validate(&self) -> Result<()>;

    /// Write the group's attributes onto an element
    fn add_to(&self, element: &mut Element);

    /// Render the group's attributes under a key prefix
    fn write_output(&self, out: &mut OutputSink, prefix: &str);

    /// Check that the group can decorate a component of the given version
    fn require_compatible(&self, version: DdmsVersion) -> Result<()> {
        if self.is_empty() || self.version() == version {
            return Ok(());
        }
        Err(Error::invalid(format!(
            "The {} must be built under the same DDMS version as the component they decorate ({} vs {}).",
            self.group_name(),
            self.version(),
            version
        )))
    }
}

/// A mutable accumulator for one attribute group type.
///
/// Unlike a component [`crate::Builder`], an empty group builder still
/// commits to an (empty) group.
pub trait GroupBuilder: fmt::Debug {
    /// The group produced on commit
    type Target: AttributeGroup;

    /// Check whether no attribute value is set
    fn is_empty(&self) -> bool;

    /// Validate the accumulated values and produce the group
    fn commit(&self, ctx: &VersionContext) -> Result<Self::Target>;
}
