//! ddms:dates

use super::{clean, ddms_attribute, omitted, Assemble, Builder, Component, ComponentCore};
use crate::datatypes::is_ddms_date;
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::{DdmsVersion, VersionContext};

/// Date attributes and the first version each one is legal in
const DATE_ATTRIBUTES: [(&str, DdmsVersion); 7] = [
    ("created", DdmsVersion::V2_0),
    ("posted", DdmsVersion::V2_0),
    ("validTil", DdmsVersion::V2_0),
    ("infoCutOff", DdmsVersion::V2_0),
    ("approvedOn", DdmsVersion::V3_1),
    ("receivedOn", DdmsVersion::V4_0_1),
    ("acquiredOn", DdmsVersion::V4_1),
];

/// Dates in the lifecycle of a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dates {
    core: ComponentCore,
    values: [Option<String>; 7],
}

impl Dates {
    /// Element name in every version
    pub const NAME: &'static str = "dates";

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::adopt(element, Self::NAME, ctx)?,
            values: DATE_ATTRIBUTES.map(|(name, _)| ddms_attribute(element, name)),
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(builder: &DatesBuilder, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::NAME, ctx)?,
            values: builder.values().map(clean),
        }
        .finalize()
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.values[index].as_deref()
    }

    /// Creation date
    pub fn created(&self) -> Option<&str> {
        self.get(0)
    }

    /// Posting date
    pub fn posted(&self) -> Option<&str> {
        self.get(1)
    }

    /// Expiration date
    pub fn valid_til(&self) -> Option<&str> {
        self.get(2)
    }

    /// Information cut-off date
    pub fn info_cut_off(&self) -> Option<&str> {
        self.get(3)
    }

    /// Approval date
    pub fn approved_on(&self) -> Option<&str> {
        self.get(4)
    }

    /// Receipt date
    pub fn received_on(&self) -> Option<&str> {
        self.get(5)
    }

    /// Acquisition date
    pub fn acquired_on(&self) -> Option<&str> {
        self.get(6)
    }

    fn pairs(&self) -> impl Iterator<Item = (&'static str, DdmsVersion, &str)> + '_ {
        DATE_ATTRIBUTES
            .iter()
            .zip(&self.values)
            .filter_map(|((name, since), value)| value.as_deref().map(|v| (*name, *since, v)))
    }
}

impl Component for Dates {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        for (name, since, value) in self.pairs() {
            if !self.version().is_at_least(since) {
                return Err(self.core.fail(format!(
                    "The {} attribute cannot be used until DDMS {} or later.",
                    name, since
                )));
            }
            if !is_ddms_date(value) {
                return Err(self.core.fail(format!(
                    "The {} attribute must be in a valid date format: {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    fn validate_warnings(&self) -> Vec<String> {
        if self.pairs().next().is_none() {
            vec!["A completely empty ddms:dates element was found.".to_string()]
        } else {
            Vec::new()
        }
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, self.name(), suffix);
        for (name, _, value) in self.pairs() {
            out.push(format!("{}{}", prefix, name), value);
        }
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        for (name, _, value) in self.pairs() {
            element.set_attribute(self.core.child_name(name), value);
        }
        element
    }
}

impl Assemble for Dates {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Dates`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatesBuilder {
    /// Creation date
    pub created: Option<String>,
    /// Posting date
    pub posted: Option<String>,
    /// Expiration date
    pub valid_til: Option<String>,
    /// Information cut-off date
    pub info_cut_off: Option<String>,
    /// Approval date (DDMS 3.1 or later)
    pub approved_on: Option<String>,
    /// Receipt date (DDMS 4.0.1 or later)
    pub received_on: Option<String>,
    /// Acquisition date (DDMS 4.1 or later)
    pub acquired_on: Option<String>,
}

impl DatesBuilder {
    fn values(&self) -> [Option<&str>; 7] {
        [
            self.created.as_deref(),
            self.posted.as_deref(),
            self.valid_til.as_deref(),
            self.info_cut_off.as_deref(),
            self.approved_on.as_deref(),
            self.received_on.as_deref(),
            self.acquired_on.as_deref(),
        ]
    }
}

impl Builder for DatesBuilder {
    type Target = Dates;

    fn is_empty(&self) -> bool {
        self.values().into_iter().all(|v| clean(v).is_none())
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Dates>> {
        if self.is_empty() {
            return omitted("DatesBuilder");
        }
        Dates::new(self, ctx).map(Some)
    }
}

impl From<&Dates> for DatesBuilder {
    fn from(dates: &Dates) -> Self {
        let owned = |value: Option<&str>| value.map(str::to_string);
        Self {
            created: owned(dates.created()),
            posted: owned(dates.posted()),
            valid_til: owned(dates.valid_til()),
            info_cut_off: owned(dates.info_cut_off()),
            approved_on: owned(dates.approved_on()),
            received_on: owned(dates.received_on()),
            acquired_on: owned(dates.acquired_on()),
        }
    }
}
