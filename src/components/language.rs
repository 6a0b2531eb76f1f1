//! ddms:language

use super::{clean, ddms_attribute, omitted, Assemble, Builder, Component, ComponentCore};
use crate::datatypes::is_valid_uri;
use crate::documents::Element;
use crate::error::Result;
use crate::output::{build_prefix, OutputSink};
use crate::version::VersionContext;

/// The language of a resource, as a qualifier/value pair where both halves
/// are optional
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    core: ComponentCore,
    qualifier: Option<String>,
    value: Option<String>,
}

impl Language {
    /// Element name in every version
    pub const NAME: &'static str = "language";

    /// Adopt a parsed element
    pub fn from_element(element: &Element, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::adopt(element, Self::NAME, ctx)?,
            qualifier: ddms_attribute(element, "qualifier"),
            value: ddms_attribute(element, "value"),
        }
        .finalize()
    }

    /// Assemble from values
    pub fn new(qualifier: Option<&str>, value: Option<&str>, ctx: &VersionContext) -> Result<Self> {
        Self {
            core: ComponentCore::create(Self::NAME, ctx)?,
            qualifier: clean(qualifier),
            value: clean(value),
        }
        .finalize()
    }

    /// The vocabulary the value comes from
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// The language code
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Component for Language {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn validate(&self) -> Result<()> {
        if self.value.is_some() && self.qualifier.is_none() {
            return Err(self.core.fail("qualifier attribute is required when a value is set."));
        }
        if let Some(qualifier) = self.qualifier.as_deref().filter(|q| !is_valid_uri(q)) {
            return Err(self.core.fail(format!("Invalid URI: {}", qualifier)));
        }
        Ok(())
    }

    fn validate_warnings(&self) -> Vec<String> {
        match (&self.qualifier, &self.value) {
            (None, None) => vec!["Neither a qualifier nor a value was set on this language.".to_string()],
            (Some(_), None) => vec!["A qualifier has been set without an accompanying value attribute.".to_string()],
            _ => Vec::new(),
        }
    }

    fn write_output(&self, out: &mut OutputSink, prefix: &str, suffix: &str) {
        let prefix = build_prefix(prefix, self.name(), suffix);
        out.push_opt(format!("{}qualifier", prefix), self.qualifier());
        out.push_opt(format!("{}value", prefix), self.value());
    }

    fn build_element(&self) -> Element {
        let mut element = self.core.new_element();
        element.set_optional_attribute(self.core.child_name("qualifier"), self.qualifier());
        element.set_optional_attribute(self.core.child_name("value"), self.value());
        element
    }
}

impl Assemble for Language {
    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

/// Builder for [`Language`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBuilder {
    /// The vocabulary the value comes from
    pub qualifier: Option<String>,
    /// The language code
    pub value: Option<String>,
}

impl Builder for LanguageBuilder {
    type Target = Language;

    fn is_empty(&self) -> bool {
        clean(self.qualifier.as_deref()).is_none() && clean(self.value.as_deref()).is_none()
    }

    fn commit(&self, ctx: &VersionContext) -> Result<Option<Language>> {
        if self.is_empty() {
            return omitted("LanguageBuilder");
        }
        Language::new(self.qualifier.as_deref(), self.value.as_deref(), ctx).map(Some)
    }
}

impl From<&Language> for LanguageBuilder {
    fn from(language: &Language) -> Self {
        Self {
            qualifier: language.qualifier.clone(),
            value: language.value.clone(),
        }
    }
}
