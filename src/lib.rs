//! # ddms
//!
//! A typed, versioned object model for DDMS (the DoD Discovery Metadata
//! Specification) XML components.
//!
//! Every supported element is an immutable [`Component`] value that can be
//! adopted from a parsed XML element or assembled from field values, is
//! validated against the rules of the DDMS version it was built under, and
//! renders back to XML, HTML meta tags, plain text or flat JSON.
//!
//! ## Features
//!
//! - DDMS 2.0, 3.0, 3.1, 4.0.1, 4.1 and 5.0, with version-specific element
//!   names and version-gated rules
//! - ISM security attributes, extensible attributes and XLink attributes
//! - Mutable builders that commit to validated components
//! - Advisory warnings collected from the whole component tree
//!
//! ## Example
//!
//! ```rust
//! use ddms::{Builder, Component, DdmsVersion, VersionContext};
//! use ddms::components::IdentifierBuilder;
//!
//! let ctx = VersionContext::new(DdmsVersion::V5_0);
//! let builder = IdentifierBuilder {
//!     qualifier: Some("http://example.com/scheme".to_string()),
//!     value: Some("ID-123".to_string()),
//! };
//! let identifier = builder.commit(&ctx)?.expect("builder is not empty");
//! assert!(identifier.to_text().contains("identifier.value: ID-123"));
//! # Ok::<(), ddms::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod names;
pub mod datatypes;
pub mod namespaces;

// Versions and configuration
pub mod version;
pub mod settings;

// XML trees and rendering
pub mod documents;
pub mod output;

// Components
pub mod attributes;
pub mod components;

// Re-exports for convenience
pub use attributes::{AttributeGroup, ExtensibleAttributes, GroupBuilder, SecurityAttributes, XLinkAttributes};
pub use components::{parse_component, Builder, Component, MessageKind, ValidationMessage};
pub use documents::{Document, Element};
pub use error::{Error, InvalidComponentError, Result};
pub use output::OutputFormat;
pub use settings::Settings;
pub use version::{DdmsVersion, VersionContext};

/// Version of the ddms library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
