//! Generation and loading of Checkstyle module metadata documents.
//!
//! Each analysis module (check, filter, or file filter) is described by a
//! [`ModuleDetails`] descriptor produced by an upstream extraction step.
//! [`XmlMetaWriter`] turns one descriptor into a pretty-printed XML document
//! at a destination derived from the module's qualified name, skipping
//! modules without descriptive text, and [`read_module_details`] loads such
//! a document back into a descriptor.
//!
//! Generation is split into independent stages: [`build_document`] shapes an
//! inspectable tree value, [`MetadataPathResolver`] derives the destination
//! from injected inputs, and the writer glues the two together with the
//! write policy. A driver enumerating modules calls the writer once per
//! descriptor; calls share no state.
//!
//! # Modules
//!
//! - [`descriptor`] - Module and property descriptors with their category labels
//! - [`error`] - Error types carrying the identity of the offending module
//! - [`paths`] - Destination path derivation with an injected separator token
//! - [`reader`] - Loading generated documents back into descriptors
//! - [`writer`] - Document shaping and the conditional write policy
//! - [`xml`] - Intermediate document tree and its serialisation routine

pub mod descriptor;
pub mod error;
pub mod paths;
pub mod reader;
pub mod writer;
pub mod xml;

pub use descriptor::{ModuleDetails, ModulePropertyDetails, ModuleType};
pub use error::{MetadataError, Result};
pub use paths::{DEFAULT_RESOURCES_ROOT, MetadataPathResolver, ROOT_NAMESPACE, Separator};
pub use reader::{read_module_details, read_module_details_from_path};
pub use writer::{WriteOutcome, XmlMetaWriter, build_document};
pub use xml::{RenderError, XmlElement, XmlNode, render_document};
