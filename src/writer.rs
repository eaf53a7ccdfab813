//! Document shaping and the conditional write policy.
//!
//! [`build_document`] gives one module descriptor its metadata tree shape.
//! [`XmlMetaWriter`] resolves the destination path, renders the tree, and
//! persists it, unless the module carries no descriptive text, in which
//! case nothing reaches the filesystem at all.

use crate::descriptor::{ModuleDetails, ModulePropertyDetails};
use crate::error::{MetadataError, Result};
use crate::paths::MetadataPathResolver;
use crate::xml::{XmlElement, render_document};
use camino::Utf8PathBuf;
use std::fs;

/// Terminal state of one write call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document was serialised to the resolved destination.
    Written(Utf8PathBuf),
    /// The module has no descriptive text, so nothing was written.
    SkippedEmptyDescription,
}

/// Builds the metadata document tree for one module descriptor.
///
/// The module element is named after the module's category label and always
/// carries the `name`, `fully-qualified-name`, and `parent` attributes in
/// that order, followed by the description. The `properties` and
/// `message-keys` containers appear only when non-empty, and optional
/// property attributes only when a value is present.
#[must_use]
pub fn build_document(module: &ModuleDetails) -> XmlElement {
    let body = XmlElement::new("module").child(module_element(module));
    XmlElement::new("checkstyle-metadata").child(body)
}

fn module_element(module: &ModuleDetails) -> XmlElement {
    let mut element = XmlElement::new(module.module_type().label())
        .attribute("name", module.name())
        .attribute("fully-qualified-name", module.fully_qualified_name())
        .attribute("parent", module.parent())
        .child(description_element(module.description()));
    if !module.properties().is_empty() {
        element = element.child(properties_element(module.properties()));
    }
    if !module.violation_message_keys().is_empty() {
        element = element.child(message_keys_element(module));
    }
    element
}

fn description_element(text: &str) -> XmlElement {
    XmlElement::new("description").cdata(text)
}

fn properties_element(properties: &[ModulePropertyDetails]) -> XmlElement {
    let mut container = XmlElement::new("properties");
    for property in properties {
        container = container.child(property_element(property));
    }
    container
}

fn property_element(property: &ModulePropertyDetails) -> XmlElement {
    XmlElement::new("property")
        .attribute("name", property.name())
        .attribute("type", property.type_name())
        .optional_attribute("default-value", property.default_value())
        .optional_attribute("validation-type", property.validation_type())
        .child(description_element(property.description()))
}

fn message_keys_element(module: &ModuleDetails) -> XmlElement {
    let mut container = XmlElement::new("message-keys");
    for key in module.violation_message_keys() {
        container = container.child(XmlElement::new("message-key").attribute("key", key));
    }
    container
}

/// Writes per-module metadata documents to their resolved destinations.
///
/// The writer holds no state beyond its path resolver; calls are
/// independent and repeatable, and rewriting a module fully overwrites its
/// earlier file.
#[derive(Clone, Debug)]
pub struct XmlMetaWriter {
    resolver: MetadataPathResolver,
}

impl XmlMetaWriter {
    /// Creates a writer resolving destinations with `resolver`.
    #[must_use]
    pub fn new(resolver: MetadataPathResolver) -> Self {
        Self { resolver }
    }

    /// Creates a writer for the current host: the conventional resources
    /// root under the working directory and the host's separator token.
    #[must_use]
    pub fn for_host() -> Self {
        Self::new(MetadataPathResolver::for_host())
    }

    /// Returns the path resolver in use.
    #[must_use]
    pub const fn resolver(&self) -> &MetadataPathResolver {
        &self.resolver
    }

    /// Generates the metadata document for one module and persists it.
    ///
    /// The document tree is always built, but it reaches disk only when the
    /// module's description is non-empty; a skipped write leaves any
    /// pre-existing file at the resolved path untouched. A performed write
    /// fully creates or overwrites the destination file in one call; parent
    /// directories are not created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use checkstyle_meta::{
    ///     MetadataPathResolver, ModuleDetails, ModuleType, Separator, WriteOutcome, XmlMetaWriter,
    /// };
    ///
    /// let writer = XmlMetaWriter::new(MetadataPathResolver::new("out", Separator::Slash));
    /// let module = ModuleDetails::new("MyCustom", ModuleType::Check, "org.example.MyCustomCheck")
    ///     .with_description("Flags nothing yet.");
    /// let outcome = writer.write(&module)?;
    /// assert!(matches!(outcome, WriteOutcome::Written(_)));
    /// # Ok::<(), checkstyle_meta::MetadataError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Serialise`] when rendering the document
    /// fails and [`MetadataError::Write`] when the filesystem write fails.
    /// Both carry the module's qualified name.
    pub fn write(&self, module: &ModuleDetails) -> Result<WriteOutcome> {
        let document = build_document(module);
        if module.description().is_empty() {
            return Ok(WriteOutcome::SkippedEmptyDescription);
        }
        let rendered = render_document(&document).map_err(|error| MetadataError::Serialise {
            module: module.fully_qualified_name().to_owned(),
            reason: error.to_string(),
        })?;
        let path = self.resolver.resolve(module);
        fs::write(&path, rendered).map_err(|source| MetadataError::Write {
            module: module.fully_qualified_name().to_owned(),
            path: path.clone(),
            source,
        })?;
        Ok(WriteOutcome::Written(path))
    }
}
