//! Destination path derivation for generated metadata files.
//!
//! Metadata for modules inside the tool's own namespace lands inside the
//! resources tree, with a `meta` directory spliced in directly after the
//! namespace token of the qualified name. Metadata for third-party modules
//! flattens to a single `checkstylemeta-` prefixed file directly under the
//! resources root. The platform-dependent separator token is injected as a
//! value, so derivation is a pure function of its inputs and every branch
//! can be exercised on any host.

use crate::descriptor::{ModuleDetails, ModuleType};
use camino::{Utf8Path, Utf8PathBuf};

/// Conventional resources root, relative to the working directory of the
/// generating process.
pub const DEFAULT_RESOURCES_ROOT: &str = "src/main/resources";

/// Namespace prefix identifying the tool's own bundled modules.
pub const ROOT_NAMESPACE: &str = "com.puppycrawl.tools.checkstyle";

/// Qualified-name segment that ends the directory prefix of a bundled
/// module's destination.
const NAMESPACE_TOKEN: &str = "checkstyle";

/// Separator token substituted between qualified-name segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separator {
    /// Forward slash, used on non-Windows hosts.
    Slash,
    /// The two-character backslash-slash token used on Windows hosts, where
    /// both characters separate path components.
    BackslashSlash,
}

impl Separator {
    /// Selects the token for a platform identifier such as
    /// [`std::env::consts::OS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::Separator;
    ///
    /// assert_eq!(Separator::for_os("windows"), Separator::BackslashSlash);
    /// assert_eq!(Separator::for_os("linux"), Separator::Slash);
    /// ```
    #[must_use]
    pub fn for_os(os: &str) -> Self {
        if os == "windows" {
            Self::BackslashSlash
        } else {
            Self::Slash
        }
    }

    /// Selects the token for the current host.
    #[must_use]
    pub fn for_host() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Returns the literal token text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slash => "/",
            Self::BackslashSlash => "\\/",
        }
    }
}

/// Resolves destination paths for generated metadata files.
///
/// The resolver owns the two environment-derived inputs, the resources root
/// and the separator token, so callers construct it once and derive paths
/// for any number of modules.
#[derive(Clone, Debug)]
pub struct MetadataPathResolver {
    resources_root: Utf8PathBuf,
    separator: Separator,
}

impl MetadataPathResolver {
    /// Creates a resolver writing under `resources_root` with the given
    /// separator token.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkstyle_meta::{MetadataPathResolver, ModuleDetails, ModuleType, Separator};
    ///
    /// let resolver = MetadataPathResolver::new("src/main/resources", Separator::Slash);
    /// let module = ModuleDetails::new(
    ///     "Foo",
    ///     ModuleType::Check,
    ///     "com.puppycrawl.tools.checkstyle.checks.FooCheck",
    /// );
    /// assert_eq!(
    ///     resolver.resolve(&module).as_str(),
    ///     "src/main/resources/com/puppycrawl/tools/checkstyle/meta/checks/FooCheck.xml",
    /// );
    /// ```
    #[must_use]
    pub fn new(resources_root: impl Into<Utf8PathBuf>, separator: Separator) -> Self {
        Self {
            resources_root: resources_root.into(),
            separator,
        }
    }

    /// Creates a resolver for the current host: the conventional resources
    /// root under the working directory and the host's separator token.
    #[must_use]
    pub fn for_host() -> Self {
        Self::new(DEFAULT_RESOURCES_ROOT, Separator::for_host())
    }

    /// Returns the resources root this resolver writes under.
    #[must_use]
    pub fn resources_root(&self) -> &Utf8Path {
        &self.resources_root
    }

    /// Computes the destination file for a module's metadata document.
    ///
    /// Modules whose qualified name starts with [`ROOT_NAMESPACE`] map into
    /// the resources tree, with a `meta` directory spliced in after the
    /// segment containing the namespace token. All other modules flatten to
    /// `checkstylemeta-<name>.xml` directly under the root, with `Check`
    /// appended to the name for the check category.
    ///
    /// Qualified names taking the bundled branch contain the namespace token
    /// by construction; that is a precondition on the upstream extraction
    /// step, and no fallback is attempted for names violating it.
    #[must_use]
    pub fn resolve(&self, module: &ModuleDetails) -> Utf8PathBuf {
        if module.fully_qualified_name().starts_with(ROOT_NAMESPACE) {
            self.bundled_path(module.fully_qualified_name())
        } else {
            self.third_party_path(module.name(), module.module_type())
        }
    }

    fn bundled_path(&self, fully_qualified_name: &str) -> Utf8PathBuf {
        let separator = self.separator.as_str();
        let segments: Vec<&str> = fully_qualified_name.split('.').collect();
        let split = segments
            .iter()
            .position(|segment| segment.contains(NAMESPACE_TOKEN))
            .map_or(segments.len(), |index| index + 1);
        let prefix = segments[..split].join(separator);
        let remainder = segments[split..].join(separator);
        Utf8PathBuf::from(format!(
            "{root}/{prefix}/meta/{remainder}.xml",
            root = self.resources_root,
        ))
    }

    fn third_party_path(&self, name: &str, module_type: ModuleType) -> Utf8PathBuf {
        let mut file_name = name.to_owned();
        if module_type == ModuleType::Check {
            file_name.push_str("Check");
        }
        Utf8PathBuf::from(format!(
            "{root}/checkstylemeta-{file_name}.xml",
            root = self.resources_root,
        ))
    }
}
