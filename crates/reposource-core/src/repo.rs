//! Repository definition contracts.
//!
//! [`RepoDef`] is the base contract every source type fulfils: a logical
//! name, a raw address, validation and canonical URI resolution. The
//! capabilities a source may additionally have are separate traits layered on
//! top of it, so a bucket or plain filesystem definition never has to carry
//! git specific fields:
//!
//! - [`SecuredRepo`] - the source needs authentication metadata
//! - [`FileBasedRepo`] - the source resolves to a single file

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{RepoDefError, Result};
use crate::properties::PropertyBag;
use crate::uri::FileUriBuilder;

/// Property key holding the raw source address.
pub const URI_FIELD: &str = "uri";

/// Property key holding the logical name.
pub const NAME_FIELD: &str = "name";

/// Alternative property key for the logical name.
pub const SOURCE_NAME_FIELD: &str = "sourceName";

/// Returns true if the value contains at least one non-whitespace character.
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// A declarative description of where configuration content lives.
pub trait RepoDef {
    /// Logical identifier, unique within a configuration set.
    fn name(&self) -> &str;

    /// Raw source address (VCS URL or filesystem path).
    fn uri(&self) -> &str;

    /// Checks the definition before any network access.
    ///
    /// Returns the list of problems found; an empty list means the definition
    /// is usable. Problems that make the definition meaningless (no address,
    /// an address that cannot be parsed) are returned as `Err` instead.
    fn valid(&self) -> Result<Vec<String>>;

    /// Resolves the canonical location of the repository content.
    fn to_uri(&self) -> Result<Url>;

    /// Like [`valid`](RepoDef::valid), but turns any reported problem into an
    /// [`RepoDefError::Invalid`] error.
    fn ensure_valid(&self) -> Result<()> {
        let messages = self.valid()?;
        if messages.is_empty() {
            Ok(())
        } else {
            Err(RepoDefError::invalid(self.name(), messages))
        }
    }
}

/// A repository that requires authentication metadata.
pub trait SecuredRepo: RepoDef {
    /// Name of the authentication method, if one is configured.
    fn auth_method_name(&self) -> Option<&str>;

    /// Username, or whatever the auth method stores in the username slot.
    fn username(&self) -> Option<&str>;

    /// Password or token.
    fn password(&self) -> Option<&str>;
}

/// A repository that resolves to a single configuration file.
pub trait FileBasedRepo: RepoDef {
    /// The file targeted within the repository.
    fn file_name(&self) -> Option<&str>;
}

/// The plain repository definition: a name and an address.
///
/// Concrete source types embed it and delegate the shared fields to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefaultRepoDef {
    name: String,
    #[serde(default)]
    uri: String,
}

impl DefaultRepoDef {
    /// Creates a definition with an empty address.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: String::new(),
        }
    }

    /// Builder-style method to set the address.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Reads `uri` and `name`/`sourceName` from a property bag.
    ///
    /// `name` is the fallback when the bag holds no non-blank name.
    pub fn from_properties(name: impl Into<String>, properties: &PropertyBag) -> Result<Self> {
        let mut def = Self::new(name);

        for key in [NAME_FIELD, SOURCE_NAME_FIELD] {
            if let Some(value) = properties.string(key)?
                && has_text(Some(&value))
            {
                def.name = value;
                break;
            }
        }

        if let Some(uri) = properties.string(URI_FIELD)? {
            def.uri = uri;
        }

        Ok(def)
    }

    /// Sets the logical name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets the raw address.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }
}

impl RepoDef for DefaultRepoDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn valid(&self) -> Result<Vec<String>> {
        if !has_text(Some(&self.uri)) {
            return Err(RepoDefError::missing_uri(&self.name));
        }
        Ok(Vec::new())
    }

    fn to_uri(&self) -> Result<Url> {
        if !has_text(Some(&self.uri)) {
            return Err(RepoDefError::missing_uri(&self.name));
        }

        // Single letter schemes are drive letters, not URLs
        match Url::parse(self.uri.trim()) {
            Ok(url) if url.scheme().len() > 1 => Ok(url),
            _ => {
                debug!("Treating address of '{}' as a local path", self.name);
                FileUriBuilder::new(self.uri.trim()).build()
            },
        }
    }
}
