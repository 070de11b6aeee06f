//! Git source addresses.

use reposource_core::{RepoDefError, Result, has_text};
use tracing::trace;

/// A parsed git address.
///
/// Accepts everything git itself accepts as a remote: `https`, `http`,
/// `ssh`, `git` and `file` URLs, scp-like `user@host:path` addresses and
/// plain local paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitAddress {
    scheme: String,
    user: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
}

impl GitAddress {
    /// Parses a raw address.
    ///
    /// # Errors
    ///
    /// - `RepoDefError::MissingUri` if the address is blank
    /// - `RepoDefError::InvalidAddress` if it cannot be parsed or names no
    ///   repository path
    pub fn parse(uri: &str) -> Result<Self> {
        if !has_text(Some(uri)) {
            return Err(RepoDefError::missing_uri(uri));
        }

        let uri = uri.trim();
        let url = gix::url::parse(uri.into())
            .map_err(|e| RepoDefError::invalid_address_with_cause(uri, e))?;

        let path = url.path.to_string();
        if path.trim_matches('/').is_empty() {
            return Err(RepoDefError::invalid_address(
                uri,
                "address does not name a repository path",
            ));
        }

        let address = Self {
            scheme: url.scheme.as_str().to_string(),
            user: url.user().map(str::to_string),
            host: url.host().map(str::to_string),
            port: url.port,
            path,
        };
        trace!("Parsed git address {} as {:?}", uri, address);

        Ok(address)
    }

    /// The transport scheme (`https`, `ssh`, `file`, ...).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The user part, if any (e.g. `git` in `git@github.com:org/repo`).
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The host, absent for local paths.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The explicit port, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The repository path on the host.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true for local filesystem repositories.
    pub fn is_local(&self) -> bool {
        self.scheme == "file"
    }

    /// Returns true for SSH transports, scp-like addresses included.
    pub fn is_ssh(&self) -> bool {
        self.scheme == "ssh"
    }
}

/// Extracts the repository name from a raw address.
///
/// Takes the last non-empty `/` separated segment and strips one trailing
/// `.git`. The separator is always `/`, whatever the host OS.
///
/// # Example
///
/// ```
/// use reposource_git::repo_name;
///
/// assert_eq!(repo_name("https://host/org/myrepo.git").as_deref(), Some("myrepo"));
/// assert_eq!(repo_name("https://host/org/myrepo").as_deref(), Some("myrepo"));
/// assert_eq!(repo_name(""), None);
/// ```
pub fn repo_name(uri: &str) -> Option<String> {
    let last = uri.trim().rsplit('/').find(|segment| !segment.is_empty())?;
    let name = last.strip_suffix(".git").unwrap_or(last);

    (!name.is_empty()).then(|| name.to_string())
}
