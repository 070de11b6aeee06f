//! Git repository definition.

use std::fmt;

use reposource_core::{
    DefaultRepoDef, FileBasedRepo, FileUriBuilder, NAME_FIELD, PropertyBag, RepoDef, RepoDefError,
    Result, SOURCE_NAME_FIELD, SecuredRepo, URI_FIELD, has_text,
};
use tracing::{debug, trace, warn};
use url::Url;

use crate::address::{GitAddress, repo_name};
use crate::auth::AuthMethod;
use crate::credentials::GitCredentials;
use crate::refresh::RefreshPolicy;

/// Property key for the authentication method.
pub const AUTH_METHOD_FIELD: &str = "authMethod";
/// Property key for the username (or token, or private key path).
pub const USERNAME_FIELD: &str = "username";
/// Property key for the password.
pub const PASSWORD_FIELD: &str = "password";
/// Property key for the branch to read.
pub const BRANCH_NAME_FIELD: &str = "branchName";
/// Property key for the local clone directory.
pub const LOCAL_CLONE_FIELD: &str = "localClone";
/// Property key for the targeted file.
pub const FILE_NAME_FIELD: &str = "fileName";
/// Property key for the known-hosts reference.
pub const HOSTS_NAME_FIELD: &str = "hostsName";
/// Property key for the refresh interval in seconds.
pub const REFRESH_FIELD: &str = "refresh";

const KNOWN_FIELDS: [&str; 11] = [
    URI_FIELD,
    NAME_FIELD,
    SOURCE_NAME_FIELD,
    AUTH_METHOD_FIELD,
    USERNAME_FIELD,
    PASSWORD_FIELD,
    BRANCH_NAME_FIELD,
    LOCAL_CLONE_FIELD,
    FILE_NAME_FIELD,
    HOSTS_NAME_FIELD,
    REFRESH_FIELD,
];

/// A configuration repository backed by git.
///
/// The definition says where the repository lives, how to authenticate
/// against it, where it is cloned locally and which file inside it holds the
/// configuration. It performs no I/O: [`valid`](RepoDef::valid) checks the
/// fields and [`to_uri`](RepoDef::to_uri) computes the `file` URI the clone
/// component populates and the reader reads.
///
/// # Example
///
/// ```
/// use reposource_core::RepoDef;
/// use reposource_git::{AuthMethod, GitRepoDef};
///
/// let def = GitRepoDef::new("default")
///     .with_uri("https://github.com/org/cfg-repo.git")
///     .with_auth_method(AuthMethod::GitHubToken)
///     .with_username("ghp_token")
///     .with_local_clone("/var/cache")
///     .with_file_name("app.yaml");
///
/// assert!(def.valid().unwrap().is_empty());
/// assert_eq!(def.to_uri().unwrap().as_str(), "file:///var/cache/cfg-repo/app.yaml");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GitRepoDef {
    base: DefaultRepoDef,
    auth_method: Option<AuthMethod>,
    username: Option<String>,
    password: Option<String>,
    branch_name: Option<String>,
    local_clone: Option<String>,
    file_name: Option<String>,
    hosts_name: Option<String>,
    refresh: RefreshPolicy,
}

impl GitRepoDef {
    /// Creates a definition with default field values.
    ///
    /// The auth method defaults to [`AuthMethod::CodeCommitGitCreds`] and
    /// refreshing is disabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: DefaultRepoDef::new(name),
            auth_method: Some(AuthMethod::default()),
            username: None,
            password: None,
            branch_name: None,
            local_clone: None,
            file_name: None,
            hosts_name: None,
            refresh: RefreshPolicy::never(),
        }
    }

    /// Builds a definition from a property bag.
    ///
    /// `name` is used unless the bag holds a non-blank `name` or
    /// `sourceName`. Unknown keys are ignored. An explicitly empty or null
    /// `authMethod` unsets the method, which disables credential checks.
    ///
    /// # Errors
    ///
    /// `RepoDefError::InvalidProperty` if a value has the wrong type, the
    /// auth method literal is unknown or `refresh` is negative or too large.
    pub fn from_properties(name: impl Into<String>, properties: &PropertyBag) -> Result<Self> {
        let mut def = Self {
            base: DefaultRepoDef::from_properties(name, properties)?,
            ..Self::new(String::new())
        };

        if properties.contains_key(AUTH_METHOD_FIELD) {
            def.auth_method = match properties.string(AUTH_METHOD_FIELD)? {
                Some(raw) if has_text(Some(&raw)) => Some(raw.parse::<AuthMethod>().map_err(|e| {
                    RepoDefError::invalid_property(AUTH_METHOD_FIELD, e.to_string())
                })?),
                _ => None,
            };
        }

        def.username = properties.string(USERNAME_FIELD)?;
        def.password = properties.string(PASSWORD_FIELD)?;
        def.branch_name = properties.string(BRANCH_NAME_FIELD)?;
        def.local_clone = properties.string(LOCAL_CLONE_FIELD)?;
        def.file_name = properties.string(FILE_NAME_FIELD)?;
        def.hosts_name = properties.string(HOSTS_NAME_FIELD)?;

        if let Some(refresh) = properties.integer(REFRESH_FIELD)? {
            let secs = u32::try_from(refresh).map_err(|_| {
                RepoDefError::invalid_property(
                    REFRESH_FIELD,
                    format!("expected a non-negative number of seconds, found {}", refresh),
                )
            })?;
            def.refresh = RefreshPolicy::from_secs(secs);
        }

        for key in properties.keys().filter(|k| !KNOWN_FIELDS.contains(k)) {
            trace!("Ignoring unrecognized property '{}' for repository '{}'", key, def.name());
        }

        debug!("Loaded git repository definition {:?}", def);
        Ok(def)
    }

    /// Returns the configured auth method, `None` when unset.
    pub fn auth_method(&self) -> Option<AuthMethod> {
        self.auth_method
    }

    /// Returns the branch to read, `None` for the default branch.
    pub fn branch_name(&self) -> Option<&str> {
        self.branch_name.as_deref()
    }

    /// Returns the local clone directory.
    pub fn local_clone(&self) -> Option<&str> {
        self.local_clone.as_deref()
    }

    /// Returns the refresh interval in seconds (`0` = never).
    pub fn refresh(&self) -> u32 {
        self.refresh.secs()
    }

    /// Returns the refresh interval as a policy value.
    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.refresh
    }

    /// Returns the repository name derived from the address.
    ///
    /// This is the directory name used under the local clone directory.
    pub fn repo_name(&self) -> Option<String> {
        repo_name(self.uri())
    }

    /// Parses the address.
    ///
    /// # Errors
    ///
    /// `RepoDefError::MissingUri` for a blank address,
    /// `RepoDefError::InvalidAddress` if it cannot be parsed.
    pub fn address(&self) -> Result<GitAddress> {
        if !has_text(Some(self.uri())) {
            return Err(RepoDefError::missing_uri(self.name()));
        }
        GitAddress::parse(self.uri())
    }

    /// Returns the `file` URI of the clone directory, without the file name.
    ///
    /// Fails like [`to_uri`](RepoDef::to_uri).
    pub fn clone_uri(&self) -> Result<Url> {
        self.root_builder()?.build()
    }

    fn root_builder(&self) -> Result<FileUriBuilder> {
        let repo_name = self
            .repo_name()
            .ok_or_else(|| RepoDefError::missing_uri(self.name()))?;

        let local_clone = match self.local_clone.as_deref().map(str::trim) {
            Some(dir) if dir.starts_with('/') => dir,
            Some(dir) if !dir.is_empty() => {
                return Err(RepoDefError::invalid_property(
                    LOCAL_CLONE_FIELD,
                    format!("local clone directory '{}' must be an absolute path", dir),
                ));
            },
            _ => {
                return Err(RepoDefError::invalid_property(
                    LOCAL_CLONE_FIELD,
                    format!("no local clone directory configured for '{}'", self.name()),
                ));
            },
        };

        Ok(FileUriBuilder::new(local_clone).push(&repo_name))
    }

    // ============================================
    // Setters
    // ============================================

    /// Sets the logical name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.base.set_name(name);
    }

    /// Sets the raw address.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.base.set_uri(uri);
    }

    /// Sets the auth method (`None` disables credential checks).
    pub fn set_auth_method(&mut self, auth_method: Option<AuthMethod>) {
        self.auth_method = auth_method;
    }

    /// Sets the username.
    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    /// Sets the password.
    pub fn set_password(&mut self, password: Option<String>) {
        self.password = password;
    }

    /// Sets the branch name.
    pub fn set_branch_name(&mut self, branch_name: Option<String>) {
        self.branch_name = branch_name;
    }

    /// Sets the local clone directory.
    pub fn set_local_clone(&mut self, local_clone: Option<String>) {
        self.local_clone = local_clone;
    }

    /// Sets the targeted file.
    pub fn set_file_name(&mut self, file_name: Option<String>) {
        self.file_name = file_name;
    }

    /// Sets the known-hosts reference.
    pub fn set_hosts_name(&mut self, hosts_name: Option<String>) {
        self.hosts_name = hosts_name;
    }

    /// Sets the refresh interval in seconds.
    pub fn set_refresh(&mut self, secs: u32) {
        self.refresh = RefreshPolicy::from_secs(secs);
    }

    // ============================================
    // Builder-style methods
    // ============================================

    /// Builder-style method to set the address.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.set_uri(uri);
        self
    }

    /// Builder-style method to set the auth method.
    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = Some(auth_method);
        self
    }

    /// Builder-style method to clear the auth method.
    pub fn without_auth(mut self) -> Self {
        self.auth_method = None;
        self
    }

    /// Builder-style method to set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builder-style method to set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Builder-style method to set the branch.
    pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }

    /// Builder-style method to set the local clone directory.
    pub fn with_local_clone(mut self, local_clone: impl Into<String>) -> Self {
        self.local_clone = Some(local_clone.into());
        self
    }

    /// Builder-style method to set the targeted file.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Builder-style method to set the known-hosts reference.
    pub fn with_hosts_name(mut self, hosts_name: impl Into<String>) -> Self {
        self.hosts_name = Some(hosts_name.into());
        self
    }

    /// Builder-style method to set the refresh interval in seconds.
    pub fn with_refresh(mut self, secs: u32) -> Self {
        self.set_refresh(secs);
        self
    }
}

impl RepoDef for GitRepoDef {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn uri(&self) -> &str {
        self.base.uri()
    }

    /// Checks credentials and refresh interval.
    ///
    /// At most one credential problem is reported, chosen by the auth
    /// method; the refresh interval is checked independently. An unset auth
    /// method skips the credential check.
    ///
    /// # Errors
    ///
    /// - `RepoDefError::MissingUri` if the address is blank
    /// - `RepoDefError::InvalidAddress` if it cannot be parsed, or names a
    ///   host without a repository path (`https://git.example.com/`): no
    ///   repository name can be derived from such an address
    fn valid(&self) -> Result<Vec<String>> {
        let address = self.address()?;

        debug!(
            "Validating repository '{}' ({} transport, auth {})",
            self.name(),
            address.scheme(),
            self.auth_method.map_or("unset", |m| m.as_str())
        );

        let mut errors = Vec::new();

        if let Some(method) = self.auth_method {
            let requirement = method.requirement();
            if !requirement.is_satisfied(self.username(), self.password()) {
                errors.push(requirement.missing_message().to_string());
            }
        }

        if let Some(message) = self.refresh.validate() {
            errors.push(message.to_string());
        }

        for message in &errors {
            warn!("Repository '{}': {}", self.name(), message);
        }

        Ok(errors)
    }

    /// Resolves `localClone/repoName[/fileName]` as a `file` URI.
    ///
    /// Without a file name the clone directory itself is returned.
    ///
    /// # Errors
    ///
    /// - `RepoDefError::MissingUri` if no repository name can be derived
    /// - `RepoDefError::InvalidProperty` if `localClone` is blank or relative
    /// - `RepoDefError::UriBuild` if a `..` segment climbs above the root
    fn to_uri(&self) -> Result<Url> {
        let mut builder = self.root_builder()?;
        if let Some(file_name) = &self.file_name {
            builder = builder.push(file_name);
        }
        let uri = builder.build()?;

        debug!("Resolved repository '{}' to {}", self.name(), uri);
        Ok(uri)
    }
}

impl SecuredRepo for GitRepoDef {
    fn auth_method_name(&self) -> Option<&str> {
        self.auth_method.map(|m| m.as_str())
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl FileBasedRepo for GitRepoDef {
    fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

impl GitCredentials for GitRepoDef {
    fn git_auth_method(&self) -> Option<AuthMethod> {
        self.auth_method
    }

    fn hosts_name(&self) -> Option<&str> {
        self.hosts_name.as_deref()
    }
}

impl fmt::Debug for GitRepoDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitRepoDef")
            .field("name", &self.name())
            .field("uri", &self.uri())
            .field("auth_method", &self.auth_method)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("branch_name", &self.branch_name)
            .field("local_clone", &self.local_clone)
            .field("file_name", &self.file_name)
            .field("hosts_name", &self.hosts_name)
            .field("refresh", &self.refresh.secs())
            .finish()
    }
}
