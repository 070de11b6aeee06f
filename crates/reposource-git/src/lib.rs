//! # Reposource Git
//!
//! Git repository definitions for configuration sources.
//!
//! This crate describes configuration repositories hosted in git: where they
//! live, how to authenticate against them, where they are cloned locally and
//! how often their content goes stale. It validates those definitions before
//! any network access and resolves each one to a canonical `file` URI.
//! Cloning, pulling and reading the files are left to the caller.
//!
//! ## Features
//!
//! - [`GitRepoDef`] built from a property bag or programmatically
//! - Credential checks keyed on a closed [`AuthMethod`] enum
//! - Address parsing for https, ssh, scp-like and local remotes via gix
//! - Canonical `localClone/repoName/fileName` URI resolution
//! - [`RefreshPolicy`] staleness checks for an external scheduler
//! - [`RepoCatalog`] loading of named definitions from YAML or JSON
//!
//! ## Example
//!
//! ```
//! use reposource_core::{PropertyBag, RepoDef};
//! use reposource_git::GitRepoDef;
//!
//! let properties = PropertyBag::new()
//!     .with("uri", "https://git-codecommit.us-east-1.amazonaws.com/v1/repos/cfg-repo")
//!     .with("authMethod", "CodeCommitGitCreds")
//!     .with("username", "svc-config")
//!     .with("localClone", "/var/cache")
//!     .with("fileName", "app.yaml")
//!     .with("refresh", 2);
//!
//! let def = GitRepoDef::from_properties("default", &properties)?;
//!
//! assert_eq!(
//!     def.valid()?,
//!     vec![
//!         "Username and password must be configured".to_string(),
//!         "Refresh rate must be at least 5 seconds or more.".to_string(),
//!     ]
//! );
//! assert_eq!(def.to_uri()?.as_str(), "file:///var/cache/cfg-repo/app.yaml");
//! # Ok::<(), reposource_core::RepoDefError>(())
//! ```

pub mod address;
pub mod auth;
pub mod catalog;
pub mod credentials;
pub mod definition;
pub mod refresh;

// Re-exports
pub use address::{GitAddress, repo_name};
pub use auth::{AuthMethod, CredentialRequirement, ParseAuthMethodError};
pub use catalog::RepoCatalog;
pub use credentials::{Credentials, GitCredentials};
pub use definition::GitRepoDef;
pub use refresh::{MIN_REFRESH_SECS, RefreshPolicy};

// Re-export reposource_core for consumers
pub use reposource_core;
