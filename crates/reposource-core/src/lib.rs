//! Reposource Core - repository definition types and traits
//!
//! This crate provides the foundational types for describing where
//! configuration content lives: the [`RepoDef`] contract with its
//! capability traits, the [`PropertyBag`] definitions are built from, the
//! [`RepoDefError`] taxonomy and the [`FileUriBuilder`] used to produce
//! canonical `file` URIs.

pub mod error;
pub mod properties;
pub mod repo;
pub mod uri;

pub use error::{RepoDefError, Result};
pub use properties::{PropertyBag, PropertyValue};
pub use repo::{
    DefaultRepoDef, FileBasedRepo, NAME_FIELD, RepoDef, SOURCE_NAME_FIELD, SecuredRepo, URI_FIELD,
    has_text,
};
pub use uri::FileUriBuilder;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
