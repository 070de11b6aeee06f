//! Named sets of git repository definitions.

use indexmap::IndexMap;
use reposource_core::{PropertyBag, RepoDef, RepoDefError, Result};
use tracing::{debug, info};
use url::Url;

use crate::definition::GitRepoDef;

/// Key of the repository section in a catalog document.
pub const REPOS_FIELD: &str = "repos";

/// Alternative location of the repository section.
pub const SERVICE_REPOS_FIELD: &str = "service.repos";

/// The repository definitions declared by one document, in document order.
///
/// A catalog document holds a `repos` mapping, either at the top level or
/// under `service`:
///
/// ```yaml
/// service:
///   repos:
///     default:
///       uri: https://github.com/org/cfg-repo.git
///       authMethod: GitHubToken
///       username: ghp_token
///       localClone: /var/cache
///       fileName: app.yaml
/// ```
///
/// Each entry is built with [`GitRepoDef::from_properties`], the entry key
/// being the default name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoCatalog {
    repos: IndexMap<String, GitRepoDef>,
}

impl RepoCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a parsed document.
    ///
    /// # Errors
    ///
    /// - `RepoDefError::Parse` if the document has no repository section or
    ///   declares the same name twice
    /// - any construction error of an entry
    pub fn from_properties(document: &PropertyBag) -> Result<Self> {
        let section = match document.child(REPOS_FIELD)? {
            Some(section) => section,
            None => document.child(SERVICE_REPOS_FIELD)?.ok_or_else(|| {
                RepoDefError::parse(
                    "repository catalog",
                    format!("no '{}' or '{}' section found", REPOS_FIELD, SERVICE_REPOS_FIELD),
                )
            })?,
        };

        let mut catalog = Self::new();
        for key in section.keys() {
            let properties = section.child(key)?.unwrap_or_default();
            catalog.insert(GitRepoDef::from_properties(key, &properties)?)?;
        }

        info!("Loaded {} repository definitions", catalog.len());
        Ok(catalog)
    }

    /// Parses a YAML catalog document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_properties(&PropertyBag::from_yaml(yaml)?)
    }

    /// Parses a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_properties(&PropertyBag::from_json(json)?)
    }

    /// Adds a definition.
    ///
    /// # Errors
    ///
    /// `RepoDefError::Parse` if a definition with the same name exists.
    pub fn insert(&mut self, def: GitRepoDef) -> Result<()> {
        if self.repos.contains_key(def.name()) {
            return Err(RepoDefError::parse(
                "repository catalog",
                format!("duplicate repository name '{}'", def.name()),
            ));
        }

        debug!("Registered repository '{}'", def.name());
        self.repos.insert(def.name().to_string(), def);
        Ok(())
    }

    /// Looks a definition up by name.
    pub fn get(&self, name: &str) -> Option<&GitRepoDef> {
        self.repos.get(name)
    }

    /// Iterates over the definitions in document order.
    pub fn iter(&self) -> impl Iterator<Item = &GitRepoDef> {
        self.repos.values()
    }

    /// Iterates over the definition names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repos.keys().map(String::as_str)
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Validates every definition.
    ///
    /// Returns the problems of each misconfigured definition; valid
    /// definitions are left out.
    ///
    /// # Errors
    ///
    /// The first fatal validation error (blank or unparseable address).
    pub fn validate(&self) -> Result<IndexMap<String, Vec<String>>> {
        let mut problems = IndexMap::new();
        for def in self.iter() {
            let messages = def.valid()?;
            if !messages.is_empty() {
                problems.insert(def.name().to_string(), messages);
            }
        }
        Ok(problems)
    }

    /// Resolves the canonical URI of every definition.
    pub fn resolve_all(&self) -> Result<IndexMap<String, Url>> {
        self.iter()
            .map(|def| def.to_uri().map(|uri| (def.name().to_string(), uri)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RepoCatalog {
    type Item = &'a GitRepoDef;
    type IntoIter = indexmap::map::Values<'a, String, GitRepoDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.repos.values()
    }
}
