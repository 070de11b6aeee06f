//! Canonical `file` URI construction.

use url::Url;

use crate::error::{RepoDefError, Result};

/// Builds a `file` URI from `/` separated path fragments.
///
/// Fragments are split on a literal `/` whatever the host OS, empty and `.`
/// segments are dropped and every segment is percent-encoded by
/// [`url::Url`]. A `..` segment removes the segment before it; climbing above
/// the root is an error. The resulting path is always absolute: a relative
/// root is anchored at `/`.
///
/// # Example
///
/// ```
/// use reposource_core::FileUriBuilder;
///
/// let uri = FileUriBuilder::new("/var/cache")
///     .push("cfg-repo")
///     .push("app.yaml")
///     .build()
///     .unwrap();
///
/// assert_eq!(uri.as_str(), "file:///var/cache/cfg-repo/app.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileUriBuilder {
    segments: Vec<String>,
}

impl FileUriBuilder {
    /// Starts a builder rooted at `path`.
    pub fn new(path: &str) -> Self {
        Self::default().push(path)
    }

    /// Appends one or more `/` separated segments.
    pub fn push(mut self, fragment: &str) -> Self {
        self.segments.extend(
            fragment
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .map(str::to_string),
        );
        self
    }

    /// Returns the absolute path as given, `..` segments unresolved.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Builds the `file` URI.
    ///
    /// # Errors
    ///
    /// `RepoDefError::UriBuild` if a `..` segment climbs above the root.
    pub fn build(&self) -> Result<Url> {
        let segments = self.normalized()?;

        let mut url = Url::parse("file:///").map_err(|_| RepoDefError::uri_build(self.path()))?;
        url.path_segments_mut()
            .map_err(|_| RepoDefError::uri_build(self.path()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    fn normalized(&self) -> Result<Vec<&str>> {
        let mut resolved = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            if segment == ".." {
                resolved
                    .pop()
                    .ok_or_else(|| RepoDefError::uri_build(self.path()))?;
            } else {
                resolved.push(segment.as_str());
            }
        }
        Ok(resolved)
    }
}
