//! Catalog loading and check reports.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use reposource_core::RepoDef;
use reposource_git::RepoCatalog;
use tracing::debug;
use url::Url;

/// Catalog document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Infers the format from a file extension, YAML unless it is `.json`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Reads and parses a catalog document.
pub fn load_catalog(path: &Path, format: Option<Format>) -> anyhow::Result<RepoCatalog> {
    let format = format.unwrap_or_else(|| Format::from_path(path));
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    debug!("Loading {:?} catalog from {}", format, path.display());

    let catalog = match format {
        Format::Yaml => RepoCatalog::from_yaml(&content),
        Format::Json => RepoCatalog::from_json(&content),
    }
    .with_context(|| format!("Failed to load catalog {}", path.display()))?;

    Ok(catalog)
}

/// Outcome of checking one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok(Url),
    Invalid(Vec<String>),
}

/// One line of a check report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub name: String,
    pub status: Status,
}

impl ReportLine {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Status::Ok(_))
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Status::Ok(uri) => write!(f, "{}: OK {}", self.name, uri),
            Status::Invalid(messages) => {
                write!(f, "{}: INVALID {}", self.name, messages.join("; "))
            },
        }
    }
}

/// Validates every definition of the catalog, in document order.
///
/// Valid definitions are reported with their canonical URI. A definition
/// that passes validation but cannot be resolved (no usable `localClone`)
/// is reported invalid with the resolution error.
pub fn check(catalog: &RepoCatalog) -> anyhow::Result<Vec<ReportLine>> {
    catalog
        .iter()
        .map(|def| -> anyhow::Result<ReportLine> {
            let messages = def
                .valid()
                .with_context(|| format!("Repository '{}' cannot be checked", def.name()))?;

            let status = if !messages.is_empty() {
                Status::Invalid(messages)
            } else {
                match def.to_uri() {
                    Ok(uri) => Status::Ok(uri),
                    Err(e) => Status::Invalid(vec![e.to_string()]),
                }
            };

            Ok(ReportLine {
                name: def.name().to_string(),
                status,
            })
        })
        .collect()
}

/// Resolves the canonical URI of the named definition.
pub fn resolve(catalog: &RepoCatalog, name: &str) -> anyhow::Result<Url> {
    let def = catalog.get(name).ok_or_else(|| {
        anyhow!(
            "Unknown repository '{}', known: {}",
            name,
            catalog.names().collect::<Vec<_>>().join(", ")
        )
    })?;

    Ok(def.to_uri()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
repos:
  default:
    uri: https://github.com/org/cfg-repo.git
    authMethod: GitHubToken
    username: ghp_0123456789
    localClone: /var/cache
    fileName: app.yaml
  broken:
    uri: https://git-codecommit.us-east-1.amazonaws.com/v1/repos/legacy
    username: svc-config
    localClone: /srv/clones
    refresh: 2
"#;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("repos.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("repos.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("repos.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("repos")), Format::Yaml);
    }

    #[test]
    fn test_check_report() {
        let file = write_temp(".yaml", CATALOG);
        let catalog = load_catalog(file.path(), None).unwrap();
        let lines: Vec<String> = check(&catalog)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            lines,
            vec![
                "default: OK file:///var/cache/cfg-repo/app.yaml".to_string(),
                "broken: INVALID Username and password must be configured; \
                 Refresh rate must be at least 5 seconds or more."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_load_json_by_extension() {
        let file = write_temp(
            ".json",
            r#"{"repos": {"local": {
                "uri": "/srv/git/cfg.git",
                "authMethod": null,
                "localClone": "/var/cache"
            }}}"#,
        );
        let catalog = load_catalog(file.path(), None).unwrap();

        let lines = check(&catalog).unwrap();
        assert!(lines[0].is_ok());
        assert_eq!(lines[0].to_string(), "local: OK file:///var/cache/cfg");
    }

    #[test]
    fn test_unresolvable_definition_reported_invalid() {
        let file = write_temp(
            ".yaml",
            "repos:\n  noclone:\n    uri: /srv/git/cfg.git\n    authMethod:\n",
        );
        let catalog = load_catalog(file.path(), None).unwrap();

        let lines = check(&catalog).unwrap();
        assert!(!lines[0].is_ok());
        assert_eq!(
            lines[0].to_string(),
            "noclone: INVALID Invalid value for property 'localClone': \
             no local clone directory configured for 'noclone'"
        );
    }

    #[test]
    fn test_explicit_format_wins() {
        let file = write_temp(".txt", r#"{"repos": {"a": {"uri": "/srv/git/a.git"}}}"#);
        assert!(load_catalog(file.path(), Some(Format::Json)).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/repos.yaml"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }

    #[test]
    fn test_fatal_address_aborts_check() {
        let file = write_temp(
            ".yaml",
            "repos:\n  bad:\n    uri: https://git.example.com:notaport/org/cfg.git\n",
        );
        let catalog = load_catalog(file.path(), None).unwrap();

        let err = check(&catalog).unwrap_err();
        assert!(err.to_string().contains("Repository 'bad' cannot be checked"));
    }

    #[test]
    fn test_resolve() {
        let file = write_temp(".yaml", CATALOG);
        let catalog = load_catalog(file.path(), None).unwrap();

        assert_eq!(
            resolve(&catalog, "broken").unwrap().as_str(),
            "file:///srv/clones/legacy"
        );

        let err = resolve(&catalog, "missing").unwrap_err();
        assert!(err.to_string().contains("known: default, broken"));
    }
}
