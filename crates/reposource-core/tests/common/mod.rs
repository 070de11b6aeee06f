#![allow(dead_code)]
use reposource_core::PropertyBag;

/// Helper to create a PropertyBag from a YAML string slice.
/// Panics if the YAML is invalid (intended for tests).
pub fn bag_from_yaml(yaml: &str) -> PropertyBag {
    PropertyBag::from_yaml(yaml).expect("Failed to create test properties from YAML")
}

/// Returns a repository document with two sources, nested the way
/// start-up documents nest them.
pub fn repos_document() -> PropertyBag {
    bag_from_yaml(
        r#"
service:
  repos:
    default:
      uri: https://git.example.com/org/cfg-repo.git
      sourceName: git
      refresh: "30"
    s3:
      uri: https://config.example.com.s3.amazonaws.com/s3-repos.yaml
"#,
    )
}
