#![allow(dead_code)]
use reposource_core::PropertyBag;
use reposource_git::{AuthMethod, GitRepoDef};

pub const CODECOMMIT_URI: &str =
    "https://git-codecommit.us-east-1.amazonaws.com/v1/repos/cfg-repo.git";

/// A definition with every field needed to validate cleanly.
pub fn valid_def(method: AuthMethod) -> GitRepoDef {
    let def = GitRepoDef::new("default")
        .with_uri(CODECOMMIT_URI)
        .with_auth_method(method)
        .with_local_clone("/var/cache")
        .with_file_name("app.yaml");

    match method {
        AuthMethod::GitHubToken => def.with_username("ghp_0123456789"),
        AuthMethod::SshPubKey => def.with_username("/home/cfg/.ssh/id_ed25519"),
        _ => def.with_username("svc-config").with_password("s3cr3t"),
    }
}

/// The property bag the start-up documents produce for `valid_def`.
pub fn valid_properties(method: AuthMethod) -> PropertyBag {
    PropertyBag::new()
        .with("uri", CODECOMMIT_URI)
        .with("authMethod", method.as_str())
        .with("username", "svc-config")
        .with("password", "s3cr3t")
        .with("localClone", "/var/cache")
        .with("fileName", "app.yaml")
}
