use reposource_core::{PropertyBag, RepoDef, RepoDefError, SecuredRepo};
use reposource_git::{AuthMethod, GitRepoDef};

mod common;

const PAIR_MESSAGE: &str = "Username and password must be configured";
const TOKEN_MESSAGE: &str = "Username/token must be configured";
const SSH_MESSAGE: &str = "Username must be configured as path to private key.";
const REFRESH_MESSAGE: &str = "Refresh rate must be at least 5 seconds or more.";

fn count(messages: &[String], expected: &str) -> usize {
    messages.iter().filter(|m| m.as_str() == expected).count()
}

#[test]
fn test_all_methods_valid_when_populated() {
    for method in AuthMethod::ALL {
        let def = common::valid_def(method);
        assert!(def.valid().unwrap().is_empty(), "{} should be valid", method);
    }
}

#[test]
fn test_credential_pair_methods_require_both_fields() {
    let pair_methods = [
        AuthMethod::CodeCommitGitCreds,
        AuthMethod::CodeCommitIAMUser,
        AuthMethod::GitHub,
    ];

    for method in pair_methods {
        let mut no_user = common::valid_def(method);
        no_user.set_username(Some(String::new()));
        let messages = no_user.valid().unwrap();
        assert_eq!(count(&messages, PAIR_MESSAGE), 1, "{} without username", method);
        assert_eq!(messages.len(), 1);

        let mut no_password = common::valid_def(method);
        no_password.set_password(None);
        let messages = no_password.valid().unwrap();
        assert_eq!(count(&messages, PAIR_MESSAGE), 1, "{} without password", method);

        let mut neither = common::valid_def(method);
        neither.set_username(None);
        neither.set_password(Some("   ".to_string()));
        assert_eq!(count(&neither.valid().unwrap(), PAIR_MESSAGE), 1);
    }
}

#[test]
fn test_token_method_requires_username() {
    let mut def = common::valid_def(AuthMethod::GitHubToken);
    def.set_username(None);
    // A password does not stand in for the token
    def.set_password(Some("ghp_in_the_wrong_slot".to_string()));

    assert_eq!(def.valid().unwrap(), vec![TOKEN_MESSAGE.to_string()]);
}

#[test]
fn test_ssh_method_requires_key_path() {
    let mut def = common::valid_def(AuthMethod::SshPubKey);
    def.set_username(Some(String::new()));

    assert_eq!(def.valid().unwrap(), vec![SSH_MESSAGE.to_string()]);
}

#[test]
fn test_ssh_method_ignores_password() {
    let def = common::valid_def(AuthMethod::SshPubKey);
    assert!(def.password().is_none());
    assert!(def.valid().unwrap().is_empty());
}

#[test]
fn test_refresh_bounds() {
    for secs in 1..=4 {
        let def = common::valid_def(AuthMethod::GitHub).with_refresh(secs);
        assert_eq!(def.valid().unwrap(), vec![REFRESH_MESSAGE.to_string()], "refresh {}", secs);
    }

    for secs in [0, 5, 6, 60, 86_400] {
        let def = common::valid_def(AuthMethod::GitHub).with_refresh(secs);
        assert!(def.valid().unwrap().is_empty(), "refresh {}", secs);
    }
}

#[test]
fn test_credential_and_refresh_reported_together() {
    let mut def = common::valid_def(AuthMethod::CodeCommitIAMUser).with_refresh(3);
    def.set_password(None);

    assert_eq!(
        def.valid().unwrap(),
        vec![PAIR_MESSAGE.to_string(), REFRESH_MESSAGE.to_string()]
    );
}

#[test]
fn test_unset_auth_method_skips_credentials() {
    let properties = PropertyBag::new()
        .with("uri", common::CODECOMMIT_URI)
        .with("authMethod", "")
        .with("refresh", 4);

    let def = GitRepoDef::from_properties("public", &properties).unwrap();
    assert_eq!(def.valid().unwrap(), vec![REFRESH_MESSAGE.to_string()]);
}

#[test]
fn test_default_auth_method_checks_credentials() {
    let def = GitRepoDef::new("default").with_uri(common::CODECOMMIT_URI);
    assert_eq!(def.valid().unwrap(), vec![PAIR_MESSAGE.to_string()]);
}

#[test]
fn test_unparseable_address_is_fatal() {
    let def = common::valid_def(AuthMethod::GitHub)
        .with_uri("https://git.example.com:notaport/org/cfg.git");

    let result = def.valid();
    assert!(matches!(result, Err(RepoDefError::InvalidAddress { .. })));
}

#[test]
fn test_missing_address_is_fatal() {
    let mut def = common::valid_def(AuthMethod::GitHub);
    def.set_uri("");

    let err = def.valid().unwrap_err();
    assert!(err.is_missing_uri());
    assert!(err.to_string().contains("default"));
}

#[test]
fn test_ensure_valid_carries_messages() {
    let def = common::valid_def(AuthMethod::GitHubToken).with_refresh(1);

    match def.ensure_valid() {
        Err(RepoDefError::Invalid { name, messages }) => {
            assert_eq!(name, "default");
            assert_eq!(messages, vec![REFRESH_MESSAGE.to_string()]);
        },
        other => panic!("Expected Invalid error, got {:?}", other),
    }
}

#[test]
fn test_validation_is_repeatable() {
    let def = common::valid_def(AuthMethod::GitHub).with_refresh(2);
    assert_eq!(def.valid().unwrap(), def.valid().unwrap());
}

#[test]
fn test_host_without_repository_path_is_fatal() {
    for uri in ["https://git.example.com", "https://git.example.com/"] {
        let def = common::valid_def(AuthMethod::GitHub).with_uri(uri);
        assert!(def.valid().unwrap_err().is_invalid_address(), "{}", uri);
    }
}
