//! Credential shapes for git repositories.

use std::fmt;
use std::path::PathBuf;

use reposource_core::{SecuredRepo, has_text};

use crate::auth::{AuthMethod, CredentialRequirement};

/// Credentials resolved from a git repository definition, ready to be handed
/// to the component performing the clone or pull.
///
/// `Debug` output never contains secrets.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username and password (or access key id and secret).
    UserPassword { username: String, password: String },
    /// A personal access token.
    Token(String),
    /// An SSH private key on disk and an optional known-hosts reference.
    SshKey {
        private_key: PathBuf,
        known_hosts: Option<String>,
    },
}

impl Credentials {
    /// Builds the credentials `method` needs from the raw fields.
    ///
    /// Returns `None` when the fields do not satisfy the method.
    pub fn resolve(
        method: AuthMethod,
        username: Option<&str>,
        password: Option<&str>,
        hosts_name: Option<&str>,
    ) -> Option<Self> {
        let requirement = method.requirement();
        if !requirement.is_satisfied(username, password) {
            return None;
        }

        let username = username?.to_string();
        Some(match requirement {
            CredentialRequirement::UsernameAndPassword => Self::UserPassword {
                username,
                password: password?.to_string(),
            },
            CredentialRequirement::Token => Self::Token(username),
            CredentialRequirement::PrivateKeyPath => Self::SshKey {
                private_key: PathBuf::from(username),
                known_hosts: hosts_name.filter(|h| has_text(Some(h))).map(str::to_string),
            },
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserPassword { username, .. } => f
                .debug_struct("UserPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
            Self::SshKey {
                private_key,
                known_hosts,
            } => f
                .debug_struct("SshKey")
                .field("private_key", private_key)
                .field("known_hosts", known_hosts)
                .finish(),
        }
    }
}

/// A secured repository whose credentials take one of the shapes git
/// supports.
pub trait GitCredentials: SecuredRepo {
    /// The configured method, `None` when unset.
    fn git_auth_method(&self) -> Option<AuthMethod>;

    /// Known-hosts reference used with SSH auth.
    fn hosts_name(&self) -> Option<&str>;

    /// The typed credentials, if the method is set and its fields are present.
    fn credentials(&self) -> Option<Credentials> {
        Credentials::resolve(
            self.git_auth_method()?,
            self.username(),
            self.password(),
            self.hosts_name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_password() {
        let creds =
            Credentials::resolve(AuthMethod::GitHub, Some("octocat"), Some("hunter2"), None);
        assert_eq!(
            creds,
            Some(Credentials::UserPassword {
                username: "octocat".to_string(),
                password: "hunter2".to_string(),
            })
        );
    }

    #[test]
    fn test_resolve_token_ignores_password() {
        let creds = Credentials::resolve(AuthMethod::GitHubToken, Some("ghp_abc"), None, None);
        assert_eq!(creds, Some(Credentials::Token("ghp_abc".to_string())));
    }

    #[test]
    fn test_resolve_ssh_key() {
        let creds = Credentials::resolve(
            AuthMethod::SshPubKey,
            Some("/home/cfg/.ssh/id_ed25519"),
            None,
            Some("github"),
        );
        assert_eq!(
            creds,
            Some(Credentials::SshKey {
                private_key: PathBuf::from("/home/cfg/.ssh/id_ed25519"),
                known_hosts: Some("github".to_string()),
            })
        );
    }

    #[test]
    fn test_resolve_missing_fields() {
        assert!(
            Credentials::resolve(AuthMethod::CodeCommitIAMUser, Some("AKIA"), None, None).is_none()
        );
        assert!(Credentials::resolve(AuthMethod::SshPubKey, None, None, Some("github")).is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::UserPassword {
            username: "octocat".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("octocat"));
        assert!(!debug.contains("hunter2"));

        let token = format!("{:?}", Credentials::Token("ghp_secret".to_string()));
        assert!(!token.contains("ghp_secret"));
    }
}
