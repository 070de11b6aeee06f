//! Authentication methods supported by git repositories.

use std::fmt;
use std::str::FromStr;

use reposource_core::has_text;
use serde::{Deserialize, Serialize};

/// The credential scheme a git repository requires.
///
/// The literal variant names are part of the public contract: credential
/// resolution components switch on them, and they are what appears in the
/// `authMethod` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthMethod {
    /// AWS CodeCommit HTTPS git credentials (username + password).
    #[default]
    CodeCommitGitCreds,
    /// AWS CodeCommit IAM user (access key id + secret).
    CodeCommitIAMUser,
    /// GitHub username + password.
    GitHub,
    /// GitHub personal access token, stored in the username slot.
    GitHubToken,
    /// SSH public key auth; the username slot holds the private key path.
    SshPubKey,
}

impl AuthMethod {
    /// All methods, in declaration order.
    pub const ALL: [AuthMethod; 5] = [
        AuthMethod::CodeCommitGitCreds,
        AuthMethod::CodeCommitIAMUser,
        AuthMethod::GitHub,
        AuthMethod::GitHubToken,
        AuthMethod::SshPubKey,
    ];

    /// Returns the literal name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodeCommitGitCreds => "CodeCommitGitCreds",
            Self::CodeCommitIAMUser => "CodeCommitIAMUser",
            Self::GitHub => "GitHub",
            Self::GitHubToken => "GitHubToken",
            Self::SshPubKey => "SshPubKey",
        }
    }

    /// Returns the credential fields this method needs.
    pub fn requirement(&self) -> CredentialRequirement {
        match self {
            Self::CodeCommitGitCreds | Self::CodeCommitIAMUser | Self::GitHub => {
                CredentialRequirement::UsernameAndPassword
            },
            Self::GitHubToken => CredentialRequirement::Token,
            Self::SshPubKey => CredentialRequirement::PrivateKeyPath,
        }
    }

    /// Returns true if the method authenticates over SSH.
    pub fn is_ssh(&self) -> bool {
        matches!(self, Self::SshPubKey)
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const KNOWN_METHODS: &str = "CodeCommitGitCreds, CodeCommitIAMUser, GitHub, GitHubToken, SshPubKey";

/// Error returned when parsing an unknown auth method literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown auth method '{0}', expected one of {known}", known = KNOWN_METHODS)]
pub struct ParseAuthMethodError(pub String);

impl FromStr for AuthMethod {
    type Err = ParseAuthMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ParseAuthMethodError(s.to_string()))
    }
}

/// The credential fields an [`AuthMethod`] needs to be populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialRequirement {
    /// Both username and password.
    UsernameAndPassword,
    /// A token, held in the username slot.
    Token,
    /// A private key path, held in the username slot.
    PrivateKeyPath,
}

impl CredentialRequirement {
    /// Returns true if the given fields satisfy the requirement.
    pub fn is_satisfied(&self, username: Option<&str>, password: Option<&str>) -> bool {
        match self {
            Self::UsernameAndPassword => has_text(username) && has_text(password),
            Self::Token | Self::PrivateKeyPath => has_text(username),
        }
    }

    /// The validation message reported when the requirement is not met.
    pub fn missing_message(&self) -> &'static str {
        match self {
            Self::UsernameAndPassword => "Username and password must be configured",
            Self::Token => "Username/token must be configured",
            Self::PrivateKeyPath => "Username must be configured as path to private key.",
        }
    }
}
