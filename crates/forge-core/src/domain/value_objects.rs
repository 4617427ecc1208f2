//! Domain value objects: TemplateKind, TemplateTarget.
//!
//! # Design
//!
//! Plain `Copy` values compared by value.
//! Fuzzy resolution of user input lives in `matching.rs`; this file only
//! defines the types, their string representations, and their exact
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── TemplateKind ──────────────────────────────────────────────────────────────

/// What a template produces: a one-shot command or a long-running service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Command,
    Service,
}

impl TemplateKind {
    pub const ALL: [Self; 2] = [Self::Command, Self::Service];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Service => "service",
        }
    }

    /// Top-level `ops.yml` key that lists items of this kind.
    pub const fn manifest_section(&self) -> &'static str {
        match self {
            Self::Command => "commands",
            Self::Service => "services",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "command" => Ok(Self::Command),
            "service" => Ok(Self::Service),
            other => Err(DomainError::KindNotRecognized { kind: other.into() }),
        }
    }
}

// ── TemplateTarget ────────────────────────────────────────────────────────────

/// Runtime the generated project is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateTarget {
    Node,
    Golang,
    Python,
    Bash,
}

impl TemplateTarget {
    pub const ALL: [Self; 4] = [Self::Node, Self::Golang, Self::Python, Self::Bash];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Golang => "golang",
            Self::Python => "python",
            Self::Bash => "bash",
        }
    }
}

impl fmt::Display for TemplateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateTarget {
    type Err = DomainError;

    /// Exact, case-sensitive parse of the canonical name.
    ///
    /// Use [`crate::domain::matching::resolve_target`] for user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::TemplateNotFound { from: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_exactly() {
        assert_eq!("command".parse::<TemplateKind>(), Ok(TemplateKind::Command));
        assert_eq!("service".parse::<TemplateKind>(), Ok(TemplateKind::Service));
        assert_eq!(
            "unknown".parse::<TemplateKind>(),
            Err(DomainError::KindNotRecognized {
                kind: "unknown".into()
            })
        );
    }

    #[test]
    fn kind_manifest_section() {
        assert_eq!(TemplateKind::Command.manifest_section(), "commands");
        assert_eq!(TemplateKind::Service.manifest_section(), "services");
    }

    #[test]
    fn target_display_matches_parse() {
        for target in TemplateTarget::ALL {
            assert_eq!(target.to_string().parse::<TemplateTarget>(), Ok(target));
        }
    }
}
