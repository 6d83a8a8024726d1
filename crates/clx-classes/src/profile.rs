//! Syntax profiles and their resolution.
//!
//! A profile names the extension operator, the two member keywords and the
//! feature flags. Callers pick a built-in profile by name and may override
//! any field; `resolve` merges the two, validates the result against the
//! base grammar and precomputes what the scanner and dispatcher need.

use clx_scanner::char_codes::{is_digit, is_identifier_start, is_identifier_text};
use clx_scanner::{CharacterCodes, SyntaxKind, text_to_punctuation};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_PROFILE: &str = "default";

/// Errors raised while building a parser configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown syntax profile '{name}' (expected one of: {known})")]
    UnknownProfile { name: String, known: String },

    #[error("invalid operator '{operator}': {reason}")]
    InvalidOperator {
        operator: String,
        reason: &'static str,
    },

    #[error("invalid {field} '{keyword}': keywords must be identifier-like")]
    InvalidKeyword { field: &'static str, keyword: String },

    #[error("malformed syntax options: {message}")]
    MalformedOptions { message: String },
}

/// Keyword, operator and feature flags of one syntax flavour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxProfile {
    pub operator: Cow<'static, str>,
    pub instance_variables_keyword: Cow<'static, str>,
    pub instance_variables_initializer: bool,
    /// Carried for configuration compatibility; no shorthand syntax reads it yet.
    pub instance_variables_shorthand: bool,
    pub hidden_methods_keyword: Cow<'static, str>,
    /// Carried for configuration compatibility; no shorthand syntax reads it yet.
    pub hidden_methods_shorthand: bool,
}

/// Read-only registry of named profiles.
#[derive(Clone, Copy, Debug)]
pub struct ProfileTable {
    entries: &'static [(&'static str, SyntaxProfile)],
}

const BUILTIN_PROFILES: &[(&str, SyntaxProfile)] = &[
    (
        "default",
        SyntaxProfile {
            operator: Cow::Borrowed("->"),
            instance_variables_keyword: Cow::Borrowed("var"),
            instance_variables_initializer: true,
            instance_variables_shorthand: true,
            hidden_methods_keyword: Cow::Borrowed("hidden"),
            hidden_methods_shorthand: false,
        },
    ),
    (
        "minimal",
        SyntaxProfile {
            operator: Cow::Borrowed("->"),
            instance_variables_keyword: Cow::Borrowed("var"),
            instance_variables_initializer: false,
            instance_variables_shorthand: false,
            hidden_methods_keyword: Cow::Borrowed("hidden"),
            hidden_methods_shorthand: false,
        },
    ),
    (
        "my",
        SyntaxProfile {
            operator: Cow::Borrowed("::"),
            instance_variables_keyword: Cow::Borrowed("my"),
            instance_variables_initializer: true,
            instance_variables_shorthand: true,
            hidden_methods_keyword: Cow::Borrowed("my"),
            hidden_methods_shorthand: true,
        },
    ),
    (
        "internal",
        SyntaxProfile {
            operator: Cow::Borrowed("~>"),
            instance_variables_keyword: Cow::Borrowed("internal"),
            instance_variables_initializer: true,
            instance_variables_shorthand: false,
            hidden_methods_keyword: Cow::Borrowed("internal"),
            hidden_methods_shorthand: false,
        },
    ),
];

impl ProfileTable {
    /// The four built-in profiles: `default`, `minimal`, `my`, `internal`.
    pub const fn builtin() -> ProfileTable {
        ProfileTable {
            entries: BUILTIN_PROFILES,
        }
    }

    pub const fn new(entries: &'static [(&'static str, SyntaxProfile)]) -> ProfileTable {
        ProfileTable { entries }
    }

    pub fn get(&self, name: &str) -> Option<&'static SyntaxProfile> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, profile)| profile)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// User-facing configuration: a profile name plus per-field overrides.
///
/// Deserializes from the camelCase JSON form
/// `{ "profile": "my", "operator": "::", "hiddenMethodsKeyword": "hide" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SyntaxOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_variables_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_variables_initializer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_variables_shorthand: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_methods_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_methods_shorthand: Option<bool>,
}

impl SyntaxOptions {
    pub fn with_profile(name: impl Into<String>) -> SyntaxOptions {
        SyntaxOptions {
            profile: Some(name.into()),
            ..SyntaxOptions::default()
        }
    }

    pub fn from_json(text: &str) -> Result<SyntaxOptions, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::MalformedOptions {
            message: err.to_string(),
        })
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(mut self, other: SyntaxOptions) -> SyntaxOptions {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            profile,
            operator,
            instance_variables_keyword,
            instance_variables_initializer,
            instance_variables_shorthand,
            hidden_methods_keyword,
            hidden_methods_shorthand
        );
        self
    }
}

/// A merged, validated profile ready to be installed into a parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: String,
    pub profile: SyntaxProfile,
    /// Code points of `profile.operator`, in order
    pub operator_char_codes: SmallVec<[u32; 4]>,
    pub operator_token_kind: SyntaxKind,
}

impl ResolvedProfile {
    #[inline]
    pub fn operator(&self) -> &str {
        &self.profile.operator
    }

    #[inline]
    pub fn instance_variables_keyword(&self) -> &str {
        &self.profile.instance_variables_keyword
    }

    #[inline]
    pub fn hidden_methods_keyword(&self) -> &str {
        &self.profile.hidden_methods_keyword
    }

    #[inline]
    pub fn instance_variables_initializer(&self) -> bool {
        self.profile.instance_variables_initializer
    }

    /// Both member keywords are the same word (`my`, `internal`).
    #[inline]
    pub fn shares_member_keyword(&self) -> bool {
        self.profile.instance_variables_keyword == self.profile.hidden_methods_keyword
    }

    pub fn into_shared(self) -> Arc<ResolvedProfile> {
        Arc::new(self)
    }
}

/// Merge `options` over its named profile and validate the result.
pub fn resolve(table: &ProfileTable, options: &SyntaxOptions) -> Result<ResolvedProfile, ConfigError> {
    let name = options.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
    let Some(base) = table.get(name) else {
        return Err(ConfigError::UnknownProfile {
            name: name.to_string(),
            known: table.names().collect::<Vec<_>>().join(", "),
        });
    };

    let mut profile = base.clone();
    if let Some(operator) = &options.operator {
        profile.operator = Cow::Owned(operator.clone());
    }
    if let Some(keyword) = &options.instance_variables_keyword {
        profile.instance_variables_keyword = Cow::Owned(keyword.clone());
    }
    if let Some(keyword) = &options.hidden_methods_keyword {
        profile.hidden_methods_keyword = Cow::Owned(keyword.clone());
    }
    if let Some(flag) = options.instance_variables_initializer {
        profile.instance_variables_initializer = flag;
    }
    if let Some(flag) = options.instance_variables_shorthand {
        profile.instance_variables_shorthand = flag;
    }
    if let Some(flag) = options.hidden_methods_shorthand {
        profile.hidden_methods_shorthand = flag;
    }

    validate_operator(&profile.operator)?;
    validate_keyword("instanceVariablesKeyword", &profile.instance_variables_keyword)?;
    validate_keyword("hiddenMethodsKeyword", &profile.hidden_methods_keyword)?;

    let operator_char_codes = profile.operator.chars().map(|c| c as u32).collect();
    debug!(
        profile = name,
        operator = %profile.operator,
        instance_keyword = %profile.instance_variables_keyword,
        hidden_keyword = %profile.hidden_methods_keyword,
        initializer = profile.instance_variables_initializer,
        "resolved syntax profile"
    );

    Ok(ResolvedProfile {
        name: name.to_string(),
        profile,
        operator_char_codes,
        operator_token_kind: SyntaxKind::ExtensionOperatorToken,
    })
}

fn validate_operator(operator: &str) -> Result<(), ConfigError> {
    let invalid = |reason| {
        Err(ConfigError::InvalidOperator {
            operator: operator.to_string(),
            reason,
        })
    };
    let Some(first) = operator.chars().next() else {
        return invalid("operator must not be empty");
    };
    if operator.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return invalid("operator must not contain whitespace or control characters");
    }
    let first = first as u32;
    if is_identifier_start(first) || is_digit(first) || first == CharacterCodes::BACKSLASH {
        return invalid("operator must not start like an identifier or number");
    }
    if matches!(
        first,
        CharacterCodes::DOUBLE_QUOTE | CharacterCodes::SINGLE_QUOTE | CharacterCodes::BACKTICK
    ) {
        return invalid("operator must not start with a quote");
    }
    if operator.starts_with("//") || operator.starts_with("/*") {
        return invalid("operator must not start a comment");
    }
    if text_to_punctuation(operator).is_some() {
        return invalid("operator collides with a built-in punctuator");
    }
    Ok(())
}

fn validate_keyword(field: &'static str, keyword: &str) -> Result<(), ConfigError> {
    if is_identifier_text(keyword) {
        Ok(())
    } else {
        Err(ConfigError::InvalidKeyword {
            field,
            keyword: keyword.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/profile_tests.rs"]
mod profile_tests;
