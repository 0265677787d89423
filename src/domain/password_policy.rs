//! Password complexity policy applied to every newly chosen password.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARACTERS};

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").expect("valid regex"));
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]").expect("valid regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]").expect("valid regex"));

/// Per-requirement outcome, serialized back to clients as feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PasswordRequirements {
    /// At least eight characters
    pub length: bool,
    /// At least one ASCII upper-case letter
    pub uppercase: bool,
    /// At least one ASCII lower-case letter
    pub lowercase: bool,
    /// At least one digit
    pub number: bool,
    /// At least one character from `!@#$%^&*(),.?":{}|<>`
    pub special: bool,
}

/// Complexity check result. `valid` is the conjunction of every requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PasswordComplexity {
    pub valid: bool,
    pub requirements: PasswordRequirements,
}

/// Evaluate a candidate password against every requirement.
pub fn validate(password: &str) -> PasswordComplexity {
    let requirements = PasswordRequirements {
        length: password.chars().count() >= MIN_PASSWORD_LENGTH,
        uppercase: UPPERCASE.is_match(password),
        lowercase: LOWERCASE.is_match(password),
        number: DIGIT.is_match(password),
        special: password
            .chars()
            .any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c)),
    };

    PasswordComplexity {
        valid: requirements.length
            && requirements.uppercase
            && requirements.lowercase
            && requirements.number
            && requirements.special,
        requirements,
    }
}
