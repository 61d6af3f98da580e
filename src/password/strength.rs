//! Simple password strength scoring.
//!
//! One point each for: at least 8 characters, a lowercase letter, an
//! uppercase letter, a digit, a symbol.  The label is picked by
//! `min(score, 4)`, so both 4 and 5 points read as "Strong".

use std::fmt;

use super::generate::SYMBOLS;

/// Minimum length that earns the length point.
const GOOD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `score_strength`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    /// Criteria met, 0..=5.
    pub score: u8,
    pub label: StrengthLabel,
    /// One hint per missed criterion.
    pub suggestions: Vec<&'static str>,
}

/// Score a password.  Pure; never touches the vault.
pub fn score_strength(password: &str) -> StrengthReport {
    let checks: [(bool, &'static str); 5] = [
        (
            password.chars().count() >= GOOD_LENGTH,
            "Use at least 8 characters",
        ),
        (
            password.chars().any(char::is_lowercase),
            "Include lowercase letters",
        ),
        (
            password.chars().any(char::is_uppercase),
            "Include uppercase letters",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Include numbers",
        ),
        (
            password.chars().any(|c| SYMBOLS.contains(c)),
            "Include special characters",
        ),
    ];

    let mut score = 0u8;
    let mut suggestions = Vec::new();
    for (passed, hint) in checks {
        if passed {
            score += 1;
        } else {
            suggestions.push(hint);
        }
    }

    StrengthReport {
        score,
        label: StrengthLabel::from_score(score),
        suggestions,
    }
}
