//! Integration tests for password generation and strength scoring.

use passvault::password::generate::{alphabet, SYMBOLS};
use passvault::password::{generate_password, score_strength, StrengthLabel};

#[test]
fn generated_password_has_requested_length_and_alphabet() {
    let allowed = alphabet(true);
    let pw = generate_password(16, true).unwrap();

    assert_eq!(pw.chars().count(), 16);
    assert!(pw.chars().all(|c| allowed.contains(&c)));
}

#[test]
fn two_generated_passwords_differ() {
    let a = generate_password(16, true).unwrap();
    let b = generate_password(16, true).unwrap();
    assert_ne!(a, b);
}

#[test]
fn no_symbols_means_alphanumeric_only() {
    let pw = generate_password(64, false).unwrap();
    assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(!pw.chars().any(|c| SYMBOLS.contains(c)));
}

#[test]
fn zero_length_is_rejected() {
    assert!(generate_password(0, true).is_err());
}

#[test]
fn generated_passwords_score_well() {
    let pw = generate_password(20, true).unwrap();
    let report = score_strength(&pw);
    assert!(report.score >= 3, "score was {}", report.score);
}

#[test]
fn obvious_passwords_score_badly() {
    let report = score_strength("abc");
    assert_eq!(report.label, StrengthLabel::Weak);
    assert!(!report.suggestions.is_empty());
}
