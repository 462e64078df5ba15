//! Password strength scoring.
//!
//! Pure validation, no authentication: callers decide what to do with a
//! weak password. Scoring mirrors the usual length/character-class
//! checklist with deductions for repeats and well-known sequences.

/// Outcome of scoring a candidate password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Strong enough to accept (score of at least 4).
    pub is_valid: bool,
    /// Net score, floored at zero.
    pub score: u8,
    /// Human-readable criteria the password failed.
    pub feedback: Vec<&'static str>,
}

/// Common sequences that cost a point when present anywhere in the
/// password.
const COMMON_PATTERNS: &[&str] = &["123", "abc", "qwe", "password", "admin"];

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Score a candidate password.
///
/// One point each for length, lowercase, uppercase, digits, and special
/// characters; one point off for a character repeated three or more times
/// in a row, and one off if any common sequence appears.
pub fn validate_password_strength(password: &str) -> PasswordStrength {
    let mut score: i32 = 0;
    let mut feedback = Vec::new();

    if password.len() >= 8 {
        score += 1;
    } else {
        feedback.push("at least 8 characters");
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    } else {
        feedback.push("include lowercase letters");
    }

    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    } else {
        feedback.push("include uppercase letters");
    }

    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    } else {
        feedback.push("include numbers");
    }

    if password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        score += 1;
    } else {
        feedback.push("include special characters");
    }

    if has_repeated_run(password) {
        score -= 1;
        feedback.push("avoid repeated characters");
    }

    let lowered = password.to_lowercase();
    if COMMON_PATTERNS.iter().any(|p| lowered.contains(p)) {
        score -= 1;
        feedback.push("avoid common patterns");
    }

    PasswordStrength {
        is_valid: score >= 4,
        score: score.max(0) as u8,
        feedback,
    }
}

/// Whether any character appears three or more times in a row.
fn has_repeated_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password() {
        let strength = validate_password_strength("Str0ng!Pass");
        assert!(strength.is_valid);
        assert_eq!(strength.score, 5);
        assert!(strength.feedback.is_empty());
    }

    #[test]
    fn test_short_password_fails_with_feedback() {
        let strength = validate_password_strength("aB1!");
        assert!(!strength.is_valid);
        assert!(strength.feedback.contains(&"at least 8 characters"));
    }

    #[test]
    fn test_common_pattern_deduction() {
        // Hits both the "password" and "123" checks, but the deduction is
        // a single point regardless of how many patterns match.
        let strength = validate_password_strength("password123");
        assert!(!strength.is_valid);
        assert_eq!(strength.score, 2);
        assert!(strength.feedback.contains(&"avoid common patterns"));
    }

    #[test]
    fn test_repeated_run_deduction() {
        let strength = validate_password_strength("Aaa!1aaaZ");
        assert!(strength.feedback.contains(&"avoid repeated characters"));
    }

    #[test]
    fn test_score_floors_at_zero() {
        let strength = validate_password_strength("aaa");
        assert_eq!(strength.score, 0);
        assert!(!strength.is_valid);
    }
}
