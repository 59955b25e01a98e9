// src/validator.rs
use crate::models::CredentialDraft;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 16;
const SPECIAL_CHARS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Per-rule password strength results, each independently reportable
/// so the UI can show one feedback line per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    /// Length >= 8.
    pub min_length: bool,
    /// Length <= 16.
    pub max_length: bool,
    /// At least one digit and at least one letter (one combined rule).
    pub letters_and_digits: bool,
    /// At least one of `!@#$%^&*`.
    pub special_char: bool,
}

impl PasswordChecks {
    pub fn all(&self) -> bool {
        self.min_length && self.max_length && self.letters_and_digits && self.special_char
    }

    /// Rule descriptions in display order, paired with their results.
    pub fn lines(&self) -> [(&'static str, bool); 4] {
        [
            ("At least 8 characters", self.min_length),
            ("At most 16 characters", self.max_length),
            ("Letters and digits", self.letters_and_digits),
            ("A special character (!@#$%^&*)", self.special_char),
        ]
    }
}

/// Field-level and overall validity of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub service_name_ok: bool,
    pub login_ok: bool,
    pub password: PasswordChecks,
}

impl ValidationReport {
    pub fn password_ok(&self) -> bool {
        self.password.all()
    }

    pub fn overall_valid(&self) -> bool {
        self.service_name_ok && self.login_ok && self.password_ok()
    }
}

/// Classifies a draft against all entry rules.
///
/// Pure function of the draft's current field values; callers recompute it
/// after every field mutation. The URL field is accepted as free text and
/// carries no rule.
pub fn validate(draft: &CredentialDraft) -> ValidationReport {
    let len = draft.password.chars().count();
    ValidationReport {
        service_name_ok: !draft.service_name.trim().is_empty(),
        login_ok: !draft.login.trim().is_empty(),
        password: PasswordChecks {
            min_length: len >= MIN_PASSWORD_LEN,
            max_length: len <= MAX_PASSWORD_LEN,
            letters_and_digits: draft.password.chars().any(|c| c.is_ascii_digit())
                && draft.password.chars().any(|c| c.is_ascii_alphabetic()),
            special_char: draft.password.chars().any(|c| SPECIAL_CHARS.contains(&c)),
        },
    }
}
