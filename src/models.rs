// src/models.rs

/// The four mutable fields of a credential draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    ServiceName,
    Login,
    Password,
    Url,
}

impl DraftField {
    /// All fields in form order.
    pub const ALL: [DraftField; 4] = [
        DraftField::ServiceName,
        DraftField::Login,
        DraftField::Password,
        DraftField::Url,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::ServiceName => "Service:",
            DraftField::Login => "Login:",
            DraftField::Password => "Password:",
            DraftField::Url => "URL:",
        }
    }
}

/// The in-progress, not-yet-confirmed credential entry being edited.
///
/// Raw values are accepted as-is; validity is computed by the validator,
/// never enforced on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialDraft {
    pub service_name: String,
    pub login: String,
    pub password: String,
    pub url: String,
}

impl CredentialDraft {
    pub fn new() -> Self {
        CredentialDraft::default()
    }

    /// Replaces one field with a new value.
    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::ServiceName => self.service_name = value,
            DraftField::Login => self.login = value,
            DraftField::Password => self.password = value,
            DraftField::Url => self.url = value,
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::ServiceName => &self.service_name,
            DraftField::Login => &self.login,
            DraftField::Password => &self.password,
            DraftField::Url => &self.url,
        }
    }

    /// Clears all four fields back to empty.
    pub fn reset(&mut self) {
        *self = CredentialDraft::default();
    }
}

/// A confirmed, stored credential entry.
///
/// Created only via `CredentialStore::confirm` and never mutated afterwards;
/// an update is a remove followed by a fresh confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: u64,
    pub service_name: String,
    pub login: String,
    pub password: String,
    pub url: String,
}

impl CredentialRecord {
    pub(crate) fn from_draft(id: u64, draft: &CredentialDraft) -> Self {
        CredentialRecord {
            id,
            service_name: draft.service_name.clone(),
            login: draft.login.clone(),
            password: draft.password.clone(),
            url: draft.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_fields() {
        let mut draft = CredentialDraft::new();
        draft.set_field(DraftField::ServiceName, "GitHub".to_string());
        draft.set_field(DraftField::Login, "bob".to_string());
        draft.set_field(DraftField::Password, "abc123!@".to_string());
        draft.set_field(DraftField::Url, "https://github.com".to_string());

        assert_eq!(draft.field(DraftField::ServiceName), "GitHub");
        assert_eq!(draft.field(DraftField::Login), "bob");
        assert_eq!(draft.field(DraftField::Password), "abc123!@");
        assert_eq!(draft.field(DraftField::Url), "https://github.com");
    }

    #[test]
    fn test_reset_clears_all_fields() {
        let mut draft = CredentialDraft::new();
        for field in DraftField::ALL {
            draft.set_field(field, "something".to_string());
        }
        draft.reset();
        assert_eq!(draft, CredentialDraft::default());
    }

    #[test]
    fn test_record_copies_draft_verbatim() {
        let mut draft = CredentialDraft::new();
        draft.set_field(DraftField::ServiceName, "  padded  ".to_string());
        draft.set_field(DraftField::Password, "abc123!@".to_string());

        let record = CredentialRecord::from_draft(7, &draft);
        assert_eq!(record.id, 7);
        assert_eq!(record.service_name, "  padded  ");
        assert_eq!(record.password, "abc123!@");
        assert_eq!(record.login, "");
        assert_eq!(record.url, "");
    }
}
