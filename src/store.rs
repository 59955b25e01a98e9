// src/store.rs
use crate::error::{StoreError, StoreResult};
use crate::models::{CredentialDraft, CredentialRecord};
use crate::validator;
use log;

/// Fixed substitute shown in place of a password while hiding is on.
const PASSWORD_MASK: &str = "********";

/// In-memory, session-lifetime collection of confirmed credentials.
///
/// Records keep insertion order and carry unique ids from a monotonic
/// counter. The `hidden` flag only affects how passwords are presented,
/// never what is stored.
#[derive(Debug, Default)]
pub struct CredentialStore {
    records: Vec<CredentialRecord>,
    next_id: u64,
    hidden: bool,
}

impl CredentialStore {
    pub fn new(hidden: bool) -> Self {
        CredentialStore {
            records: Vec::new(),
            next_id: 0,
            hidden,
        }
    }

    /// Turns a valid draft into a stored record.
    ///
    /// Fails with `StoreError::InvalidDraft` when the draft does not pass
    /// validation, leaving the collection untouched. On success the new
    /// record is appended at the end and a copy returned. The caller's
    /// draft is not reset here; that is the caller's step.
    pub fn confirm(&mut self, draft: &CredentialDraft) -> StoreResult<CredentialRecord> {
        if !validator::validate(draft).overall_valid() {
            log::warn!("Rejected confirm of invalid draft (service: {:?})", draft.service_name);
            return Err(StoreError::InvalidDraft);
        }

        let record = CredentialRecord::from_draft(self.next_id, draft);
        self.next_id += 1;
        self.records.push(record.clone());
        log::info!("Stored credential for service '{}' (id: {})", record.service_name, record.id);
        Ok(record)
    }

    /// Removes the record with the given id. Unknown ids are tolerated
    /// silently, so removal may race with stale UI state.
    pub fn remove(&mut self, id: u64) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() < before {
            log::info!("Removed credential record (id: {})", id);
        } else {
            log::debug!("Remove for unknown record id {} ignored", id);
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.hidden = !self.hidden;
        log::debug!("Password display hidden: {}", self.hidden);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Insertion-ordered read view of all records.
    pub fn list(&self) -> &[CredentialRecord] {
        &self.records
    }

    /// The record's password as it should be displayed: masked while the
    /// hidden flag is set, verbatim otherwise. The stored value is never
    /// altered.
    pub fn presented_password<'a>(&self, record: &'a CredentialRecord) -> &'a str {
        if self.hidden {
            PASSWORD_MASK
        } else {
            &record.password
        }
    }
}
