use crate::model::Identity;
use crate::validate::{validate_email, validate_name};
use crate::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Keyed store of identity records with case-insensitive uniqueness on
/// display name and email.
///
/// IDs are `<PREFIX><seq>` with the sequence zero-padded to three digits,
/// starting at 1. The sequence only moves forward, so an ID is never handed
/// out twice even if the record it named were gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRegistry<R> {
    /// Records keyed by sequence number, which is also registration order
    records: BTreeMap<u32, R>,
    next_seq: u32,
}

impl<R> Default for IdentityRegistry<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_seq: 1,
        }
    }
}

impl<R: Identity> IdentityRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a new identity, returning its freshly allocated ID
    pub fn register(&mut self, display_name: &str, email: &str) -> Result<String> {
        validate_name(display_name, "Name")?;
        validate_email(email)?;

        let name_key = display_name.to_lowercase();
        let email_key = email.to_lowercase();
        for existing in self.records.values() {
            if existing.display_name().to_lowercase() == name_key {
                return Err(ShelfError::DuplicateIdentity(format!(
                    "{} name '{}' already exists",
                    R::KIND,
                    display_name
                )));
            }
            if existing.email().to_lowercase() == email_key {
                return Err(ShelfError::DuplicateIdentity(format!(
                    "email '{}' already registered to another {}",
                    email,
                    R::KIND
                )));
            }
        }

        let seq = self.next_seq;
        let id = format!("{}{:03}", R::PREFIX, seq);
        self.records.insert(
            seq,
            R::create(id.clone(), display_name.to_string(), email.to_string()),
        );
        self.next_seq += 1;

        info!(kind = R::KIND, id = %id, name = display_name, "Identity registered");
        Ok(id)
    }

    /// Look up a record by ID. Absence is not an error here; callers decide.
    pub fn get(&self, id: &str) -> Option<&R> {
        let seq = Self::parse_seq(id)?;
        self.records.get(&seq).filter(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut R> {
        let seq = Self::parse_seq(id)?;
        self.records.get_mut(&seq).filter(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All records in registration order
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sequence number the next registration will receive
    pub fn next_sequence(&self) -> u32 {
        self.next_seq
    }

    fn parse_seq(id: &str) -> Option<u32> {
        let seq = id.strip_prefix(R::PREFIX)?.parse().ok();
        if seq.is_none() {
            debug!(kind = R::KIND, id, "Malformed identity ID");
        }
        seq
    }
}
