//! Registry of expectations.
//!
//! Maps each [`RequestFingerprint`] to the [`Action`] registered for it. The last
//! registration for an equal fingerprint wins but keeps its original position,
//! so iteration order is the order expectations were first declared.

use crate::types::action::Action;
use crate::types::fingerprint::RequestFingerprint;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Entries {
    /// Fingerprint to position in `actions`
    index: HashMap<RequestFingerprint, usize>,
    /// Expectations in registration order
    actions: Vec<(RequestFingerprint, Action)>,
}

/// Thread-safe expectation registry shared by the builder and the client.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    entries: RwLock<Entries>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `action` for `fingerprint`, returning the action it replaced.
    pub fn put(&self, fingerprint: RequestFingerprint, action: Action) -> Option<Action> {
        let mut entries = self.write();
        if let Some(&position) = entries.index.get(&fingerprint) {
            let slot = &mut entries.actions[position].1;
            return Some(std::mem::replace(slot, action));
        }

        let position = entries.actions.len();
        entries.index.insert(fingerprint.clone(), position);
        entries.actions.push((fingerprint, action));
        None
    }

    /// Action registered for a structurally equal fingerprint.
    pub fn get(&self, fingerprint: &RequestFingerprint) -> Option<Action> {
        let entries = self.read();
        entries
            .index
            .get(fingerprint)
            .map(|&position| entries.actions[position].1.clone())
    }

    /// First action, in registration order, whose fingerprint satisfies `predicate`.
    pub fn find_first<P>(&self, predicate: P) -> Option<(RequestFingerprint, Action)>
    where
        P: Fn(&RequestFingerprint) -> bool,
    {
        self.read()
            .actions
            .iter()
            .find(|(fingerprint, _)| predicate(fingerprint))
            .cloned()
    }

    /// Registered fingerprints in registration order.
    pub fn fingerprints(&self) -> Vec<RequestFingerprint> {
        self.read()
            .actions
            .iter()
            .map(|(fingerprint, _)| fingerprint.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
