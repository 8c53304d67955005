//! Request fingerprints and the actions registered for them.

pub mod action;
pub mod fingerprint;
