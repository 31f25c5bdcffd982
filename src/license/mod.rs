//! License text handling.
//!
//! - [`templates`]: canonical license bodies keyed by identifier, cached per run.
//! - [`sniff`]: recognizes well-known license files by their wording.

pub mod sniff;
pub mod templates;
