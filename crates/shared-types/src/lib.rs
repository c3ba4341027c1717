//! # Shared Types Crate
//!
//! This crate contains the domain entities consumed by every portal crate.
//! The portal owns no persisted state: every entity here is a read-only
//! projection of what the external GraphQL service returned for the current
//! request.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Wire Compatibility**: Field names follow the GraphQL schema
//!   (`_id`, `clubid`, `eventReportSubmitted`, ...) via serde attributes.
//! - **Fail Closed**: Timestamps that the access rules depend on are kept
//!   raw and parsed at decision time, so a malformed value denies access
//!   instead of failing deserialization.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::parse_instant;
