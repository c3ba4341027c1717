//! # LC-02 Route ACL
//!
//! First line of defence for every page request: an ordered list of
//! `(path pattern, allowed roles)` pairs, evaluated before any page code
//! runs. Paths that match no pattern are public.
//!
//! Pages that need finer checks (ownership, workflow state, time windows)
//! are guarded again by `lc-03-page-guard`.
//!
//! ## Usage
//!
//! ```
//! use lc_02_route_acl::{AclDecision, ClaimsDecoder, RouteAcl};
//!
//! let acl = RouteAcl::new(ClaimsDecoder::unverified()).unwrap();
//! assert_eq!(
//!     acl.decide("/manage/events", None),
//!     AclDecision::Login("/login/manage/events".to_string())
//! );
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod error;
pub mod service;

pub use domain::*;
pub use error::AclError;
pub use service::{AclDecision, RouteAcl};
