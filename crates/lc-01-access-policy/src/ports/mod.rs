//! Ports for the access policy.

pub mod outbound;

pub use outbound::{Clock, FixedClock, SystemClock};
