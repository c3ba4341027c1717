//! # LC-01 Access Policy
//!
//! Local yes/no authorization for the clubs portal. All data comes from the
//! GraphQL service; this crate only decides.
//!
//! ## Components
//!
//! - **Report edit window**: [`can_edit_report`] decides whether a submitted
//!   event report may still be modified by the viewer.
//! - **Policy table**: [`authorize`] evaluates a `(resource kind, action)`
//!   rule from [`POLICY_TABLE`]. Unregistered pairs are denied.
//! - **Action matrix**: [`available_actions`] lists the buttons offered on
//!   the event management page.
//! - **Section visibility**: post-event report and bills sections.
//!
//! ## Usage
//!
//! ```
//! use chrono::Utc;
//! use lc_01_access_policy::{authorize, AccessRequest, Action, Resource};
//! use shared_types::{Event, EventState, Role, Viewer};
//!
//! let event = Event::new("ev1", "drama.club", EventState::Approved);
//! let viewer = Viewer::new("drama.club", Role::Club);
//! let request = AccessRequest::new(&viewer, Resource::Event(Some(&event)), Utc::now());
//! assert!(authorize(Action::Edit, &request).is_allowed());
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::*;
pub use error::Denial;
pub use ports::{Clock, FixedClock, SystemClock};
