//! # LC-03 Page Guards
//!
//! Server-side guards for every portal page that needs more than a role
//! check. A guard fetches what the page needs from the GraphQL service,
//! asks `lc-01-access-policy` whether the viewer may see it, and resolves
//! to one of four outcomes:
//!
//! | Outcome    | Gateway response                      |
//! |------------|---------------------------------------|
//! | `Render`   | view model as JSON                    |
//! | `Redirect` | 307 to another page                   |
//! | `NotFound` | 307 to `/404`                         |
//! | `Notice`   | message in place of the page          |
//!
//! ## Architecture
//!
//! - `ports::outbound::PortalBackend`: GraphQL queries the guards need
//! - `adapters::GraphQlBackend`: reqwest client forwarding the session cookie
//! - `adapters::InMemoryBackend`: fixtures for tests
//! - `service::PageGuard`: one method per guarded page
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use lc_03_page_guard::{GraphQlBackend, GraphQlConfig, PageGuard, Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = GraphQlBackend::new(GraphQlConfig::default())?;
//! let guard = PageGuard::new(Arc::new(backend));
//! let outcome = guard
//!     .event_page(&Session::new(Some("Authorization=...".into())), "ev1")
//!     .await?;
//! println!("{}", outcome.label());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{GraphQlBackend, GraphQlConfig, InMemoryBackend, DEFAULT_ENDPOINT};
pub use domain::*;
pub use error::{BackendError, GuardError};
pub use ports::{Operation, PortalBackend, Session};
pub use service::{pages, PageGuard, PageResult, BILLS_UPLOAD_REFUSED};
