//! # Life Portal Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the hot checks
//! └── src/
//!     ├── fixtures.rs   # Portal under test: in-memory backend + router
//!     └── integration/  # Requests through the full middleware stack
//!         ├── acl_flows.rs
//!         ├── report_flows.rs
//!         └── finance_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lc-tests
//!
//! # By category
//! cargo test -p lc-tests integration::report_flows
//!
//! # Benchmarks
//! cargo bench -p lc-tests
//! ```

pub mod fixtures;
pub mod integration;
