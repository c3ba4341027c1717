//! # Integration Flows
//!
//! Requests driven through the complete router: tracing, security headers,
//! timeout, route ACL, then the page guards over the in-memory backend.

pub mod acl_flows;
pub mod finance_flows;
pub mod report_flows;
