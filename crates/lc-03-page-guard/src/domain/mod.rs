//! Domain layer for the page guards.

pub mod outcome;
pub mod params;
pub mod roster;
pub mod views;

pub use outcome::{GuardOutcome, Notice};
pub use params::{resolve_club_id, split_member_key, MINE};
pub use roster::{current_approvers, COUNCIL_CLUB_ID, TECH_TEAM_WORDS};
pub use views::*;
