//! Clubs Council members shown as approvers on the CC approval page.

use shared_types::{Member, MemberRole};

/// Club id under which Clubs Council members are registered.
pub const COUNCIL_CLUB_ID: &str = "clubs";

/// Role-name fragments of the council's tech team, who do not approve events.
pub const TECH_TEAM_WORDS: [&str; 3] = ["tech", "web", "developer"];

fn is_tech_role(role: &MemberRole) -> bool {
    let name = role.name.to_lowercase();
    TECH_TEAM_WORDS.iter().any(|word| name.contains(word))
}

/// A role without an end year (or with end year 0) is still held.
fn is_open(role: &MemberRole) -> bool {
    role.end_year.map_or(true, |year| year == 0)
}

/// Current non-tech council members, keeping only their non-tech roles.
pub fn current_approvers(members: Vec<Member>) -> Vec<Member> {
    members
        .into_iter()
        .filter_map(|mut member| {
            member.roles.retain(|role| !is_tech_role(role));
            let current = member.roles.iter().any(is_open);
            current.then_some(member)
        })
        .collect()
}
