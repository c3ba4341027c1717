//! Page paths the policy and guards redirect to.

/// Landing page for every denial.
pub const NOT_FOUND: &str = "/404";

pub fn event_page(id: &str) -> String {
    format!("/manage/events/{id}")
}

pub fn report_new(id: &str) -> String {
    format!("/manage/events/{id}/report/new")
}

pub fn report_edit(id: &str) -> String {
    format!("/manage/events/{id}/report/edit")
}

pub fn profile_page(uid: &str) -> String {
    format!("/profile/{uid}")
}

/// Finance overview the bill review page links back to.
pub const FINANCES: &str = "/manage/finances";
