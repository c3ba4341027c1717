//! Path parameters with portal-specific encodings.

use shared_types::Viewer;

/// Club id placeholder meaning "the signed-in club".
pub const MINE: &str = "~mine";

/// Separator between club id and user id in member page paths.
const MEMBER_KEY_SEPARATORS: [&str; 3] = [":", "%3A", "%3a"];

/// Club id addressed by a `/manage/clubs/{id}` path.
///
/// `~mine` (raw or percent-encoded) resolves to the viewer's uid; an
/// anonymous viewer resolves to nothing.
pub fn resolve_club_id(id: &str, viewer: &Viewer) -> Option<String> {
    if id == MINE || id.eq_ignore_ascii_case("%7Emine") {
        return viewer.uid.clone();
    }
    (!id.is_empty()).then(|| id.to_string())
}

/// Split a `{cid}:{uid}` member key. The colon may arrive percent-encoded.
pub fn split_member_key(key: &str) -> Option<(&str, &str)> {
    let (cid, uid) = MEMBER_KEY_SEPARATORS
        .iter()
        .find_map(|sep| key.split_once(sep))?;
    (!cid.is_empty() && !uid.is_empty()).then_some((cid, uid))
}
