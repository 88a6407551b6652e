//! Presence projection
//!
//! Flattens the raw presence map into render-ready user lists. Never mutates
//! its input.

use retro_domain::{PresenceEntry, PresenceMap, User};

/// Project each token to a value with `chooser`, in token order
///
/// Entries for which `chooser` returns `None` are skipped.
pub fn list_by<'a, T, F>(presences: &'a PresenceMap, mut chooser: F) -> Vec<T>
where
    F: FnMut(&'a str, &'a PresenceEntry) -> Option<T>,
{
    presences
        .iter()
        .filter_map(|(token, entry)| chooser(token.as_str(), entry))
        .collect()
}

/// One user per connected token, taken from its first metadata record
#[must_use]
pub fn list_users(presences: &PresenceMap) -> Vec<User> {
    list_by(presences, |_token, entry| entry.user().cloned())
}

/// The presence entry that represents the viewer
#[inline]
#[must_use]
pub fn current_presence<'a>(presences: &'a PresenceMap, user_token: &str) -> Option<&'a PresenceEntry> {
    presences.get(user_token)
}

/// The viewer's representative user record
#[inline]
#[must_use]
pub fn current_user<'a>(presences: &'a PresenceMap, user_token: &str) -> Option<&'a User> {
    current_presence(presences, user_token).and_then(PresenceEntry::user)
}
