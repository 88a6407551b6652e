//! Presence types
//!
//! The server pushes the whole presence map on every change, so these types
//! describe a snapshot, never an incremental diff.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Opaque per-session user token
pub type UserToken = String;

/// Full presence snapshot, keyed by user token
///
/// Ordered by token so projections are stable for a given map.
pub type PresenceMap = BTreeMap<UserToken, PresenceEntry>;

/// User record embedded in presence metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub given_name: String,
    /// Whether this session facilitates the retro
    #[serde(default)]
    pub is_facilitator: bool,
    /// Any further fields the server attaches (email, picture, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Create a user with no extra fields
    #[must_use]
    pub fn new(given_name: impl Into<String>, is_facilitator: bool) -> Self {
        Self {
            given_name: given_name.into(),
            is_facilitator,
            extra: serde_json::Map::new(),
        }
    }
}

/// One metadata record for a connected session
///
/// A missing or malformed `user` decodes as `None` so one bad record never
/// rejects the whole presence snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceMeta {
    /// The user behind the session
    #[serde(
        default,
        deserialize_with = "deserialize_user",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<User>,
    /// Transport-level presence reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phx_ref: Option<String>,
}

impl PresenceMeta {
    /// Metadata with no transport reference
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user),
            phx_ref: None,
        }
    }
}

fn deserialize_user<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
where
    D: Deserializer<'de>,
{
    let user = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value(raw) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!(error = %err, "ignoring malformed presence user");
                None
            }
        },
    };
    Ok(user)
}

/// All metadata records for one user token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceEntry {
    /// Metadata records, oldest first
    #[serde(default)]
    pub metas: Vec<PresenceMeta>,
}

impl PresenceEntry {
    /// Entry with a single metadata record
    #[must_use]
    pub fn single(user: User) -> Self {
        Self {
            metas: vec![PresenceMeta::new(user)],
        }
    }

    /// The representative metadata record (the first one)
    #[inline]
    #[must_use]
    pub fn representative(&self) -> Option<&PresenceMeta> {
        self.metas.first()
    }

    /// The representative user, if its record carries a usable one
    #[inline]
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.representative().and_then(|meta| meta.user.as_ref())
    }
}
