//! User identity types for the balance engine
//!
//! The remote API is loose about how it references a user: a payer may be a
//! bare id, a participant may carry a nested user document with `_id`, and a
//! split detail may wrap the id again under `user`. Every ingestion point runs
//! through [`resolve_user_id`] so the rest of the engine only ever compares
//! plain [`UserId`] strings.

use serde::{Deserialize, Serialize};

/// User identifier
///
/// Compared with exact, case-sensitive string equality.
pub type UserId = String;

/// A user reference in any of the shapes the remote API produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    /// A bare id: `"u1"`
    Id(String),

    /// A numeric id: `42`
    Number(serde_json::Number),

    /// A user document or a wrapper around one: `{"_id": "u1"}`, `{"user": "u1"}`
    Object(UserObject),

    /// Anything else (booleans, arrays, null)
    Unrecognized(serde_json::Value),
}

/// Nested user document
///
/// All fields are optional; which ones are populated depends on the endpoint
/// the record came from. A name field of the wrong JSON type reads as absent,
/// so it never hides an id that resolves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserObject {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Box<UserRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Box<UserRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<UserRef>>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::types::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,
}

impl UserRef {
    /// Build a reference from a bare id
    pub fn id(id: impl Into<String>) -> Self {
        UserRef::Id(id.into())
    }

    /// Build a nested `{"_id": id, "fullName": name}` document
    pub fn document(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        UserRef::Object(UserObject {
            object_id: Some(Box::new(UserRef::Id(id.into()))),
            full_name: Some(full_name.into()),
            ..UserObject::default()
        })
    }

    /// Human-readable name carried by a user document, if any
    ///
    /// Looks at `fullName`, then `name`, then `username`, descending into a
    /// nested `user` wrapper when the outer document has none.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            UserRef::Object(object) => [&object.full_name, &object.name, &object.username]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .find(|name| !name.trim().is_empty())
                .or_else(|| object.user.as_deref().and_then(UserRef::display_name)),
            _ => None,
        }
    }
}

/// Normalize any user reference shape to a plain [`UserId`]
///
/// Returns `None` when no non-empty id can be found. Numeric ids are rendered
/// in their decimal string form. Object shapes are searched in the order
/// `_id`, `id`, `user`.
pub fn resolve_user_id(user: &UserRef) -> Option<UserId> {
    match user {
        UserRef::Id(id) if !id.trim().is_empty() => Some(id.clone()),
        UserRef::Id(_) => None,
        UserRef::Number(number) => Some(number.to_string()),
        UserRef::Object(object) => [&object.object_id, &object.id, &object.user]
            .into_iter()
            .flatten()
            .find_map(|nested| resolve_user_id(nested)),
        UserRef::Unrecognized(_) => None,
    }
}
