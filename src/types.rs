//! Marketplace records exchanged with the REST backend.
//!
//! Records are lenient: a field that is missing, `null` or of the wrong JSON
//! type takes its default, `_id` stands in for `id` when `id` is absent, and
//! unknown fields are kept in `extra` so a record survives a round trip
//! (e.g. through session storage) unchanged. Shape mismatches therefore show
//! up as absent fields, not as errors.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Role value that grants access to admin routes.
pub const ADMIN_ROLE: &str = "admin";

/// Identifier key written by Mongo-backed endpoints.
const MONGO_ID: &str = "_id";

// =============================================================================
// Lenient decoding
// =============================================================================

/// Decode a field, falling back to its default when the JSON value does not
/// fit. Numbers are accepted where text is expected.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match T::deserialize(&value) {
        Err(_) if value.is_number() => T::deserialize(Value::String(value.to_string())),
        other => other,
    };
    Ok(parsed.unwrap_or_default())
}

/// Move `_id` to `id` unless the record already carries a non-null `id`.
///
/// When both are present `_id` is left in place and ends up in `extra`.
fn promote_mongo_id(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    if map.get("id").is_some_and(|id| !id.is_null()) {
        return;
    }
    if let Some(id) = map.remove(MONGO_ID) {
        map.insert("id".to_owned(), id);
    }
}

/// Wire impls for records carrying an id: the derived (`remote = "Self"`)
/// field mapping, preceded by `_id` promotion on the way in.
macro_rules! identified_record {
    ($($record:ty),+ $(,)?) => {$(
        impl<'de> Deserialize<'de> for $record {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let mut value = Value::deserialize(deserializer)?;
                promote_mongo_id(&mut value);
                <$record>::deserialize(value).map_err(de::Error::custom)
            }
        }

        impl Serialize for $record {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$record>::serialize(self, serializer)
            }
        }
    )+};
}

identified_record!(
    UserProfile,
    Job,
    Talent,
    Project,
    Application,
    Conversation,
    Message,
    Notification,
);

// =============================================================================
// Identity
// =============================================================================

/// Authenticated user's profile.
///
/// Opaque to the client except for [`UserProfile::role`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Authorization role, e.g. `"admin"`, `"talent"`, `"recruiter"`.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Whether this profile carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Partial profile update sent to `PUT /auth/profile`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Browsing
// =============================================================================

/// A job offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Job {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub company: String,
    #[serde(deserialize_with = "lenient")]
    pub location: String,
    #[serde(deserialize_with = "lenient")]
    pub salary: Option<String>,
    /// Contract type (CDI, CDD, Freelance, ...).
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub contract: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub posted_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /jobs`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

/// A talent profile shown in discovery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Talent {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    /// Headline, e.g. "Senior Mobile Engineer".
    #[serde(deserialize_with = "lenient")]
    pub role: String,
    #[serde(deserialize_with = "lenient")]
    pub location: String,
    #[serde(deserialize_with = "lenient")]
    pub bio: String,
    #[serde(deserialize_with = "lenient")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub avatar: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub is_available: bool,
    #[serde(deserialize_with = "lenient")]
    pub projects_count: Option<u32>,
    /// Free-form count as displayed ("1.2k").
    pub followers_count: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A portfolio or client project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    pub owner: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    pub budget: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /projects` and `PUT /projects/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// =============================================================================
// Applications
// =============================================================================

/// A candidate's application to a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    /// Either a job id or the populated job record.
    pub job: Option<Value>,
    pub applicant: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cover_letter: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /applications`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

/// Payload for `PUT /applications/:id/status`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusUpdate {
    pub status: String,
}

/// Per-status counters from `GET /applications/stats/my`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationStats {
    #[serde(deserialize_with = "lenient")]
    pub total: u64,
    #[serde(deserialize_with = "lenient")]
    pub pending: u64,
    #[serde(deserialize_with = "lenient")]
    pub accepted: u64,
    #[serde(deserialize_with = "lenient")]
    pub rejected: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Messaging
// =============================================================================

/// Conversation summary from `GET /messages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Conversation {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    pub participant: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub last_message: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub last_timestamp: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub unread: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single direct message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Message {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    pub sender: Option<Value>,
    pub recipient: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub content: String,
    #[serde(deserialize_with = "lenient")]
    pub read: bool,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /messages`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub recipient_id: String,
    pub content: String,
}

// =============================================================================
// Notifications
// =============================================================================

/// A user notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", default, rename_all = "camelCase")]
pub struct Notification {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message: String,
    #[serde(deserialize_with = "lenient")]
    pub read: bool,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /notifications`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub recipient_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Response of `GET /notifications/unread-count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnreadCount {
    #[serde(alias = "unreadCount", deserialize_with = "lenient")]
    pub count: u64,
}
