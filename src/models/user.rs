use jiff::{SignedDuration, Timestamp};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Collection holding user documents.
pub const USER_COLLECTION: &str = "users";

/// User document as stored in the `users` collection.
///
/// `password_hash` and `verification_code` never leave the service; outbound
/// payloads go through `UserView`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub verification_code: String,
    #[serde(with = "bson_timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "bson_timestamp")]
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// Refreshes `updated_at`, always moving it strictly forward.
    pub fn touch(&mut self) -> Timestamp {
        self.updated_at = next_update_time(self.updated_at);
        self.updated_at
    }
}

/// Fields of a user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub image: Option<String>,
    pub verification_code: String,
}

impl NewUser {
    /// Assigns the identifier and both timestamps ahead of insertion.
    pub fn before_create(self) -> UserRecord {
        let now = now();
        UserRecord {
            id: ObjectId::new(),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            image: self.image,
            verified: false,
            verification_code: self.verification_code,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a stored user. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub updated_at: Timestamp,
}

impl UserChanges {
    pub fn apply_to(&self, record: &mut UserRecord) {
        if let Some(first_name) = &self.first_name {
            record.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            record.last_name = last_name.clone();
        }
        if let Some(image) = &self.image {
            record.image = Some(image.clone());
        }
        record.updated_at = self.updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.image.is_none()
    }
}

/// Current time truncated to the millisecond precision of BSON dates.
pub fn now() -> Timestamp {
    truncate_to_millis(Timestamp::now())
}

/// Timestamp for the next mutation of a document last updated at `previous`.
pub fn next_update_time(previous: Timestamp) -> Timestamp {
    let now = now();
    if now > previous {
        now
    } else {
        previous
            .checked_add(SignedDuration::from_millis(1))
            .unwrap_or(now)
    }
}

fn truncate_to_millis(ts: Timestamp) -> Timestamp {
    Timestamp::from_millisecond(ts.as_millisecond()).unwrap_or(ts)
}

/// Stores `jiff::Timestamp` as a native BSON date.
pub(crate) mod bson_timestamp {
    use jiff::Timestamp;
    use mongodb::bson::DateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        DateTime::from_millis(ts.as_millisecond()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let dt = DateTime::deserialize(deserializer)?;
        Timestamp::from_millisecond(dt.timestamp_millis()).map_err(serde::de::Error::custom)
    }

    pub fn to_bson(ts: Timestamp) -> DateTime {
        DateTime::from_millis(ts.as_millisecond())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, Bson};

    fn sample() -> UserRecord {
        NewUser {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            image: None,
            verification_code: "123456".to_string(),
        }
        .before_create()
    }

    #[test]
    fn test_before_create_sets_timestamps() {
        let record = sample();
        assert_eq!(record.created_at, record.updated_at);
        assert!(!record.verified);
        assert_eq!(record.verification_code, "123456");
    }

    #[test]
    fn test_touch_moves_strictly_forward() {
        let mut record = sample();
        let first = record.updated_at;
        let second = record.touch();
        let third = record.touch();
        assert!(second > first);
        assert!(third > second);
        assert_eq!(record.created_at, first);
    }

    #[test]
    fn test_touch_from_future_timestamp() {
        let mut record = sample();
        let future = now().checked_add(SignedDuration::from_hours(1)).unwrap();
        record.updated_at = future;
        assert!(record.touch() > future);
    }

    #[test]
    fn test_changes_apply_only_supplied_fields() {
        let mut record = sample();
        let changes = UserChanges {
            first_name: Some("Janet".to_string()),
            last_name: None,
            image: None,
            updated_at: next_update_time(record.updated_at),
        };
        changes.apply_to(&mut record);
        assert_eq!(record.first_name, "Janet");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.image, None);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_bson_layout() {
        let record = sample();
        let doc = bson::to_document(&record).unwrap();
        assert!(matches!(doc.get("_id"), Some(Bson::ObjectId(_))));
        assert!(matches!(doc.get("created_at"), Some(Bson::DateTime(_))));
        assert!(doc.contains_key("password"));
        assert!(!doc.contains_key("password_hash"));

        let decoded: UserRecord = bson::from_document(doc).unwrap();
        assert_eq!(decoded, record);
    }
}
