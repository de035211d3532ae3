use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employee classification. Display-only — roles gate no permissions in
/// this system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Directory record as stored in MongoDB. `_id` is assigned by the store at
/// insert and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Request body for create and update. `role` arrives as a free-form string
/// and is validated against the enum before any store mutation; omitting it
/// on create means `employee`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Wire shape of a directory record: the ObjectId flattened to a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn role_defaults_to_employee() {
        assert_eq!(Role::default(), Role::Employee);
    }

    #[test]
    fn role_rejects_values_outside_the_set() {
        let err = Role::from_str("superuser").unwrap_err();
        assert!(err.contains("superuser"));
    }

    #[test]
    fn payload_fields_default_when_missing() {
        let payload: UserPayload = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(payload.name, "Ann");
        assert_eq!(payload.email, "");
        assert_eq!(payload.role, None);
    }

    #[test]
    fn record_flattens_object_id_to_hex() {
        let oid = ObjectId::new();
        let user = User {
            id: Some(oid),
            name: "Ann".into(),
            email: "a@x.com".into(),
            role: Role::Employee,
        };
        let record = UserRecord::from(user);
        assert_eq!(record.id, oid.to_hex());
        assert_eq!(record.role, Role::Employee);
    }
}
