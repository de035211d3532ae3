// ==================== USER STORE ====================
// CRUD over the `users` collection. Validation runs explicitly before every
// mutation; the unique email index is only a backstop.

use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::{Role, User, UserPayload},
    utils::error::UserError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use std::str::FromStr;

/// Payload that passed validation: required fields present, role inside the
/// enumerated set (defaulted to `employee` when omitted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

pub fn validate_payload(payload: &UserPayload) -> Result<ValidatedUser, UserError> {
    if payload.name.is_empty() {
        return Err(UserError::Invalid("field 'name' is required".into()));
    }
    if payload.email.is_empty() {
        return Err(UserError::Invalid("field 'email' is required".into()));
    }
    let role = match payload.role.as_deref() {
        None => Role::default(),
        Some(raw) => Role::from_str(raw).map_err(UserError::Invalid)?,
    };
    Ok(ValidatedUser {
        name: payload.name.clone(),
        email: payload.email.clone(),
        role,
    })
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, UserError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| UserError::Unavailable(format!("failed to fetch users: {}", e)))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        let user = result
            .map_err(|e| UserError::Unavailable(format!("failed to read user record: {}", e)))?;
        users.push(user);
    }

    Ok(users)
}

pub async fn create_user(db: &MongoDB, payload: UserPayload) -> Result<User, UserError> {
    let validated = validate_payload(&payload)?;

    if email_taken(db, &validated.email, None).await? {
        return Err(UserError::Duplicate(validated.email));
    }

    let mut user = User {
        id: None,
        name: validated.name,
        email: validated.email,
        role: validated.role,
    };

    let collection = db.collection::<User>(USERS_COLLECTION);
    let result = collection
        .insert_one(&user)
        .await
        .map_err(|e| map_write_error(e, &user.email))?;

    user.id = result.inserted_id.as_object_id();

    log::info!("✅ User created: {} <{}>", user.name, user.email);

    Ok(user)
}

/// Replaces name, email and role in place. The id never changes.
pub async fn update_user(db: &MongoDB, id: &str, payload: UserPayload) -> Result<User, UserError> {
    let validated = validate_payload(&payload)?;
    let oid = parse_object_id(id)?;

    if email_taken(db, &validated.email, Some(&oid)).await? {
        return Err(UserError::Duplicate(validated.email));
    }

    let collection = db.collection::<User>(USERS_COLLECTION);
    let updated = collection
        .find_one_and_update(
            doc! { "_id": oid },
            doc! { "$set": {
                "name": validated.name.as_str(),
                "email": validated.email.as_str(),
                "role": validated.role.as_str(),
            }},
        )
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| map_write_error(e, &validated.email))?
        .ok_or_else(|| UserError::NotFound(id.to_string()))?;

    log::info!("✅ User updated: {}", id);

    Ok(updated)
}

pub async fn delete_user(db: &MongoDB, id: &str) -> Result<(), UserError> {
    let oid = parse_object_id(id)?;

    let collection = db.collection::<User>(USERS_COLLECTION);
    let result = collection
        .delete_one(doc! { "_id": oid })
        .await
        .map_err(|e| UserError::Unavailable(format!("database error: {}", e)))?;

    if result.deleted_count == 0 {
        return Err(UserError::NotFound(id.to_string()));
    }

    log::info!("🗑️  User deleted: {}", id);

    Ok(())
}

/// True when another record already holds `email`. `exclude` skips the
/// record being updated so a user can keep their own address.
async fn email_taken(
    db: &MongoDB,
    email: &str,
    exclude: Option<&ObjectId>,
) -> Result<bool, UserError> {
    let collection = db.collection::<User>(USERS_COLLECTION);

    let filter = match exclude {
        Some(oid) => doc! { "email": email, "_id": { "$ne": oid } },
        None => doc! { "email": email },
    };

    let existing = collection
        .find_one(filter)
        .await
        .map_err(|e| UserError::Unavailable(format!("database error: {}", e)))?;

    Ok(existing.is_some())
}

// An id that does not parse as an ObjectId cannot name any stored record.
fn parse_object_id(id: &str) -> Result<ObjectId, UserError> {
    ObjectId::parse_str(id).map_err(|_| UserError::NotFound(id.to_string()))
}

fn map_write_error(e: mongodb::error::Error, email: &str) -> UserError {
    use mongodb::error::{ErrorKind, WriteFailure};

    // The unique index surfaces racing duplicates as E11000.
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *e.kind {
        if write_error.code == 11000 {
            return UserError::Duplicate(email.to_string());
        }
    }

    UserError::Unavailable(format!("database error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, role: Option<&str>) -> UserPayload {
        UserPayload {
            name: name.into(),
            email: email.into(),
            role: role.map(String::from),
        }
    }

    #[test]
    fn missing_name_is_invalid() {
        let err = validate_payload(&payload("", "a@x.com", None)).unwrap_err();
        assert_eq!(err, UserError::Invalid("field 'name' is required".into()));
    }

    #[test]
    fn missing_email_is_invalid() {
        let err = validate_payload(&payload("Ann", "", Some("admin"))).unwrap_err();
        assert_eq!(err, UserError::Invalid("field 'email' is required".into()));
    }

    #[test]
    fn omitted_role_defaults_to_employee() {
        let validated = validate_payload(&payload("Ann", "a@x.com", None)).unwrap();
        assert_eq!(validated.role, Role::Employee);
    }

    #[test]
    fn role_outside_the_set_is_invalid() {
        let err = validate_payload(&payload("Ann", "a@x.com", Some("superuser"))).unwrap_err();
        assert_eq!(err, UserError::Invalid("unknown role 'superuser'".into()));
    }

    #[test]
    fn valid_payload_passes_through() {
        let validated = validate_payload(&payload("Bo", "b@x.com", Some("manager"))).unwrap();
        assert_eq!(validated.name, "Bo");
        assert_eq!(validated.email, "b@x.com");
        assert_eq!(validated.role, Role::Manager);
    }

    #[test]
    fn malformed_id_maps_to_not_found() {
        assert_eq!(
            parse_object_id("not-an-oid").unwrap_err(),
            UserError::NotFound("not-an-oid".into())
        );
    }
}
