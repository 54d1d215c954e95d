use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Application role. Serialised as the lowercase role strings the UI
/// stores client-side.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "seller")]
    Seller,
}

/// Application user. Only the argon2 hash of the password is stored and
/// the hash never appears in API responses.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert variant. Carries the plaintext password exactly once, on the way
/// in; the storage layer only ever sees the computed hash.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 64, message = "username must be 3-64 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: UserRole,
}

/// The shape handed to storage after hashing.
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl UserCredentials {
    pub fn into_model(self, id: i32, now: DateTime<Utc>) -> Model {
        Model {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    /// New plaintext password; hashed by the handler before storage
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

/// Patch shape after password hashing, applied by the storage layer.
#[derive(Clone, Debug, Default)]
pub struct UserRecordPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

impl UserRecordPatch {
    pub fn apply(self, user: &mut Model) {
        if let Some(v) = self.username {
            user.username = v;
        }
        if let Some(v) = self.password_hash {
            user.password_hash = v;
        }
        if let Some(v) = self.role {
            user.role = v;
        }
    }
}
