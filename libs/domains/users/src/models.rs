use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Account role. Fixed at creation; no update path changes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    Employee,
    Trainer,
    Manager,
    SuperUser,
}

/// Stored account record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    /// Unique, compared case-insensitively
    pub email: String,
    pub name: String,
    /// Argon2 PHC string (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub department: Option<String>,
    /// Years of experience
    pub experience: Option<i32>,
    pub created_at: DateTime<Utc>,
    /// `None` until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

/// Canonical user view returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub department: Option<String>,
    pub experience: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            avatar: user.avatar,
            department: user.department,
            experience: user.experience,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public self-registration payload.
///
/// `role` stays a string here so an unknown value is reported as
/// `invalid_role` rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[schema(example = "employee")]
    pub role: String,
    pub avatar: Option<String>,
    pub department: Option<String>,
    #[validate(range(min = 0))]
    pub experience: Option<i32>,
}

/// Payload for creating an employee, trainer or manager; the role comes
/// from the directory the request is sent to.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub avatar: Option<String>,
    pub department: Option<String>,
    #[validate(range(min = 0))]
    pub experience: Option<i32>,
}

impl CreateMember {
    pub fn into_registration(self, role: Role) -> RegisterUser {
        RegisterUser {
            email: self.email,
            name: self.name,
            password: self.password,
            role: role.to_string(),
            avatar: self.avatar,
            department: self.department,
            experience: self.experience,
        }
    }
}

/// Profile patch. Only these fields are client-settable; anything else in
/// the body is rejected. A `null` counts as "not supplied".
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub department: Option<String>,
    #[validate(range(min = 0))]
    pub experience: Option<i32>,
    pub avatar: Option<String>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.experience.is_none()
            && self.avatar.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,
    pub password: String,
}

/// Signed session token handed to a client
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub token: AccessToken,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PasswordResetConfirm {
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

impl User {
    /// New account record; the password must already be hashed.
    pub fn new(
        email: String,
        name: String,
        password_hash: String,
        role: Role,
        avatar: Option<String>,
        department: Option<String>,
        experience: Option<i32>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            name,
            password_hash,
            role,
            avatar,
            department,
            experience,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Apply the supplied fields and stamp `updated_at`.
    pub fn apply_profile(&mut self, patch: UpdateProfile) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(department) = patch.department {
            self.department = Some(department);
        }
        if let Some(experience) = patch.experience {
            self.experience = Some(experience);
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        self.updated_at = Some(Utc::now());
    }
}
