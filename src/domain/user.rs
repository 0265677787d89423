//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::credential::Credential;

/// User domain entity.
///
/// Carries the parsed stored credential, so it is never serialized directly.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub document: String,
    pub issue_place: String,
    pub full_name: String,
    pub hire_date: Option<NaiveDate>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    pub appointment: String,
    pub username: String,
    pub credential: Credential,
    pub email: Option<String>,
}

impl User {
    /// Name shown to the user and in reset emails.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// Non-empty email address, if any.
    pub fn email_address(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// Every user column except the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub document: String,
    pub issue_place: String,
    pub full_name: String,
    pub hire_date: Option<NaiveDate>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    pub appointment: String,
    pub username: String,
    pub email: Option<String>,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default)]
    #[schema(example = "1020304050")]
    pub document: String,
    #[serde(default)]
    pub issue_place: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    #[schema(example = "Ana María Gómez")]
    pub full_name: String,
    pub hire_date: Option<NaiveDate>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    #[serde(default)]
    pub appointment: String,
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "agomez")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "Secure#2024")]
    pub password: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "agomez@example.com")]
    pub email: Option<String>,
}

impl CreateUser {
    /// Split into the stored profile and the plain-text password.
    pub fn into_parts(self) -> (UserProfile, String) {
        (
            UserProfile {
                document: self.document,
                issue_place: self.issue_place,
                full_name: self.full_name,
                hire_date: self.hire_date,
                position_id: self.position_id,
                unit_id: self.unit_id,
                appointment: self.appointment,
                username: self.username,
                email: normalize_email(self.email),
            },
            self.password,
        )
    }
}

/// User replacement payload. The password is only changed when present.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub issue_place: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub hire_date: Option<NaiveDate>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    #[serde(default)]
    pub appointment: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl UpdateUser {
    pub fn into_parts(self) -> (UserProfile, Option<String>) {
        (
            UserProfile {
                document: self.document,
                issue_place: self.issue_place,
                full_name: self.full_name,
                hire_date: self.hire_date,
                position_id: self.position_id,
                unit_id: self.unit_id,
                appointment: self.appointment,
                username: self.username,
                email: normalize_email(self.email),
            },
            self.password.filter(|p| !p.is_empty()),
        )
    }
}

fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub document: String,
    pub issue_place: String,
    #[schema(example = "Ana María Gómez")]
    pub full_name: String,
    pub hire_date: Option<NaiveDate>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    pub appointment: String,
    #[schema(example = "agomez")]
    pub username: String,
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            document: user.document,
            issue_place: user.issue_place,
            full_name: user.full_name,
            hire_date: user.hire_date,
            position_id: user.position_id,
            unit_id: user.unit_id,
            appointment: user.appointment,
            username: user.username,
            email: user.email,
        }
    }
}

/// User listing row joined with its position and unit names.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: i32,
    pub document: String,
    pub issue_place: String,
    pub full_name: String,
    pub hire_date: Option<NaiveDate>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    pub appointment: String,
    pub username: String,
    pub email: Option<String>,
    /// Position name
    #[schema(example = "Profesional Universitario")]
    pub position: Option<String>,
    /// Unit name
    #[schema(example = "Secretaría General")]
    pub unit: Option<String>,
}

impl UserListItem {
    pub fn new(user: User, position: Option<String>, unit: Option<String>) -> Self {
        let user = UserResponse::from(user);
        Self {
            id: user.id,
            document: user.document,
            issue_place: user.issue_place,
            full_name: user.full_name,
            hire_date: user.hire_date,
            position_id: user.position_id,
            unit_id: user.unit_id,
            appointment: user.appointment,
            username: user.username,
            email: user.email,
            position,
            unit,
        }
    }
}
