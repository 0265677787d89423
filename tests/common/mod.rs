//! Shared test fixtures: an in-memory persistence layer and a recording
//! notifier.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use edl_backend::config::Config;
use edl_backend::domain::{
    Credential, Password, Position, PositionInput, ResetClaim, ResetToken, Unit, UnitInput, User,
    UserListItem, UserProfile,
};
use edl_backend::errors::{AppError, AppResult};
use edl_backend::infra::{
    Notifier, NotifierResult, PositionRepository, ResetTokenRepository, UnitOfWork,
    UnitRepository, UserRepository,
};

pub const JWT_SECRET: &str = "integration-test-secret-with-32-chars-min";
pub const FRONTEND_URL: &str = "https://edl.example.com";

/// Build a config through the same lookup path as the environment loader.
pub fn config(environment: &str) -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", "sqlite::memory:"),
        ("JWT_SECRET", JWT_SECRET),
        ("APP_ENV", environment),
        ("FRONTEND_URL", FRONTEND_URL),
    ]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    positions: Vec<Position>,
    units: Vec<Unit>,
    tokens: Vec<ResetToken>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for every store, shared behind one lock.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with the given raw stored credential.
    pub fn add_user(&self, username: &str, stored_password: &str, email: Option<&str>) -> i32 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.users.push(User {
            id,
            document: format!("DOC-{}", id),
            issue_place: "Bogotá".into(),
            full_name: format!("{} Full Name", username),
            hire_date: None,
            position_id: None,
            unit_id: None,
            appointment: String::new(),
            username: username.into(),
            credential: Credential::parse(stored_password.to_string()),
            email: email.map(Into::into),
        });
        id
    }

    /// Raw stored credential for `username`, as it would sit in the column.
    pub fn stored_password(&self, username: &str) -> String {
        let state = self.state.lock().unwrap();
        let user = state
            .users
            .iter()
            .find(|u| u.username == username)
            .expect("user exists");
        user.credential.clone().into_stored()
    }

    pub fn tokens_for(&self, user_id: i32) -> Vec<ResetToken> {
        let state = self.state.lock().unwrap();
        state
            .tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Move every token of `user_id` past its expiry.
    pub fn expire_tokens(&self, user_id: i32) {
        let mut state = self.state.lock().unwrap();
        let past = Utc::now() - Duration::seconds(1);
        for token in state.tokens.iter_mut().filter(|t| t.user_id == user_id) {
            token.expires_at = past;
        }
    }
}

impl UnitOfWork for InMemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.clone())
    }

    fn positions(&self) -> Arc<dyn PositionRepository> {
        Arc::new(self.clone())
    }

    fn units(&self) -> Arc<dyn UnitRepository> {
        Arc::new(self.clone())
    }

    fn reset_tokens(&self) -> Arc<dyn ResetTokenRepository> {
        Arc::new(self.clone())
    }
}

fn apply_profile(user: &mut User, profile: UserProfile) {
    user.document = profile.document;
    user.issue_place = profile.issue_place;
    user.full_name = profile.full_name;
    user.hire_date = profile.hire_date;
    user.position_id = profile.position_id;
    user.unit_id = profile.unit_id;
    user.appointment = profile.appointment;
    user.username = profile.username;
    user.email = profile.email;
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserListItem>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .map(|u| {
                let position = state
                    .positions
                    .iter()
                    .find(|p| Some(p.id) == u.position_id)
                    .map(|p| p.name.clone());
                let unit = state
                    .units
                    .iter()
                    .find(|x| Some(x.id) == u.unit_id)
                    .map(|x| x.name.clone());
                UserListItem::new(u.clone(), position, unit)
            })
            .collect())
    }

    async fn create(&self, profile: UserProfile, password: Password) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == profile.username) {
            return Err(AppError::conflict("Username"));
        }
        let id = state.next_id();
        let mut user = User {
            id,
            document: String::new(),
            issue_place: String::new(),
            full_name: String::new(),
            hire_date: None,
            position_id: None,
            unit_id: None,
            appointment: String::new(),
            username: String::new(),
            credential: password.into(),
            email: None,
        };
        apply_profile(&mut user, profile);
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        profile: UserProfile,
        password: Option<Password>,
    ) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        apply_profile(user, profile);
        if let Some(password) = password {
            user.credential = password.into();
        }
        Ok(user.clone())
    }

    async fn set_password(&self, id: i32, password: Password) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.credential = password.into();
        Ok(())
    }

    async fn migrate_password(
        &self,
        id: i32,
        expected: String,
        password: Password,
    ) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state
            .users
            .iter_mut()
            .find(|u| u.id == id && u.credential.as_stored() == expected)
        {
            Some(user) => {
                user.credential = password.into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Err(AppError::NotFound);
        }
        state.tokens.retain(|t| t.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl PositionRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Position>> {
        Ok(self.state.lock().unwrap().positions.clone())
    }

    async fn create(&self, input: PositionInput) -> AppResult<Position> {
        let mut state = self.state.lock().unwrap();
        let position = Position {
            id: state.next_id(),
            status: input.status().to_string(),
            name: input.name,
            title: input.title,
            grade: input.grade,
            competency: input.competency,
            executive_level: input.executive_level,
        };
        state.positions.push(position.clone());
        Ok(position)
    }

    async fn update(&self, id: i32, input: PositionInput) -> AppResult<Position> {
        let mut state = self.state.lock().unwrap();
        let position = state
            .positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        position.status = input.status().to_string();
        position.name = input.name;
        position.title = input.title;
        position.grade = input.grade;
        position.competency = input.competency;
        position.executive_level = input.executive_level;
        Ok(position.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.positions.len();
        state.positions.retain(|p| p.id != id);
        if state.positions.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UnitRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Unit>> {
        Ok(self.state.lock().unwrap().units.clone())
    }

    async fn create(&self, input: UnitInput) -> AppResult<Unit> {
        let mut state = self.state.lock().unwrap();
        let unit = Unit {
            id: state.next_id(),
            code: input.code,
            name: input.name,
        };
        state.units.push(unit.clone());
        Ok(unit)
    }

    async fn update(&self, id: i32, input: UnitInput) -> AppResult<Unit> {
        let mut state = self.state.lock().unwrap();
        let unit = state
            .units
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        unit.code = input.code;
        unit.name = input.name;
        Ok(unit.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.units.len();
        state.units.retain(|u| u.id != id);
        if state.units.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ResetTokenRepository for InMemoryStore {
    async fn replace_for_user(
        &self,
        user_id: i32,
        token_digest: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<ResetToken> {
        let mut state = self.state.lock().unwrap();
        state.tokens.retain(|t| t.user_id != user_id);
        let token = ResetToken {
            id: state.next_id(),
            user_id,
            token_digest,
            used: false,
            created_at,
            expires_at,
        };
        state.tokens.push(token.clone());
        Ok(token)
    }

    async fn find_live_by_digest(
        &self,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ResetToken>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tokens
            .iter()
            .find(|t| t.token_digest == token_digest && t.is_live(now))
            .cloned())
    }

    async fn redeem(
        &self,
        claim: ResetClaim,
        expected: String,
        password: Password,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let State { tokens, users, .. } = &mut *state;

        let Some(token) = tokens
            .iter_mut()
            .find(|t| t.id == claim.token_id && t.user_id == claim.user_id && t.is_live(now))
        else {
            return Ok(false);
        };
        let Some(user) = users
            .iter_mut()
            .find(|u| u.id == claim.user_id && u.credential.as_stored() == expected)
        else {
            return Ok(false);
        };

        // Nothing is mutated until both rows qualify, like the rolled-back transaction
        token.used = true;
        user.credential = password.into();
        Ok(true)
    }
}

/// A sent (or attempted) reset email.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub display_name: String,
    pub reset_link: String,
}

/// Notifier that records every call and answers with a fixed result.
pub struct RecordingNotifier {
    result: NotifierResult,
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingNotifier {
    pub fn new(result: NotifierResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Token query parameter of the last reset link.
    pub fn last_token(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let link = &sent.last().expect("an email was sent").reset_link;
        link.split("token=").nth(1).expect("link has a token").to_string()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn is_configured(&self) -> bool {
        !matches!(self.result, NotifierResult::NotConfigured)
    }

    async fn send_password_reset(
        &self,
        to: &str,
        display_name: &str,
        reset_link: &str,
    ) -> NotifierResult {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.into(),
            display_name: display_name.into(),
            reset_link: reset_link.into(),
        });
        self.result.clone()
    }
}
