//! Login, signup and the stored session.
//!
//! The engine never reads credentials from ambient state: commands load an
//! [`AuthContext`] from the [`AuthStore`] and hand it to
//! [`ApiClient::new`](super::ApiClient::new).

use super::{ApiClient, ApiError, Transport};
use crate::libs::attendance::RecordId;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use anyhow::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::fs;
use tracing::debug;

pub const TOKEN_FILE_NAME: &str = ".auth_token";
pub const USER_FILE_NAME: &str = "user.json";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub name: String,
}

/// Bearer credential plus the identity it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub token: String,
    pub user: Option<User>,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(|user| user.name.as_str()).unwrap_or("")
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Registration input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ApiError> {
        let fields = [&self.name, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ApiError::InvalidInput(Message::SignupFieldsRequired.to_string()));
        }
        if !self.email.contains('@') {
            return Err(ApiError::InvalidInput(Message::SignupInvalidEmail.to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::InvalidInput(
                Message::SignupPasswordTooShort(MIN_PASSWORD_LEN).to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(ApiError::InvalidInput(Message::SignupPasswordMismatch.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn login(&self, login: &str, password: &str) -> Result<AuthContext, ApiError> {
        let body = json!({ "login": login, "password": password });
        self.authenticate("/login", body, Message::LoginFailed).await
    }

    /// Validates the form locally, then registers.
    pub async fn signup(&self, form: &SignupForm) -> Result<AuthContext, ApiError> {
        form.validate()?;
        let body = json!({
            "name": form.name.trim(),
            "email": form.email.trim(),
            "password": form.password,
        });
        self.authenticate("/auth/register", body, Message::RegistrationFailed).await
    }

    async fn authenticate(&self, path: &str, body: Value, fallback: Message) -> Result<AuthContext, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        let status = response.status.as_u16();
        let rejected = |body: &Value| ApiError::ServerRejected {
            status,
            message: body
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        };

        if !response.status.is_success() {
            return Err(rejected(&response.body));
        }
        let parsed: AuthResponse = super::client::decode(response.body.clone())?;
        match parsed.token.filter(|token| !token.is_empty()) {
            Some(token) => {
                debug!(path, "authenticated");
                Ok(AuthContext {
                    token,
                    user: parsed.user,
                })
            }
            None => Err(rejected(&response.body)),
        }
    }
}

/// On-disk session: the token encrypted in `.auth_token`, the profile as
/// plain JSON in `user.json`.
#[derive(Debug, Clone)]
pub struct AuthStore {
    storage: DataStorage,
}

impl AuthStore {
    pub fn new(storage: DataStorage) -> Self {
        Self { storage }
    }

    pub fn save(&self, auth: &AuthContext) -> Result<()> {
        Secret::new(&self.storage, TOKEN_FILE_NAME)?.store(&auth.token)?;
        let user_path = self.storage.get_path(USER_FILE_NAME)?;
        match &auth.user {
            Some(user) => fs::write(user_path, serde_json::to_string_pretty(user)?)?,
            None if user_path.exists() => fs::remove_file(user_path)?,
            None => {}
        }
        Ok(())
    }

    /// Returns the stored session, or `None` when nobody is logged in.
    pub fn load(&self) -> Result<Option<AuthContext>> {
        let Some(token) = Secret::new(&self.storage, TOKEN_FILE_NAME)?.load()? else {
            return Ok(None);
        };
        let user_path = self.storage.get_path(USER_FILE_NAME)?;
        let user = if user_path.exists() {
            Some(serde_json::from_str(&fs::read_to_string(user_path)?)?)
        } else {
            None
        };
        Ok(Some(AuthContext { token, user }))
    }

    /// Deletes both files. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<()> {
        Secret::new(&self.storage, TOKEN_FILE_NAME)?.delete()?;
        let user_path = self.storage.get_path(USER_FILE_NAME)?;
        if user_path.exists() {
            fs::remove_file(user_path)?;
        }
        Ok(())
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new(DataStorage::new())
    }
}
