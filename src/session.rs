// Session store: mock sign-in/sign-up with the signed-in user mirrored into storage
//
// There is no credential backend. Login succeeds for any registered email regardless of the
// password; failures are reported with one generic message whatever the cause.

use crate::config::SessionConfig;
use crate::form::FieldErrors;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Failed to create account. Please try again.";

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_NAME: &str = "Demo User";

#[derive(Error, Debug)]
pub enum SessionStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("{}", SIGNUP_FAILED_MESSAGE)]
    SignupFailed,

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Session storage error: {0}")]
    Storage(#[from] SessionStorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct SignupForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Please confirm your password"))]
    pub confirm_password: String,
}

impl SignupForm {
    fn check(&self) -> Result<(), FieldErrors> {
        // Required messages take precedence over length messages
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        if let Err(e) = self.validate() {
            errors.merge(FieldErrors::from(e));
        }
        if !self.confirm_password.is_empty() && self.confirm_password != self.password {
            errors.add("confirm_password", "Passwords must match");
        }
        errors.into_result()
    }
}

// Where the signed-in user survives between runs (the browser-storage stand-in)
pub trait SessionStorage: Send + Sync + 'static {
    fn load(&self) -> Result<Option<User>, SessionStorageError>;

    fn save(&self, user: &User) -> Result<(), SessionStorageError>;

    fn clear(&self) -> Result<(), SessionStorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    user: Mutex<Option<User>>,
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<User>, SessionStorageError> {
        Ok(self.user.lock().clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionStorageError> {
        *self.user.lock() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStorageError> {
        self.user.lock().take();
        Ok(())
    }
}

// Stores the user as a single JSON document
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<User>, SessionStorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, user: &User) -> Result<(), SessionStorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(user)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<User>>,
    accounts: DashMap<String, User>,
    config: SessionConfig,
}

impl SessionStore {
    // Restores a previously saved user from storage, if any
    pub fn new(config: SessionConfig, storage: Box<dyn SessionStorage>) -> Result<Self, AuthError> {
        let restored = storage.load()?;

        let accounts = DashMap::new();
        accounts.insert(
            DEMO_EMAIL.to_string(),
            User {
                id: "user-demo".to_string(),
                name: DEMO_NAME.to_string(),
                email: DEMO_EMAIL.to_string(),
            },
        );
        if let Some(user) = &restored {
            info!("Restored session for {}", user.email);
            accounts
                .entry(normalize_email(&user.email))
                .or_insert_with(|| user.clone());
        }

        Ok(Self {
            storage,
            current: RwLock::new(restored),
            accounts,
            config,
        })
    }

    // Picks the storage backend from config: a JSON file when a path is set, memory otherwise
    pub fn from_config(config: SessionConfig) -> Result<Self, AuthError> {
        let storage: Box<dyn SessionStorage> = match &config.storage_path {
            Some(path) => Box::new(JsonFileStorage::new(path.clone())),
            None => Box::new(MemoryStorage::default()),
        };
        Self::new(config, storage)
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    // Guard for views that need a signed-in user
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.current_user().ok_or(AuthError::Unauthenticated)
    }

    async fn simulate_round_trip(&self) {
        let delay = Duration::from_millis(self.config.auth_delay_ms);
        if !delay.is_zero() {
            debug!("Simulating auth round trip of {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let form = LoginForm {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        form.validate()
            .map_err(|e| AuthError::Validation(FieldErrors::from(e)))?;

        self.simulate_round_trip().await;

        let user = match self.accounts.get(&normalize_email(&form.email)) {
            Some(account) => account.value().clone(),
            None => {
                warn!("Login rejected for {}", form.email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        self.start_session(&user)?;
        info!("User {} signed in", user.email);
        Ok(user)
    }

    pub async fn signup(&self, form: SignupForm) -> Result<User, AuthError> {
        let form = SignupForm {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            ..form
        };
        form.check().map_err(AuthError::Validation)?;

        self.simulate_round_trip().await;

        let key = normalize_email(&form.email);
        let user = User {
            id: format!("user-{}", rand::random::<u32>()),
            name: form.name.clone(),
            email: form.email.clone(),
        };

        match self.accounts.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                warn!("Signup rejected, {} is already registered", form.email);
                return Err(AuthError::SignupFailed);
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(user.clone());
            }
        }

        self.start_session(&user)?;
        info!("User {} signed up", user.email);
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        let previous = self.current.write().take();
        self.storage.clear()?;
        if let Some(user) = previous {
            info!("User {} signed out", user.email);
        }
        Ok(())
    }

    fn start_session(&self, user: &User) -> Result<(), AuthError> {
        self.storage.save(user)?;
        *self.current.write() = Some(user.clone());
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
