// File: ./src/auth.rs
//! Login and registration flows shared by the TUI and the command line.
use crate::client::{ApiClient, LoginRequest, RegisterRequest};
use crate::session::SessionStore;
use rust_i18n::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Blocking message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: t!("alert_success").to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: t!("alert_error").to_string(),
            message: message.into(),
        }
    }
}

fn missing_fields() -> Alert {
    Alert::error(t!("fill_all_fields"))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, Alert> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(missing_fields());
        }
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<RegisterRequest, Alert> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty()
        {
            return Err(missing_fields());
        }
        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Validates, logs in and persists the token.
///
/// `Ok` carries the success alert (the caller then replaces the screen with
/// Home); `Err` carries the alert to show while staying on Login. An invalid
/// form never reaches the network.
pub async fn login(
    client: &ApiClient,
    session: &dyn SessionStore,
    form: &LoginForm,
) -> Result<Alert, Alert> {
    let request = form.validate()?;

    let response = client.login(&request).await.map_err(|e| {
        log::warn!("Login failed for {}: {:?}", request.email, e);
        Alert::error(
            e.server_message()
                .map(str::to_string)
                .unwrap_or_else(|| t!("login_failed").to_string()),
        )
    })?;

    session.save(&response.token).map_err(|e| {
        log::error!("Could not persist session token: {:#}", e);
        Alert::error(t!("session_save_failed"))
    })?;
    log::info!("Logged in as {}", request.email);

    Ok(Alert::success(
        response
            .message
            .unwrap_or_else(|| t!("login_success").to_string()),
    ))
}

/// Validates and registers a new account. On `Ok` the caller goes to Login.
pub async fn register(client: &ApiClient, form: &RegisterForm) -> Result<Alert, Alert> {
    let request = form.validate()?;

    let response = client.register(&request).await.map_err(|e| {
        log::warn!("Registration failed for {}: {:?}", request.email, e);
        Alert::error(
            e.server_message()
                .map(str::to_string)
                .unwrap_or_else(|| t!("register_failed").to_string()),
        )
    })?;
    log::info!("Registered {}", request.email);

    Ok(Alert::success(
        response
            .message
            .unwrap_or_else(|| t!("register_success").to_string()),
    ))
}

/// Forgets the stored token.
pub fn logout(session: &dyn SessionStore) -> anyhow::Result<()> {
    session.clear()?;
    log::info!("Logged out");
    Ok(())
}
