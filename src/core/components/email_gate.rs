//! Email gate — collects the session email that scopes every other request.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `local@domain.tld`: exactly one `@`, a dot inside the domain, every part
/// non-empty, no whitespace anywhere.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

/// Whether `input` has the shape of an email address.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    pub email: String,
    pub email_confirmed: bool,
}

#[derive(Debug, Default)]
pub struct EmailGate {
    session: UserSession,
    error: Option<GateError>,
}

impl EmailGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `raw_input` and, if it passes, confirm the session.
    ///
    /// A failed submission records the error and leaves the session as it
    /// was. Returns the confirmed email on success.
    pub fn submit(&mut self, raw_input: &str) -> Result<&str, GateError> {
        let email = raw_input.trim();
        if !is_valid_email(email) {
            log::debug!("Rejected email submission");
            self.error = Some(GateError::InvalidEmail);
            return Err(GateError::InvalidEmail);
        }

        self.session = UserSession {
            email: email.to_string(),
            email_confirmed: true,
        };
        self.error = None;
        log::info!("Session email confirmed");
        Ok(&self.session.email)
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn is_confirmed(&self) -> bool {
        self.session.email_confirmed
    }

    /// The confirmed email, if any.
    pub fn email(&self) -> Option<&str> {
        self.is_confirmed().then_some(self.session.email.as_str())
    }

    pub fn error(&self) -> Option<&GateError> {
        self.error.as_ref()
    }
}
