use std::fmt;

use reqwest::Method;
use serde_json::json;
use thiserror::Error;

use super::{ApiError, Transport};

/// Characters that satisfy the special-character password rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$&*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated,
}

/// Client-side view of the server session. Two states, no token: the
/// credential itself is a cookie the transport carries opaquely. Every
/// process start begins anonymous; nothing is restored from disk.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Anonymous → Authenticated on success. On failure the state is
    /// unchanged and the error goes back to the login screen for display.
    pub async fn login(
        &mut self,
        transport: &dyn Transport,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let body = json!({ "username": username, "password": password });
        transport.request(Method::POST, "/login", Some(body)).await?;
        self.state = SessionState::Authenticated;

        Ok(())
    }

    /// Best-effort: local state drops to anonymous whether or not the server
    /// call succeeds, and the error is still returned for display. The
    /// client lands on the login screen either way.
    pub async fn logout(&mut self, transport: &dyn Transport) -> Result<(), ApiError> {
        self.state = SessionState::Anonymous;
        transport.request(Method::POST, "/logout", None).await?;

        Ok(())
    }

    /// Password policy is enforced before anything leaves the client; while
    /// violations exist no network call is made and each failed rule is
    /// reported.
    pub async fn register(
        &self,
        transport: &dyn Transport,
        username: &str,
        password: &str,
    ) -> Result<(), RegisterError> {
        let violations = password_rules(password);
        if !violations.is_empty() {
            return Err(RegisterError::InvalidPassword(violations));
        }

        let body = json!({ "username": username, "password": password });
        transport
            .request(Method::POST, "/api/register", Some(body))
            .await?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("invalid password")]
    InvalidPassword(Vec<PasswordRule>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A password rule the candidate password failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    TooShort,
    TooLong,
    MissingCapital,
    MissingSpecial,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PasswordRule::TooShort => "Password must be at least 6 characters long.",
            PasswordRule::TooLong => "Password must be no more than 12 characters long.",
            PasswordRule::MissingCapital => "Password must contain at least one capital letter.",
            PasswordRule::MissingSpecial => {
                "Password must contain at least one special character (!@#$&*)."
            }
        };

        write!(f, "{}", text)
    }
}

/// Every rule the password violates: length 6–12 inclusive, at least one
/// uppercase letter, at least one of `!@#$&*`.
pub fn password_rules(password: &str) -> Vec<PasswordRule> {
    let mut violations = Vec::new();
    let length = password.chars().count();

    if length < 6 {
        violations.push(PasswordRule::TooShort);
    }
    if length > 12 {
        violations.push(PasswordRule::TooLong);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordRule::MissingCapital);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        violations.push(PasswordRule::MissingSpecial);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;

    #[test]
    fn six_chars_one_capital_one_special_passes() {
        assert!(password_rules("Abcde!").is_empty());
    }

    #[test]
    fn missing_capital_fails_exactly_that_rule() {
        assert_eq!(password_rules("abcde!"), vec![PasswordRule::MissingCapital]);
    }

    #[test]
    fn too_long_fails_the_max_length_rule() {
        assert_eq!(password_rules("ThisIsWayTooLong!"), vec![PasswordRule::TooLong]);
    }

    #[test]
    fn twelve_chars_is_still_within_bounds() {
        assert!(password_rules("Abcdefghij!K").is_empty());
    }

    #[tokio::test]
    async fn login_success_authenticates() {
        let transport = FakeTransport::new();
        let mut session = Session::new();

        session.login(&transport, "mika", "Abcde!").await.unwrap();

        assert!(session.is_authenticated());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/login");
    }

    #[tokio::test]
    async fn login_failure_stays_anonymous() {
        let transport = FakeTransport::new().respond(Err(ApiError::Server {
            status: 401,
            message: "Bad credentials".to_owned(),
        }));
        let mut session = Session::new();

        let err = session.login(&transport, "mika", "nope").await.unwrap_err();

        assert_eq!(err.user_message("Login failed."), "Bad credentials");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_the_call_fails() {
        let transport = FakeTransport::new();
        let mut session = Session::new();
        session.login(&transport, "mika", "Abcde!").await.unwrap();
        assert!(session.is_authenticated());

        let failing =
            FakeTransport::new().respond(Err(ApiError::Network("connection reset".to_owned())));
        let result = session.logout(&failing).await;

        assert!(result.is_err());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn register_with_bad_password_never_reaches_the_network() {
        let transport = FakeTransport::new();
        let session = Session::new();

        let err = session
            .register(&transport, "mika", "abc")
            .await
            .unwrap_err();

        match err {
            RegisterError::InvalidPassword(rules) => {
                assert!(rules.contains(&PasswordRule::TooShort));
                assert!(rules.contains(&PasswordRule::MissingCapital));
                assert!(rules.contains(&PasswordRule::MissingSpecial));
            }
            other => panic!("expected a validation failure, got {other:?}"),
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn register_posts_once_when_the_password_is_valid() {
        let transport = FakeTransport::new();
        let session = Session::new();

        session.register(&transport, "mika", "Abcde!").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/register");
    }
}
