//! Request and response bodies of the session API.

use babyshoe_core::{Email, ResetToken};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

#[allow(clippy::ref_option_ref, clippy::trivially_copy_pass_by_ref)]
fn expose<S: Serializer>(secret: &&SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a Email,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

#[derive(Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a Email,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

#[derive(Serialize)]
pub(super) struct ForgotPasswordRequest<'a> {
    pub email: &'a Email,
}

#[derive(Serialize)]
pub(super) struct ResetPasswordRequest<'a> {
    pub token: &'a ResetToken,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_exposes_password_only_on_the_wire() {
        let email = Email::parse("ada@example.com").unwrap();
        let password = SecretString::from("hunter22");
        let body = serde_json::to_value(LoginRequest {
            email: &email,
            password: &password,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"email": "ada@example.com", "password": "hunter22"})
        );
    }

    #[test]
    fn test_reset_request_shape() {
        let token = ResetToken::new("tok").unwrap();
        let password = SecretString::from("Abc12345");
        let body = serde_json::to_value(ResetPasswordRequest {
            token: &token,
            password: &password,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"token": "tok", "password": "Abc12345"})
        );
    }

    #[test]
    fn test_error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert!(body.error.is_none());
    }
}
