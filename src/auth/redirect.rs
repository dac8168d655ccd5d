use url::Url;

use crate::core::types::{AuthCode, State};

use tracing::{event, Level};

#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
    #[error("not a valid URL: {0}")]
    BadUrl(#[from] url::ParseError),
    #[error("unable to decode redirect parameters: {0}")]
    Decode(#[from] serde_urlencoded::de::Error),
    #[error("broker rejected the login (code {code}): {message}")]
    Broker { code: String, message: String },
    #[error("redirect does not carry an auth_code")]
    MissingCode,
    #[error("state mismatch: expected {expected:?}, got {found:?}")]
    StateMismatch {
        expected: String,
        found: Option<String>,
    },
}

/// Query parameters the broker appends to the redirect URI.
#[derive(Debug, Default)]
#[derive(serde::Deserialize)]
struct RedirectQuery {
    s: Option<String>,
    code: Option<String>,
    auth_code: Option<AuthCode>,
    state: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct AuthCodeRedirect {
    pub auth_code: AuthCode,
    pub state: State,
}

/// Pulls the authorization code out of the URL the broker redirected to.
#[tracing::instrument(skip_all)]
pub fn parse_redirect(redirected: &str, expected: &State) -> Result<AuthCodeRedirect, RedirectError> {
    let url = Url::parse(redirected.trim())?;
    let query: RedirectQuery = serde_urlencoded::from_str(url.query().unwrap_or(""))?;

    if let Some(s) = query.s.as_deref() {
        if s != "ok" {
            event!(Level::WARN, status = s, "Broker reported a failed login");
            return Err(RedirectError::Broker {
                code: query.code.unwrap_or_default(),
                message: query.message.unwrap_or_default(),
            });
        }
    }

    let auth_code = query.auth_code.ok_or(RedirectError::MissingCode)?;

    if query.state.as_deref() != Some(expected.as_ref()) {
        return Err(RedirectError::StateMismatch {
            expected: expected.0.clone(),
            found: query.state,
        });
    }

    Ok(AuthCodeRedirect {
        auth_code,
        state: expected.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_auth_code() {
        let got = parse_redirect(
            "https://127.0.0.1:8080/cb?s=ok&code=200&auth_code=eyJ0eXAi.abc&state=sample",
            &State::default(),
        )
        .unwrap();

        assert_eq!(got.auth_code, AuthCode("eyJ0eXAi.abc".to_string()));
        assert_eq!(got.state, State::default());
    }

    #[test]
    fn serializes_code_and_state() {
        let got = parse_redirect(
            "https://127.0.0.1/cb?s=ok&code=200&auth_code=abc&state=sample",
            &State::default(),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&got).unwrap(),
            serde_json::json!({ "auth_code": "abc", "state": "sample" })
        );
    }

    #[test]
    fn broker_error_is_reported() {
        let err = parse_redirect(
            "https://127.0.0.1/cb?s=error&code=-413&message=Invalid%20app%20id&state=sample",
            &State::default(),
        )
        .unwrap_err();

        match err {
            RedirectError::Broker { code, message } => {
                assert_eq!(code, "-413");
                assert_eq!(message, "Invalid app id");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn state_must_match() {
        let err = parse_redirect(
            "https://127.0.0.1/cb?s=ok&auth_code=abc&state=forged",
            &State::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RedirectError::StateMismatch { found: Some(ref f), .. } if f == "forged"));

        let err = parse_redirect("https://127.0.0.1/cb?auth_code=abc", &State::default()).unwrap_err();
        assert!(matches!(err, RedirectError::StateMismatch { found: None, .. }));
    }

    #[test]
    fn missing_code_and_bad_url() {
        assert!(matches!(
            parse_redirect("https://127.0.0.1/cb?s=ok&state=sample", &State::default()),
            Err(RedirectError::MissingCode)
        ));
        assert!(matches!(
            parse_redirect("auth_code=abc", &State::default()),
            Err(RedirectError::BadUrl(_))
        ));
    }
}
