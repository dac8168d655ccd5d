use crate::core::models::AuthRequest;
use crate::core::types::{ClientId, GrantType, RedirectUri, ResponseType, SecretKey, State};

pub mod authorization;
pub mod error;
pub mod redirect;

pub use authorization::*;
pub use error::Error;

/// Constructor arguments for a broker session, in the order the broker SDK
/// takes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub client_id: ClientId,
    pub secret_key: SecretKey,
    pub redirect_uri: RedirectUri,
    pub response_type: ResponseType,
    pub state: State,
    pub grant_type: GrantType,
}

impl From<&AuthRequest> for SessionParams {
    fn from(req: &AuthRequest) -> Self {
        Self {
            client_id: req.client_id.clone(),
            secret_key: req.secret_key.clone(),
            redirect_uri: req.redirect_uri.clone(),
            response_type: req.response_type,
            state: req.state.clone(),
            grant_type: req.grant_type,
        }
    }
}

pub trait Session {
    fn generate_authcode(&self) -> Result<String, Error>;
}

/// Builds broker sessions. This is the seam between the form and whichever
/// authentication backend produces the URL.
pub trait SessionFactory {
    type Session: Session;

    fn create_session(&self, params: SessionParams) -> Result<Self::Session, Error>;
}
