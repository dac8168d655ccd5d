use url::Url;

use crate::core::types::{ClientId, GrantType, RedirectUri, ResponseType, State};

use super::{Error, Session, SessionFactory, SessionParams};

use tracing::{event, Level};

pub const DEFAULT_API_BASE: &str = "https://api-t1.fyers.in/api/v3";
pub const AUTHCODE_PATH: &str = "generate-authcode";

#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
struct AuthorizationQuery<'r> {
    client_id: &'r ClientId,
    redirect_uri: &'r RedirectUri,
    response_type: ResponseType,
    state: &'r State,
    grant_type: GrantType,
}

fn append_params(mut url: Url, p: impl serde::Serialize) -> Result<Url, Error> {
    let new_qs = serde_urlencoded::to_string(p)?;
    let pairs = form_urlencoded::parse(new_qs.as_bytes());
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(url)
}

fn parse_base(base: &str) -> Result<Url, Error> {
    let url = Url::parse(base).map_err(|source| Error::BadApiBase {
        base: base.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::BadApiBase {
            base: base.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }
    Ok(url)
}

/// Session against the Fyers API v3 login endpoint.
#[derive(Debug, Clone)]
pub struct FyersSessionModel {
    api_base: Url,
    params: SessionParams,
}

impl FyersSessionModel {
    pub fn new(api_base: Url, params: SessionParams) -> Self {
        Self { api_base, params }
    }

    fn endpoint(&self) -> Result<Url, Error> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::BadApiBase {
                base: self.api_base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .push(AUTHCODE_PATH);
        url.set_query(None);
        Ok(url)
    }
}

impl Session for FyersSessionModel {
    #[tracing::instrument(skip_all, fields(client_id = ?self.params.client_id))]
    fn generate_authcode(&self) -> Result<String, Error> {
        let query = AuthorizationQuery {
            client_id: &self.params.client_id,
            redirect_uri: &self.params.redirect_uri,
            response_type: self.params.response_type,
            state: &self.params.state,
            grant_type: self.params.grant_type,
        };
        let url = append_params(self.endpoint()?, query)?;

        event!(Level::DEBUG, endpoint = %self.api_base, "Built authorization code URL");
        Ok(url.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct FyersSessionFactory {
    api_base: Url,
}

impl FyersSessionFactory {
    pub fn new(api_base: &str) -> Result<Self, Error> {
        let api_base = parse_base(api_base)?;
        Ok(Self { api_base })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

impl Default for FyersSessionFactory {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
        }
    }
}

impl SessionFactory for FyersSessionFactory {
    type Session = FyersSessionModel;

    fn create_session(&self, params: SessionParams) -> Result<Self::Session, Error> {
        Ok(FyersSessionModel::new(self.api_base.clone(), params))
    }
}
