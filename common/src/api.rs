use crate::error::ApiError;
use async_trait::async_trait;
use strum::{AsRefStr, Display};
use token_console_dto::{
    session::Credential,
    token::{GeneratedToken, TokenId, TokenRecord, TokenUpdate},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// The token API routes the console talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    ListTokens,
    GenerateToken,
    UpdateToken(TokenId),
    DeleteToken(TokenId),
    CheckToken,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListTokens => Method::Get,
            Endpoint::GenerateToken | Endpoint::CheckToken => Method::Post,
            Endpoint::UpdateToken(_) => Method::Put,
            Endpoint::DeleteToken(_) => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::ListTokens => "/tokens/".to_string(),
            Endpoint::GenerateToken => "/token/generate/".to_string(),
            Endpoint::CheckToken => "/token/check/".to_string(),
            Endpoint::UpdateToken(id) | Endpoint::DeleteToken(id) => format!("/tokens/{id}/"),
        }
    }

    /// Full URL below `base`; an empty base keeps the path relative.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }

    /// Whether the route needs the Basic credential.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::CheckToken)
    }
}

/// Request side of the console. One call is one HTTP round trip: no
/// retries, no caching. A 401 must come back as [`ApiError::Unauthorized`].
#[async_trait(?Send)]
pub trait TokenApi {
    /// `GET /tokens/`, also used to verify a credential.
    async fn list_tokens(&self, credential: &Credential) -> Result<Vec<TokenRecord>, ApiError>;

    /// `POST /token/generate/` with no body.
    async fn generate_token(&self, credential: &Credential) -> Result<GeneratedToken, ApiError>;

    /// `PUT /tokens/{id}/`. The response body is ignored.
    async fn update_token(
        &self,
        credential: &Credential,
        id: TokenId,
        update: &TokenUpdate,
    ) -> Result<(), ApiError>;

    /// `DELETE /tokens/{id}/`. The response body is ignored.
    async fn delete_token(&self, credential: &Credential, id: TokenId) -> Result<(), ApiError>;

    /// `POST /token/check/`, unauthenticated.
    async fn check_token(&self, token: &str) -> Result<bool, ApiError>;
}
