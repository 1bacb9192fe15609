use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use log::debug;
use serde::de::DeserializeOwned;
use token_console_common::{
    api::{Endpoint, Method, TokenApi},
    error::ApiError,
};
use token_console_dto::{
    session::Credential,
    token::{GeneratedToken, TokenCheck, TokenCheckResponse, TokenId, TokenRecord, TokenUpdate},
};

/// [`TokenApi`] over the browser's `fetch`.
pub struct GlooTokenApi {
    base: String,
}

impl GlooTokenApi {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
        }
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        credential: Option<&Credential>,
        body: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = endpoint.url(&self.base);
        let mut builder = match endpoint.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        if let Some(credential) = credential {
            builder = builder.header("Authorization", &credential.authorization());
        }
        debug!("{} {}", endpoint.method(), url);
        let sent = match body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(transport)?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(transport)?;
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &text))
    }
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl TokenApi for GlooTokenApi {
    async fn list_tokens(&self, credential: &Credential) -> Result<Vec<TokenRecord>, ApiError> {
        let response = self
            .send(Endpoint::ListTokens, Some(credential), None)
            .await?;
        decode(response).await
    }

    async fn generate_token(&self, credential: &Credential) -> Result<GeneratedToken, ApiError> {
        let response = self
            .send(Endpoint::GenerateToken, Some(credential), None)
            .await?;
        decode(response).await
    }

    async fn update_token(
        &self,
        credential: &Credential,
        id: TokenId,
        update: &TokenUpdate,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_string(update)?;
        self.send(Endpoint::UpdateToken(id), Some(credential), Some(body))
            .await
            .map(|_| ())
    }

    async fn delete_token(&self, credential: &Credential, id: TokenId) -> Result<(), ApiError> {
        self.send(Endpoint::DeleteToken(id), Some(credential), None)
            .await
            .map(|_| ())
    }

    async fn check_token(&self, token: &str) -> Result<bool, ApiError> {
        let body = serde_json::to_string(&TokenCheck {
            token: token.to_string(),
        })?;
        let response = self.send(Endpoint::CheckToken, None, Some(body)).await?;
        let checked: TokenCheckResponse = decode(response).await?;
        Ok(checked.is_valid)
    }
}
