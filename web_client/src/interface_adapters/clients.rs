use crate::domain::{
    HairSwapError, HairSwapRequest, HairSwapper, IdentityError, IdentityLookup, IdentityProvider,
    SwappedImage,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, header};
use std::fmt;
use std::time::Duration;
use url::Url;

// Content type assumed when the model does not name one.
const DEFAULT_IMAGE_TYPE: &str = "image/png";

#[derive(Debug)]
pub enum ClientBuildError {
    Url(url::ParseError),
    Http(reqwest::Error),
}

impl fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientBuildError::Url(err) => write!(f, "invalid service url: {err}"),
            ClientBuildError::Http(err) => write!(f, "http client build error: {err}"),
        }
    }
}

impl std::error::Error for ClientBuildError {}

// Thin wrapper around reqwest for the user service identity endpoint.
#[derive(Clone)]
pub struct UserServiceClient {
    http: Client,
    me_url: Url,
}

impl UserServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let me_url = Url::parse(&format!(
            "{}/users/authen/me",
            base_url.trim_end_matches('/')
        ))
        .map_err(ClientBuildError::Url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::Http)?;
        Ok(Self { http, me_url })
    }

    fn lookup_url(&self, token: &str) -> Url {
        let mut url = self.me_url.clone();
        url.query_pairs_mut().append_pair("token", token);
        url
    }
}

#[async_trait]
impl IdentityProvider for UserServiceClient {
    #[tracing::instrument(name = "identity_lookup", skip_all)]
    async fn lookup(&self, token: &str) -> Result<IdentityLookup, IdentityError> {
        let response = self
            .http
            .get(self.lookup_url(token))
            .send()
            .await
            .map_err(|err| IdentityError::Transport(err.to_string()))?;

        // A 401 still carries the body the gate decides on; the HTTP status
        // only stands in when that body has no `status` of its own.
        let http_status = response.status();
        tracing::debug!(status = %http_status, "identity endpoint answered");

        response
            .json::<IdentityLookup>()
            .await
            .map(|lookup| lookup.or_status(http_status.as_u16()))
            .map_err(|err| IdentityError::Decode(err.to_string()))
    }
}

// Multipart client for the hair-swap model service.
#[derive(Clone)]
pub struct HairSwapClient {
    http: Client,
    swap_url: Url,
}

impl HairSwapClient {
    pub fn new(swap_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let swap_url = Url::parse(swap_url).map_err(ClientBuildError::Url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::Http)?;
        Ok(Self { http, swap_url })
    }
}

#[async_trait]
impl HairSwapper for HairSwapClient {
    #[tracing::instrument(name = "hair_swap", skip_all, fields(image_bytes = request.image.bytes.len()))]
    async fn swap(&self, request: HairSwapRequest) -> Result<SwappedImage, HairSwapError> {
        let image = request.image;
        let part = Part::bytes(image.bytes).file_name(image.file_name);
        let part = match image.content_type.as_deref() {
            Some(content_type) => part
                .mime_str(content_type)
                .map_err(|err| HairSwapError::Unavailable(err.to_string()))?,
            None => part,
        };
        let form = Form::new()
            .text("hairStyleUrl", request.hair_style_url)
            .text("hairColorUrl", request.hair_color_url)
            .part("image", part);

        let response = self
            .http
            .post(self.swap_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| HairSwapError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(HairSwapError::Rejected(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| HairSwapError::Unavailable(err.to_string()))?;

        Ok(SwappedImage {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
