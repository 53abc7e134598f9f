use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::domain::gate::IdentityLookup;

#[derive(Debug)]
pub enum IdentityError {
    // The identity endpoint could not be reached or did not answer.
    Transport(String),
    // The endpoint answered with a body that is not an identity lookup.
    Decode(String),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Transport(err) => write!(f, "identity transport error: {err}"),
            IdentityError::Decode(err) => write!(f, "identity response decode error: {err}"),
        }
    }
}

impl std::error::Error for IdentityError {}

// The gate depends on this trait, not the concrete client implementation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn lookup(&self, token: &str) -> Result<IdentityLookup, IdentityError>;
}

#[async_trait]
impl<T> IdentityProvider for Arc<T>
where
    T: IdentityProvider + ?Sized,
{
    async fn lookup(&self, token: &str) -> Result<IdentityLookup, IdentityError> {
        (**self).lookup(token).await
    }
}

// Portrait uploaded by the visitor.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

// Fully validated request forwarded to the hair-swap model.
#[derive(Debug, Clone)]
pub struct HairSwapRequest {
    pub hair_style_url: String,
    pub hair_color_url: String,
    pub image: ImageUpload,
}

#[derive(Debug, Clone)]
pub struct SwappedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum HairSwapError {
    // The model answered with a status other than 200/201.
    Rejected(u16),
    Unavailable(String),
}

impl fmt::Display for HairSwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HairSwapError::Rejected(status) => write!(f, "hair swap rejected with status {status}"),
            HairSwapError::Unavailable(err) => write!(f, "hair swap unavailable: {err}"),
        }
    }
}

impl std::error::Error for HairSwapError {}

#[async_trait]
pub trait HairSwapper: Send + Sync {
    async fn swap(&self, request: HairSwapRequest) -> Result<SwappedImage, HairSwapError>;
}

#[async_trait]
impl<T> HairSwapper for Arc<T>
where
    T: HairSwapper + ?Sized,
{
    async fn swap(&self, request: HairSwapRequest) -> Result<SwappedImage, HairSwapError> {
        (**self).swap(request).await
    }
}
