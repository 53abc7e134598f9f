use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::gate::{IdentityLookup, UserIdentity};
use crate::domain::ports::{
    HairSwapError, HairSwapRequest, HairSwapper, IdentityError, IdentityProvider, SwappedImage,
};

#[derive(Clone)]
pub(crate) enum StubBehavior {
    Answer(IdentityLookup),
    Fail,
    Hang,
}

// Identity provider fake that records every token it is asked about.
#[derive(Clone)]
pub(crate) struct StubIdentity {
    behavior: StubBehavior,
    tokens: Arc<Mutex<Vec<String>>>,
}

impl StubIdentity {
    pub(crate) fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn authenticated() -> Self {
        Self::new(StubBehavior::Answer(IdentityLookup {
            status: Some(200),
            data: Some(UserIdentity {
                id: 1,
                email: "linh@example.com".to_string(),
                full_name: "Linh Tran".to_string(),
                role: "USER".to_string(),
            }),
        }))
    }

    pub(crate) fn unauthorized() -> Self {
        Self::new(StubBehavior::Answer(IdentityLookup {
            status: Some(401),
            data: None,
        }))
    }

    pub(crate) fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub(crate) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn lookup(&self, token: &str) -> Result<IdentityLookup, IdentityError> {
        self.tokens.lock().unwrap().push(token.to_string());
        match &self.behavior {
            StubBehavior::Answer(lookup) => Ok(lookup.clone()),
            StubBehavior::Fail => Err(IdentityError::Transport("connection refused".to_string())),
            StubBehavior::Hang => std::future::pending().await,
        }
    }
}

// Hair swapper fake; answers with the uploaded bytes reversed, or a rejection.
#[derive(Clone, Default)]
pub(crate) struct RecordingSwapper {
    reject_with: Option<u16>,
    calls: Arc<AtomicUsize>,
}

impl RecordingSwapper {
    pub(crate) fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HairSwapper for RecordingSwapper {
    async fn swap(&self, request: HairSwapRequest) -> Result<SwappedImage, HairSwapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.reject_with {
            return Err(HairSwapError::Rejected(status));
        }
        let mut bytes = request.image.bytes;
        bytes.reverse();
        Ok(SwappedImage {
            content_type: "image/png".to_string(),
            bytes,
        })
    }
}
