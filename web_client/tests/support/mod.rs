// Shared primitives for bootstrapping servers across integration tests.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Multipart, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use common::ExceptionFilter;
use serde::Deserialize;
use serde_json::Value;
use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};
use web_client::Settings;

// Base URL of the real user service shared by every test in a binary.
static USER_SERVICE_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the user service bootstrap runs only once.
static USER_SERVICE_READY: OnceLock<()> = OnceLock::new();

// Ensure the user service is running and return its base URL.
pub fn ensure_user_service() -> &'static str {
    USER_SERVICE_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                user_service::run(listener, 3600, ExceptionFilter::default())
                    .await
                    .expect("user service failed");
            });
        });
        wait_for_url_and_readiness(published_url);
    });

    USER_SERVICE_URL
        .get()
        .expect("user service url should be initialized")
        .as_str()
}

fn wait_for_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = USER_SERVICE_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("user service did not become ready in time");
}

// Serve `router` on an ephemeral port inside the current test runtime.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

#[derive(Clone)]
pub enum IdentityReply {
    // HTTP status and JSON body to answer with.
    Json(StatusCode, Value),
    Hang,
}

#[derive(Deserialize)]
struct MeQuery {
    #[serde(default)]
    token: String,
}

// Identity endpoint stand-in that records the tokens it receives.
pub struct IdentityStub {
    pub url: String,
    tokens: Arc<Mutex<Vec<String>>>,
}

impl IdentityStub {
    pub async fn spawn(reply: IdentityReply) -> Self {
        let tokens = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&tokens);
        let router = Router::new().route(
            "/users/authen/me",
            get(move |Query(query): Query<MeQuery>| {
                let reply = reply.clone();
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(query.token);
                    match reply {
                        IdentityReply::Json(status, body) => (status, Json(body)).into_response(),
                        IdentityReply::Hang => {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                            StatusCode::OK.into_response()
                        }
                    }
                }
            }),
        );
        Self {
            url: serve(router).await,
            tokens,
        }
    }

    pub fn hits(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

// Fields received by the hair-swap model stand-in.
#[derive(Debug, Default, Clone)]
pub struct ReceivedSwap {
    pub hair_style_url: String,
    pub hair_color_url: String,
    pub image: Vec<u8>,
}

pub struct HairSwapStub {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedSwap>>>,
}

impl HairSwapStub {
    // Answers every swap with `status` and the uploaded bytes as a JPEG.
    pub async fn spawn(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);
        let router = Router::new().route(
            "/swap",
            post(move |mut multipart: Multipart| {
                let log = Arc::clone(&log);
                async move {
                    let mut swap = ReceivedSwap::default();
                    while let Ok(Some(field)) = multipart.next_field().await {
                        let name = field.name().unwrap_or_default().to_string();
                        let bytes = field.bytes().await.unwrap_or_default();
                        match name.as_str() {
                            "hairStyleUrl" => {
                                swap.hair_style_url = String::from_utf8_lossy(&bytes).into_owned()
                            }
                            "hairColorUrl" => {
                                swap.hair_color_url = String::from_utf8_lossy(&bytes).into_owned()
                            }
                            "image" => swap.image = bytes.to_vec(),
                            _ => {}
                        }
                    }
                    let image = swap.image.clone();
                    log.lock().unwrap().push(swap);
                    (status, [(header::CONTENT_TYPE, "image/jpeg")], image).into_response()
                }
            }),
        );
        Self {
            url: format!("{}/swap", serve(router).await),
            received,
        }
    }

    pub fn received(&self) -> Vec<ReceivedSwap> {
        self.received.lock().unwrap().clone()
    }
}

// URL of a port nothing listens on.
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn settings(api_base_url: &str, auth_verify_timeout: Duration) -> Settings {
    Settings {
        api_base_url: api_base_url.to_string(),
        auth_verify_timeout,
        hair_swap_url: "http://127.0.0.1:9/swap".to_string(),
        hair_swap_timeout: Duration::from_secs(5),
        body_policy: Default::default(),
    }
}

// Start a user service with its own filter inside the current test runtime.
pub async fn spawn_user_service(filter: ExceptionFilter) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        let _ = user_service::run(listener, 3600, filter).await;
    });
    format!("http://{}", addr)
}

// Start a web client inside the current test runtime and return its base URL.
pub async fn spawn_web_client(settings: Settings) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        let _ = web_client::run(listener, settings).await;
    });
    format!("http://{}", addr)
}

// Browser stand-in that reports redirects instead of following them.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build test client")
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
