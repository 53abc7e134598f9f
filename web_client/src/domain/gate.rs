use serde::Deserialize;

pub const LOGIN_PAGE: &str = "/authen/login";
pub const HOME_PAGE: &str = "/";
pub const ERROR_PAGE: &str = "/error/500";

// Pages reachable without a session; an authenticated visitor is sent back.
pub const AUTHEN_PAGES: [&str; 4] = [
    "/authen/login",
    "/authen/register",
    "/authen/forgot-password",
    "/authen/reset-password",
];

// Status the identity endpoint reports for a missing or rejected session.
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// A gated path pattern.
///
/// `Subtree("/barbers")` stands for `/barbers/:path*`: the base itself and
/// anything below it, but not `/barbershop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(&'static str),
    Subtree(&'static str),
}

impl RoutePattern {
    pub fn matches(&self, path: &str) -> bool {
        match *self {
            RoutePattern::Exact(expected) => path == expected,
            RoutePattern::Subtree(base) => match path.strip_prefix(base) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

pub const GATED_ROUTES: [RoutePattern; 9] = [
    RoutePattern::Subtree("/authen"),
    RoutePattern::Exact("/"),
    RoutePattern::Subtree("/hair-colors"),
    RoutePattern::Subtree("/hair-styles"),
    RoutePattern::Subtree("/barbers"),
    RoutePattern::Exact("/hair-fast-gan"),
    RoutePattern::Exact("/history-order"),
    RoutePattern::Exact("/user-profile"),
    RoutePattern::Exact("/payment-result"),
];

pub fn is_gated(path: &str) -> bool {
    GATED_ROUTES.iter().any(|pattern| pattern.matches(path))
}

pub fn is_authen_page(path: &str) -> bool {
    AUTHEN_PAGES.contains(&path)
}

// Identity record returned by the user service. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
}

/// Body of the identity endpoint, whatever its HTTP status.
///
/// A success carries `{status, data}`; a raw error object carries `status`
/// and no `data`. A structured error body carries neither, so the HTTP
/// status is filled in with [`IdentityLookup::or_status`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityLookup {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Option<UserIdentity>,
}

impl IdentityLookup {
    // Keep the body's own status; fall back to the transport status.
    pub fn or_status(mut self, http_status: u16) -> Self {
        self.status = self.status.or(Some(http_status));
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(UNAUTHORIZED_STATUS)
    }
}

// Inputs of one gate evaluation, read from the request.
#[derive(Debug, Clone, Default)]
pub struct GateRequest {
    pub token: String,
    pub current_path: String,
    pub previous_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    // Path is outside the gate; no lookup happened.
    Bypass,
    Proceed,
    RedirectToLogin,
    RedirectToPrevious(String),
    RedirectToError,
}

impl AuthDecision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            AuthDecision::Bypass | AuthDecision::Proceed => None,
            AuthDecision::RedirectToLogin => Some(LOGIN_PAGE),
            AuthDecision::RedirectToPrevious(target) => Some(target.as_str()),
            AuthDecision::RedirectToError => Some(ERROR_PAGE),
        }
    }
}

/// Decide what happens to a gated navigation once the identity is known.
///
/// Checks run in order: an unauthorized lookup on a non-public page goes to
/// login, an identified visitor on a public page goes back to `pre_path`,
/// everything else proceeds.
pub fn decide(lookup: &IdentityLookup, current_path: &str, pre_path: &str) -> AuthDecision {
    let public = is_authen_page(current_path);

    if lookup.is_unauthorized() && !public {
        return AuthDecision::RedirectToLogin;
    }
    if lookup.data.is_some() && public {
        return AuthDecision::RedirectToPrevious(fallback_target(pre_path));
    }
    AuthDecision::Proceed
}

// Only local absolute paths are followed; anything else lands on home.
pub fn fallback_target(pre_path: &str) -> String {
    let local = pre_path.starts_with('/') && !pre_path.starts_with("//") && !pre_path.contains('\\');
    if local {
        pre_path.to_string()
    } else {
        HOME_PAGE.to_string()
    }
}
