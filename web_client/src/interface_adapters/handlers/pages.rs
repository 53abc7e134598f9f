use crate::interface_adapters::state::AppState;
use axum::{Router, response::Html, routing::get};

// Every page the client serves, with the title of its shell.
// `{*rest}` entries cover the `:path*` children of a section.
pub const PAGES: [(&str, &str); 16] = [
    ("/", "Home"),
    ("/authen/login", "Sign in"),
    ("/authen/register", "Create account"),
    ("/authen/forgot-password", "Forgot password"),
    ("/authen/reset-password", "Reset password"),
    ("/hair-colors", "Hair colors"),
    ("/hair-colors/{*rest}", "Hair color"),
    ("/hair-styles", "Hair styles"),
    ("/hair-styles/{*rest}", "Hair style"),
    ("/barbers", "Barbers"),
    ("/barbers/{*rest}", "Barber"),
    ("/hair-fast-gan", "Try a hairstyle"),
    ("/history-order", "Order history"),
    ("/user-profile", "Profile"),
    ("/payment-result", "Payment result"),
    ("/error/500", "Something went wrong"),
];

pub fn page_routes() -> Router<AppState> {
    PAGES.iter().fold(Router::new(), |router, &(path, title)| {
        router.route(path, get(move || page_shell(title)))
    })
}

async fn page_shell(title: &'static str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Barbershop</title>\n</head>\n\
         <body>\n<main id=\"app\" data-page=\"{title}\"></main>\n</body>\n</html>\n"
    ))
}
