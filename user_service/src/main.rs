#[tokio::main]
async fn main() -> std::io::Result<()> {
    user_service::run_with_config().await
}
