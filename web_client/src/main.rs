#[tokio::main]
async fn main() -> std::io::Result<()> {
    web_client::run_with_config().await
}
