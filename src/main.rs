#[tokio::main]
async fn main() {
    if let Err(err) = pcxpress::mcp::server::run_stdio().await {
        eprintln!("pcxpress: {}", err);
        std::process::exit(1);
    }
}
