use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mock-server", about = "Users API for exercising the test client")]
struct Args {
    /// Port to listen on (loopback only).
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let listener = TcpListener::bind(("127.0.0.1", args.port)).await?;
    mock_server::run(listener).await
}
