use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use echo_server::AppConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "echo-server", about = "Serve the echo scripts over HTTP")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Address to bind.
    #[arg(long, env = "ECHO_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Directory listed by `/cgi-bin/relative-files`.
    #[arg(long, env = "ECHO_SCRIPTS_DIR", default_value = ".")]
    scripts_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,echo_server=debug,echo_core=debug")),
        )
        .init();

    let cli = Cli::parse();
    let addr = SocketAddr::new(cli.bind, cli.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, scripts_dir = ?cli.scripts_dir, "listening");

    echo_server::run(
        listener,
        AppConfig {
            scripts_dir: cli.scripts_dir,
        },
    )
    .await?;
    Ok(())
}
