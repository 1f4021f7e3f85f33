use brotocol_deployer::cli::{self, Cli};
use clap::Parser;
use eyre::WrapErr;
use tracing::error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let Cli { options, command } = Cli::parse();
    init_tracing();

    cli::run(options, command)
        .await
        .inspect_err(|err| error!(%err, "Deployment failed"))
        .wrap_err("Deployment failed")
}
