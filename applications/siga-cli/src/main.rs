/// SIGA - association management console
use clap::Parser;
use siga_cli::{commands, App, Cli, SigaConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siga_cli=info,siga_client=info,siga_state=warn,siga_storage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = SigaConfig::load(cli.config.as_deref())?;
    let app = App::build(&config).await?;
    tracing::debug!(backend = config.backend.kind.as_str(), "Console ready");

    let mut stdout = std::io::stdout().lock();
    commands::run(&app, cli.command, &mut stdout).await
}
