use clap::Parser;
use scripts::{cli::Cli, errors::ScriptError, utils::setup_client};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    run(cli).await.inspect_err(|e| error!("{}", e))
}

async fn run(cli: Cli) -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        command,
    } = cli;

    let client = setup_client(&priv_key, &rpc_url).await?;

    command.run(client, &rpc_url, &priv_key).await
}
