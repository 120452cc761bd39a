use anyhow::Result;

use solex_cli::args::{self, AccountLoggerArgs};
use solex_cli::{cmd, logging, output};

#[tokio::main]
async fn main() -> Result<()> {
    let cli: AccountLoggerArgs = args::parse_or_exit(args::ACCOUNT_LOGGER_USAGE);
    logging::init(cli.common.verbose, cli.common.json);
    output::init(cli.common.json);

    cmd::account_logger::run(cli).await
}
