use anyhow::Result;

use solex_cli::args::{self, UserRegistryArgs};
use solex_cli::{cmd, logging, output};

#[tokio::main]
async fn main() -> Result<()> {
    let cli: UserRegistryArgs = args::parse_or_exit(args::USER_REGISTRY_USAGE);
    logging::init(cli.common.verbose, cli.common.json);
    output::init(cli.common.json);

    cmd::user_registry::run(cli).await
}
