mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, Commands, Context, dns, process, routes, status};
use domroute_common::config::{self, Config};
use domroute_core::command::SystemRunner;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let path = config::find_config_file(commands.config.as_deref())?;
    let cfg: Config = config::load_config(&path)?;

    let ctx = Context {
        cfg,
        runner: Arc::new(SystemRunner),
    };

    match commands.command {
        Commands::Status => {
            print::header("domroute status");
            status::status(&ctx).await
        }
        Commands::Dns(command) => {
            print::header("dns");
            dns::dns(&ctx, command).await
        }
        Commands::Routes(command) => {
            print::header("routes");
            routes::routes(&ctx, command).await
        }
        Commands::Process(args) => {
            print::header("processing domain lists");
            process::process(&ctx, args).await
        }
    }
}
