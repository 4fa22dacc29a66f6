mod commands;
mod terminal;

use commands::{CommandLine, Commands, probe, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    match commands.command {
        Commands::Scan(args) => {
            print::banner(args.quiet || args.json);
            print::header("starting sweep", args.quiet || args.json);
            scan::scan(args).await
        }
        Commands::Probe(args) => {
            print::header("single probe", false);
            probe::probe(args).await
        }
    }
}
