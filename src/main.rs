use clap::Parser;

use agent_readiness::cli::{Cli, Commands};
use agent_readiness::commands::{run_init, run_pillars, run_scan};
use agent_readiness::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Pillars(args) => run_pillars(args, &cli),
        Commands::Init(args) => run_init(args, &cli),
    };

    std::process::exit(exit_code);
}
