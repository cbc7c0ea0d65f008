use clap::Parser;
use tailorbird_e2e::cli::commands::{cmd_list, cmd_run, cmd_spec};
use tailorbird_e2e::cli::config::{Cli, Commands, load_config, resolve};
use tailorbird_e2e::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // CLI (with env fallbacks) > config file > defaults
    let config = load_config(cli.config.as_deref());
    let ctx = resolve(&cli, &config);

    let all_passed = match &cli.command {
        Commands::Run { suite, grep, .. } => {
            cmd_run(suite, grep.as_deref(), &ctx, cli.format, cli.output.as_deref())?
        }
        Commands::Spec { spec } => cmd_spec(spec, &ctx, cli.format, cli.output.as_deref())?,
        Commands::List { grep } => {
            cmd_list(grep.as_deref());
            true
        }
    };

    if !all_passed {
        std::process::exit(1);
    }
    Ok(())
}
