use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(
    name = "nestloop",
    version,
    about = "Nested loop kernels composed from compile-time statement trees"
)]
struct Cli {
    /// Configuration file (default: ./nestloop.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the sample kernels
    List,
    /// Print a kernel's statement tree
    Show(cli::show::ShowArgs),
    /// Run, verify and time a kernel
    Run(cli::run::RunArgs),
}

fn main() {
    let cli = Cli::parse();
    let config = cli::resolve_config(cli.config.as_deref());
    cli::init_tracing(&config.log_filter);

    match cli.command {
        Command::List => cli::list::cmd_list(),
        Command::Show(args) => cli::show::cmd_show(args, &config),
        Command::Run(args) => cli::run::cmd_run(args, &config),
    }
}
