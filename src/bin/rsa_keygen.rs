use clap::Parser;
use padded_rsa::cli::{self, KeygenArgs, Verbosity};

/// rsa-keygen -p <public key file> -s <secret key file> -n <bits>
#[derive(Debug, Parser)]
#[command(name = "rsa-keygen", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(flatten)]
    args: KeygenArgs,
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity);
    cli::exit_on_error(cli::keygen(cli.args));
}
