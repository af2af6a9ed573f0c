use clap::Parser;
use padded_rsa::cli::{self, EncDecArgs, Verbosity};

/// rsa-enc -k <public key file> -i <plaintext file> -o <ciphertext file>
#[derive(Debug, Parser)]
#[command(name = "rsa-enc", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(flatten)]
    args: EncDecArgs,
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity);
    cli::exit_on_error(cli::encrypt_file(cli.args));
}
