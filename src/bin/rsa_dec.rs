use clap::Parser;
use padded_rsa::cli::{self, EncDecArgs, Verbosity};

/// rsa-dec -k <secret key file> -i <ciphertext file> -o <plaintext file>
#[derive(Debug, Parser)]
#[command(name = "rsa-dec", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(flatten)]
    args: EncDecArgs,
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity);
    cli::exit_on_error(cli::decrypt_file(cli.args));
}
