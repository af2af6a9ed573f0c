use clap::{Parser, Subcommand};
use padded_rsa::cli::{self, EncDecArgs, KeygenArgs, Verbosity};

/// Padded RSA: key generation, encryption and decryption of decimal integers
#[derive(Debug, Parser)]
#[command(name = "padded-rsa", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a key pair (e = 3)
    Keygen(KeygenArgs),
    /// Encrypt a plaintext integer with a public key
    Encrypt(EncDecArgs),
    /// Decrypt a ciphertext integer with a secret key
    Decrypt(EncDecArgs),
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity);

    let result = match cli.command {
        Command::Keygen(args) => cli::keygen(args),
        Command::Encrypt(args) => cli::encrypt_file(args),
        Command::Decrypt(args) => cli::decrypt_file(args),
    };
    cli::exit_on_error(result);
}
