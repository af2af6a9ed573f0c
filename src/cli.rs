// Command line front end shared by `padded-rsa`, `rsa-keygen`, `rsa-enc`
// and `rsa-dec`

use std::fmt;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Args;
use log::{info, LevelFilter};

use crate::error::RsaError;
use crate::rsa::{decrypt, encrypt, generate_key_pair_with, CipherConfig, KeyGenConfig};
use crate::util::file_ops;

/// `-v/--verbose`
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct Verbosity {
    /// Log options and progress to standard error
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Raw key generation options as typed on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct KeygenArgs {
    /// Public key output file
    #[arg(short = 'p', long = "public-key", value_name = "FILE")]
    pub public_key_file: Option<PathBuf>,

    /// Secret key output file
    #[arg(short = 's', long = "secret-key", value_name = "FILE")]
    pub secret_key_file: Option<PathBuf>,

    /// Modulus size in bits
    #[arg(short = 'n', long = "num-bits", value_name = "BITS")]
    pub num_bits: Option<u64>,

    /// Prime pairs to try when e = 3 is not invertible
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub attempts: u32,
}

/// Raw encryption/decryption options as typed on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct EncDecArgs {
    /// Key file (public key to encrypt, secret key to decrypt)
    #[arg(short = 'k', long = "key", value_name = "FILE")]
    pub key_file: Option<PathBuf>,

    /// Input file holding one decimal integer
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub in_file: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub out_file: Option<PathBuf>,

    /// Encrypt plaintexts wider than num_bits/2 - 24 bits anyway; they do
    /// not decrypt to the same value
    #[arg(long)]
    pub allow_oversized: bool,

    /// Reject decrypted values whose padding is not 0x02 || r || 0x00
    #[arg(long)]
    pub verify_padding: bool,
}

/// Validated key generation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeygenOptions {
    pub public_key_file: PathBuf,
    pub secret_key_file: PathBuf,
    pub num_bits: u64,
    pub config: KeyGenConfig,
}

/// Validated encryption/decryption options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncDecOptions {
    pub key_file: PathBuf,
    pub in_file: PathBuf,
    pub out_file: PathBuf,
    pub config: CipherConfig,
}

impl TryFrom<KeygenArgs> for KeygenOptions {
    type Error = RsaError;

    fn try_from(args: KeygenArgs) -> Result<Self, RsaError> {
        match (args.public_key_file, args.secret_key_file, args.num_bits) {
            (Some(public_key_file), Some(secret_key_file), Some(num_bits)) => Ok(Self {
                public_key_file,
                secret_key_file,
                num_bits,
                config: KeyGenConfig::default().with_max_attempts(args.attempts),
            }),
            _ => Err(RsaError::MissingArgument("-p -s -n".to_string())),
        }
    }
}

impl TryFrom<EncDecArgs> for EncDecOptions {
    type Error = RsaError;

    fn try_from(args: EncDecArgs) -> Result<Self, RsaError> {
        match (args.key_file, args.in_file, args.out_file) {
            (Some(key_file), Some(in_file), Some(out_file)) => Ok(Self {
                key_file,
                in_file,
                out_file,
                config: CipherConfig::default()
                    .with_strict_plaintext(!args.allow_oversized)
                    .with_padding_check(args.verify_padding),
            }),
            _ => Err(RsaError::MissingArgument("-k -i -o".to_string())),
        }
    }
}

impl fmt::Display for KeygenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "public key file: {}", self.public_key_file.display())?;
        writeln!(f, "secret key file: {}", self.secret_key_file.display())?;
        writeln!(f, "number of bits: {}", self.num_bits)?;
        write!(f, "attempts: {}", self.config.max_attempts)
    }
}

impl fmt::Display for EncDecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "key file: {}", self.key_file.display())?;
        writeln!(f, "input file: {}", self.in_file.display())?;
        writeln!(f, "output file: {}", self.out_file.display())?;
        write!(
            f,
            "strict plaintext: {}, verify padding: {}",
            self.config.strict_plaintext, self.config.verify_padding
        )
    }
}

/// Route `log` output to standard error; `RUST_LOG` still wins
pub fn init_logging(verbosity: Verbosity) {
    let level = if verbosity.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Generate a key pair and write the public and secret key files
pub fn keygen(args: KeygenArgs) -> anyhow::Result<()> {
    let options = KeygenOptions::try_from(args)?;
    info!("keygen options:\n{options}");

    let pair = generate_key_pair_with(options.num_bits, &options.config, &mut rand::thread_rng())
        .context("generating key pair")?;
    let (public_key, secret_key) = pair.split();
    info!("generated {public_key}");

    file_ops::write_key_pair(
        &options.public_key_file,
        &options.secret_key_file,
        &public_key,
        &secret_key,
    )
    .context("writing key files")?;
    Ok(())
}

/// Encrypt the integer in the input file under a public key
pub fn encrypt_file(args: EncDecArgs) -> anyhow::Result<()> {
    let options = EncDecOptions::try_from(args)?;
    info!("encrypt options:\n{options}");

    let public_key = file_ops::read_public_key(&options.key_file).context("reading public key")?;
    let m = file_ops::read_payload(&options.in_file).context("reading plaintext")?;

    let c = encrypt(&m, &public_key, &options.config).context("encrypting")?;
    file_ops::write_payload(&options.out_file, &c).context("writing ciphertext")?;
    Ok(())
}

/// Decrypt the integer in the input file with a secret key
pub fn decrypt_file(args: EncDecArgs) -> anyhow::Result<()> {
    let options = EncDecOptions::try_from(args)?;
    info!("decrypt options:\n{options}");

    let secret_key = file_ops::read_secret_key(&options.key_file).context("reading secret key")?;
    let c = file_ops::read_payload(&options.in_file).context("reading ciphertext")?;

    let m = decrypt(&c, &secret_key, &options.config).context("decrypting")?;
    file_ops::write_payload(&options.out_file, &m).context("writing plaintext")?;
    Ok(())
}

/// Print the error chain and exit with status 1
pub fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
