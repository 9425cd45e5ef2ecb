//! Tessera CLI - Mint and check credentials from the command line.
//!
//! Every command prints pretty JSON on stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`).

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tessera_crypto::{
    aes_decrypt, aes_encrypt, argon2_hash, argon2_verify, entropy, hmac_sign, hmac_verify,
    sha256_hash, sha256_verify,
};
use tessera_tokens::{
    api_key, backup_codes, classification_key, decode_jwt, encode_jwt, encryption_key,
    fingerprint_key, generate_key, generate_token, otp, password, time_key, trace_key,
    webhook_secret, Claims, KeyKind, TokenKind, DEFAULT_BACKUP_CODES, DEFAULT_JWT_EXPIRY_SECS,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Tessera CLI - Mint tokens, keys and secrets")]
#[command(version)]
struct Cli {
    /// Master secret for HMAC, encryption and JWT commands
    #[arg(long, env = "TESSERA_SECRET", hide_env_values = true, global = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a hashed token (csrf, email-verification, magic-link, nonce,
    /// password-reset, reauth, refresh, session, sudo, twofa-session)
    Token {
        /// Token kind
        kind: TokenKind,
    },
    /// Mint an HMAC-signed API key
    ApiKey,
    /// Mint an encrypted webhook signing secret
    WebhookSecret,
    /// Mint a hashed key (confirmation, deduplication, failure, idempotency,
    /// session)
    Key {
        /// Key kind
        kind: KeyKind,
    },
    /// Mint a fingerprint key
    FingerprintKey,
    /// Mint a trace key
    TraceKey,
    /// Mint a classification key
    ClassificationKey,
    /// Mint a time-stamped key
    TimeKey,
    /// Issue hashed backup codes
    BackupCodes {
        /// Number of codes
        #[arg(long, default_value_t = DEFAULT_BACKUP_CODES)]
        count: usize,
    },
    /// Issue a hashed six-digit one-time passcode
    Otp,
    /// Generate a password and its Argon2id hash
    Password,
    /// Mint a hashed data encryption key
    EncryptionKey,
    /// Draw raw entropy
    Entropy {
        /// Output encoding
        #[arg(value_enum)]
        encoding: Encoding,
        /// Number of random bytes
        #[arg(long, default_value_t = 32)]
        length: usize,
    },
    /// Sample a random string from an alphabet
    RandomString {
        /// Number of characters
        #[arg(long)]
        length: usize,
        /// Characters to sample from
        #[arg(long)]
        alphabet: String,
    },
    /// SHA-256 digest, optionally checked against an expected value
    Sha256 {
        /// Input text
        data: String,
        /// Expected hex digest
        #[arg(long)]
        expected: Option<String>,
    },
    /// HMAC-SHA256 signatures
    Hmac {
        #[command(subcommand)]
        command: HmacCommands,
    },
    /// Argon2id password hashes
    Argon2 {
        #[command(subcommand)]
        command: Argon2Commands,
    },
    /// Encrypt text into a base64 envelope
    Encrypt {
        /// Text to encrypt
        plaintext: String,
        /// Context bound as associated data
        #[arg(long, env = "TESSERA_CONTEXT")]
        context: Option<String>,
    },
    /// Decrypt a base64 envelope
    Decrypt {
        /// Envelope to decrypt
        blob: String,
        /// Context the envelope was sealed with
        #[arg(long, env = "TESSERA_CONTEXT")]
        context: Option<String>,
    },
    /// HS256 JSON Web Tokens
    Jwt {
        #[command(subcommand)]
        command: JwtCommands,
    },
}

#[derive(Subcommand)]
enum HmacCommands {
    /// Sign a message
    Sign {
        /// Message to sign
        message: String,
    },
    /// Verify a signature
    Verify {
        /// Signed message
        message: String,
        /// Hex signature
        signature: String,
    },
}

#[derive(Subcommand)]
enum Argon2Commands {
    /// Hash a password
    Hash {
        /// Password (or read from stdin if not provided)
        password: Option<String>,
    },
    /// Verify a password against a hash
    Verify {
        /// Password
        password: String,
        /// Encoded Argon2id hash
        hash: String,
    },
}

#[derive(Subcommand)]
enum JwtCommands {
    /// Sign claims as a JWT
    Encode {
        /// Claims as a JSON object
        #[arg(long)]
        claims: String,
        /// Lifetime in seconds
        #[arg(long, default_value_t = DEFAULT_JWT_EXPIRY_SECS)]
        expiry: u64,
    },
    /// Verify a JWT and print its claims
    Decode {
        /// Encoded token
        token: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Encoding {
    Bytes,
    Hex,
    Urlsafe,
}

// ============================================================================
// Helpers
// ============================================================================

fn emit(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to write output")?;
    writeln!(out)?;
    Ok(())
}

fn require_secret(secret: Option<&str>) -> Result<&str> {
    match secret {
        Some(s) if !s.is_empty() => Ok(s),
        _ => bail!("Secret required. Set TESSERA_SECRET or use --secret"),
    }
}

fn read_password() -> Result<String> {
    eprint!("Enter password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// ============================================================================
// Command Handlers
// ============================================================================

fn cmd_token(out: &mut impl Write, kind: TokenKind) -> Result<()> {
    debug!(kind = %kind, "Minting token");
    emit(out, &generate_token(kind)?)
}

fn cmd_api_key(out: &mut impl Write, secret: &str) -> Result<()> {
    emit(out, &api_key(secret)?)
}

fn cmd_webhook_secret(out: &mut impl Write, secret: &str) -> Result<()> {
    emit(out, &webhook_secret(secret)?)
}

fn cmd_key(out: &mut impl Write, kind: KeyKind) -> Result<()> {
    debug!(kind = %kind, "Minting key");
    emit(out, &generate_key(kind)?)
}

fn cmd_backup_codes(out: &mut impl Write, count: usize) -> Result<()> {
    debug!(count, "Issuing backup codes");
    emit(out, &backup_codes(count)?)
}

fn cmd_entropy(out: &mut impl Write, encoding: Encoding, length: usize) -> Result<()> {
    match encoding {
        Encoding::Bytes => emit(out, &json!({ "bytes": entropy::bytes(length)? })),
        Encoding::Hex => emit(out, &json!({ "hex": entropy::hex(length)? })),
        Encoding::Urlsafe => emit(out, &json!({ "urlsafe": entropy::urlsafe(length)? })),
    }
}

fn cmd_sha256(out: &mut impl Write, data: &str, expected: Option<&str>) -> Result<()> {
    match expected {
        Some(expected) => emit(out, &json!({ "valid": sha256_verify(data, expected) })),
        None => emit(out, &json!({ "hash": sha256_hash(data) })),
    }
}

fn cmd_hmac(out: &mut impl Write, secret: &str, command: HmacCommands) -> Result<()> {
    match command {
        HmacCommands::Sign { message } => {
            emit(out, &json!({ "signature": hmac_sign(&message, secret)? }))
        },
        HmacCommands::Verify { message, signature } => emit(
            out,
            &json!({ "valid": hmac_verify(&message, secret, &signature) }),
        ),
    }
}

fn cmd_argon2(out: &mut impl Write, command: Argon2Commands) -> Result<()> {
    match command {
        Argon2Commands::Hash { password } => {
            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };
            if password.is_empty() {
                bail!("Password cannot be empty");
            }
            emit(out, &json!({ "hash": argon2_hash(&password)? }))
        },
        Argon2Commands::Verify { password, hash } => {
            emit(out, &json!({ "valid": argon2_verify(&password, &hash) }))
        },
    }
}

fn cmd_encrypt(
    out: &mut impl Write,
    secret: &str,
    plaintext: &str,
    context: Option<&str>,
) -> Result<()> {
    debug!(bound = context.is_some(), "Encrypting");
    let encrypted = aes_encrypt(plaintext, secret, context)?;
    emit(out, &json!({ "encrypted": encrypted }))
}

fn cmd_decrypt(out: &mut impl Write, secret: &str, blob: &str, context: Option<&str>) -> Result<()> {
    debug!(bound = context.is_some(), blob_len = blob.len(), "Decrypting");
    let plaintext = aes_decrypt(blob, secret, context)?;
    emit(out, &json!({ "plaintext": plaintext }))
}

fn cmd_jwt(out: &mut impl Write, secret: &str, command: JwtCommands) -> Result<()> {
    match command {
        JwtCommands::Encode { claims, expiry } => {
            let claims: Claims =
                serde_json::from_str(&claims).context("Claims must be a JSON object")?;
            debug!(claims = claims.len(), expiry, "Encoding JWT");
            emit(out, &json!({ "token": encode_jwt(&claims, secret, expiry)? }))
        },
        JwtCommands::Decode { token } => emit(out, &decode_jwt(&token, secret)?),
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let secret = cli.secret.as_deref();

    match cli.command {
        Commands::Token { kind } => cmd_token(out, kind),
        Commands::ApiKey => cmd_api_key(out, require_secret(secret)?),
        Commands::WebhookSecret => cmd_webhook_secret(out, require_secret(secret)?),
        Commands::Key { kind } => cmd_key(out, kind),
        Commands::FingerprintKey => emit(out, &json!({ "key": fingerprint_key()? })),
        Commands::TraceKey => emit(out, &json!({ "key": trace_key()? })),
        Commands::ClassificationKey => emit(out, &json!({ "key": classification_key()? })),
        Commands::TimeKey => emit(out, &json!({ "key": time_key()? })),
        Commands::BackupCodes { count } => cmd_backup_codes(out, count),
        Commands::Otp => emit(out, &otp()?),
        Commands::Password => emit(out, &password()?),
        Commands::EncryptionKey => emit(out, &encryption_key()?),
        Commands::Entropy { encoding, length } => cmd_entropy(out, encoding, length),
        Commands::RandomString { length, alphabet } => emit(
            out,
            &json!({ "value": entropy::random_string(length, &alphabet)? }),
        ),
        Commands::Sha256 { data, expected } => cmd_sha256(out, &data, expected.as_deref()),
        Commands::Hmac { command } => cmd_hmac(out, require_secret(secret)?, command),
        Commands::Argon2 { command } => cmd_argon2(out, command),
        Commands::Encrypt { plaintext, context } => cmd_encrypt(
            out,
            require_secret(secret)?,
            &plaintext,
            context.as_deref(),
        ),
        Commands::Decrypt { blob, context } => {
            cmd_decrypt(out, require_secret(secret)?, &blob, context.as_deref())
        },
        Commands::Jwt { command } => cmd_jwt(out, require_secret(secret)?, command),
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}
