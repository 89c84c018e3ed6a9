use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::Address;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tesc_endorsement::{
    address, predictor, utils::domain::extract_subdomain, Claim, Endorser, EndorsementRequest,
    Fingerprint, Flag, FlagSet, Signature, StaticProvider,
};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing_subscriber::EnvFilter;

/// Create and check TLS-endorsed smart contract (TeSC) endorsements offline.
///
/// Chain state (the deployer's nonce and gas price) is passed on the command line, so signing
/// works without a node. Endorsements are printed as JSON ready for the deployment transaction.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign an endorsement for the contract the sender deploys next.
    Sign(SignArgs),
    /// Check an endorsement signature against a certificate.
    Verify(VerifyArgs),
    /// Encode flag names into the on-chain field, or decode it.
    Flags(FlagsArgs),
    /// Validate an address and its checksum casing.
    CheckAddress { address: String },
    /// Print the address of the contract created by a sender's transaction with the given nonce.
    Predict {
        #[arg(long, env = "TESC_SENDER")]
        sender: Address,
        #[arg(long)]
        nonce: u64,
    },
}

#[derive(Args, Debug)]
struct SignArgs {
    /// Domain to endorse (eg, www.example.com).
    #[arg(long)]
    domain: String,

    /// Expiry as Unix seconds or an RFC 3339 timestamp.
    #[arg(long)]
    expiry: String,

    /// Flag to set; repeat for several (eg, `--flag payable --flag allow-subdomain`).
    #[arg(long = "flag")]
    flags: Vec<Flag>,

    /// Account that will send the deployment transaction.
    #[arg(long, env = "TESC_SENDER")]
    sender: Address,

    /// Nonce of the sender's next transaction.
    #[arg(long)]
    nonce: u64,

    /// PEM file with the domain's TLS private key.
    #[arg(long, env = "TESC_KEY_PATH")]
    key: PathBuf,

    /// PEM certificate; when given, its fingerprint is included in the endorsement.
    #[arg(long, env = "TESC_CERT_PATH")]
    cert: Option<PathBuf>,

    /// Gas price in wei to record alongside the deployment context.
    #[arg(long)]
    gas_price: Option<u128>,

    /// Also write the JSON output to this file.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Contract address, checksummed.
    #[arg(long)]
    address: String,

    /// Domain (or hash commitment) as stored in the contract.
    #[arg(long)]
    domain: String,

    #[arg(long)]
    expiry: String,

    /// On-chain flags field (hex).
    #[arg(long)]
    flags: String,

    /// Base64 signature as stored in the contract.
    #[arg(long)]
    signature: String,

    /// PEM certificate or public key of the domain.
    #[arg(long, env = "TESC_CERT_PATH")]
    cert: PathBuf,
}

#[derive(Args, Debug)]
struct FlagsArgs {
    /// On-chain flags hex to decode.
    #[arg(long, conflicts_with = "flags")]
    decode: Option<String>,

    /// Flag to encode; repeat for several.
    #[arg(long = "flag")]
    flags: Vec<Flag>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sign(args) => run_sign(&args),
        Command::Verify(args) => run_verify(&args),
        Command::Flags(args) => run_flags(&args),
        Command::CheckAddress { address } => run_check_address(&address),
        Command::Predict { sender, nonce } => {
            println!("{}", address::to_checksum(&predictor::predict(sender, nonce)));
            Ok(())
        }
    }
}

fn run_sign(args: &SignArgs) -> Result<()> {
    let expiry = parse_expiry(&args.expiry)?;
    let key_pem = read_pem(&args.key)?;
    let fingerprint = match &args.cert {
        Some(path) => Fingerprint::of_certificate_pem(&read_pem(path)?)
            .with_context(|| format!("failed reading certificate {}", path.display()))?,
        None => Fingerprint::ABSENT,
    };

    let mut provider = StaticProvider::new().with_nonce(args.sender, args.nonce);
    if let Some(wei) = args.gas_price {
        provider = provider.with_gas_price(wei);
    }

    let request = EndorsementRequest {
        sender: args.sender,
        domain: args.domain.clone(),
        expiry,
        flags: args.flags.iter().copied().collect(),
        fingerprint,
    };
    let (context, endorsement) = Endorser::new(provider)
        .endorse(&request, &key_pem)
        .context("failed creating endorsement")?;

    let subdomain = extract_subdomain(&args.domain);
    if !subdomain.is_empty() && !request.flags.has(Flag::AllowSubdomain) {
        tracing::info!(%subdomain, "endorsing a subdomain without ALLOW_SUBDOMAIN");
    }

    let output = json!({
        "context": serde_json::to_value(&context)?,
        "claimString": endorsement.claim.format(),
        "endorsement": serde_json::to_value(&endorsement)?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(path) = &args.out {
        save_endorsement(path, &output)?;
        tracing::info!(path = %path.display(), "wrote endorsement");
    }
    Ok(())
}

fn run_verify(args: &VerifyArgs) -> Result<()> {
    let contract = address::validate(&args.address)
        .map_err(|reason| anyhow!("invalid contract address: {reason}"))?;
    let flags = FlagSet::from_on_chain_hex(&args.flags).context("invalid flags field")?;
    let claim = Claim::new(contract, args.domain.clone(), parse_expiry(&args.expiry)?, flags);
    let public_pem = read_pem(&args.cert)?;

    let valid = tesc_endorsement::signature::verify(
        &claim,
        &Signature::from_base64(args.signature.clone()),
        &public_pem,
    )
    .context("failed checking signature")?;

    if !valid {
        bail!("invalid: signature does not match claim `{claim}`");
    }
    println!("valid");
    Ok(())
}

fn run_flags(args: &FlagsArgs) -> Result<()> {
    if let Some(hex) = &args.decode {
        let flags = FlagSet::from_on_chain_hex(hex).context("invalid flags field")?;
        let names: Vec<&str> = flags.iter().map(Flag::name).collect();
        println!("{}", serde_json::to_string(&names)?);
    } else {
        let flags: FlagSet = args.flags.iter().copied().collect();
        println!("{}", flags.to_on_chain_hex());
    }
    Ok(())
}

fn run_check_address(input: &str) -> Result<()> {
    match address::validate(input) {
        Ok(parsed) => {
            println!("valid {}", address::to_checksum(&parsed));
            Ok(())
        }
        Err(reason) => bail!("{reason}"),
    }
}

/// Unix seconds, or an RFC 3339 timestamp such as `2030-12-30T00:00:00Z`.
fn parse_expiry(input: &str) -> Result<u64> {
    let input = input.trim();
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse()
            .with_context(|| format!("expiry `{input}` out of range"));
    }
    let timestamp = OffsetDateTime::parse(input, &Rfc3339)
        .with_context(|| format!("expiry `{input}` is neither Unix seconds nor RFC 3339"))?
        .unix_timestamp();
    u64::try_from(timestamp).map_err(|_| anyhow!("expiry `{input}` is before 1970"))
}

fn read_pem(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))
}

/// Replace `path` with the endorsement JSON. The file is staged next to its destination and
/// renamed into place, so readers see either the previous endorsement or the new one.
fn save_endorsement(path: &Path, output: &Value) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed creating endorsement directory {}", dir.display()))?;
    }

    let mut json = serde_json::to_vec_pretty(output).context("failed encoding endorsement")?;
    json.push(b'\n');
    let staged = staging_path(path);
    fs::write(&staged, &json)
        .with_context(|| format!("failed staging endorsement at {}", staged.display()))?;
    fs::rename(&staged, path)
        .with_context(|| format!("failed moving endorsement into {}", path.display()))
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}
