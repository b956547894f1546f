//! u-santa: draw Secret Santa pairs from CSV files.
//!
//! Dry run (default): prints the pairs for review and sends nothing.
//! `--send`: delivers one notification per giver instead of printing the
//! pairs, through `--smtp-host` when given (feature `smtp`), otherwise
//! into `--outbox` as `.eml` files. The SMTP password is read from the
//! `U_SANTA_SMTP_PASSWORD` environment variable.
//!
//! Exit status: 0 on success, 1 on malformed input or I/O failure, 2 when
//! the constraints admit no assignment.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use u_santa::assign::{AssignConfig, AssignOutcome, AssignRunner, ForbiddenPair, Pair};
use u_santa::io::{read_forbidden_pairs, read_pairs, read_participants, write_matches, write_pairs};
use u_santa::notify::{dispatch, FileTransport, MessageTemplate, Transport};
use u_santa::preview::{match_rows, render_table};

#[derive(Debug, Parser)]
#[command(name = "u-santa", version, about = "Draw Secret Santa pairs under exclusion constraints")]
struct Args {
    /// Participants CSV (headers: name,email)
    #[arg(short, long, value_name = "CSV")]
    participants: PathBuf,

    /// Last year's matches CSV (headers: giver_email,receiver_email)
    #[arg(long, value_name = "CSV")]
    previous: Option<PathBuf>,

    /// Forbidden pairs CSV (headers: giver_email,receiver_email)
    #[arg(long, value_name = "CSV")]
    forbidden: Option<PathBuf>,

    /// Block only the listed direction of each forbidden pair
    #[arg(long)]
    asymmetric: bool,

    /// Seed for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,

    /// Write the full match table (names and emails) to this CSV
    #[arg(long, value_name = "CSV")]
    matches_out: Option<PathBuf>,

    /// Save giver/receiver pairs for next year's --previous
    #[arg(long, value_name = "CSV")]
    pairs_out: Option<PathBuf>,

    /// Deliver notifications instead of printing the pairs
    #[arg(long)]
    send: bool,

    /// Directory receiving one .eml file per giver
    #[arg(long, value_name = "DIR")]
    outbox: Option<PathBuf>,

    /// Sender address shown to recipients
    #[arg(long, value_name = "EMAIL")]
    from: Option<String>,

    /// Subject template
    #[arg(long)]
    subject: Option<String>,

    /// File holding the body template
    #[arg(long, value_name = "FILE")]
    body_file: Option<PathBuf>,

    #[cfg(feature = "smtp")]
    #[command(flatten)]
    smtp: SmtpArgs,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "smtp")]
#[derive(Debug, clap::Args)]
struct SmtpArgs {
    /// SMTP relay host; with --send, deliver through it instead of --outbox
    #[arg(long, value_name = "HOST")]
    smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, value_name = "PORT", default_value_t = u_santa::notify::DEFAULT_SMTP_PORT)]
    smtp_port: u16,

    /// SMTP login (password from U_SANTA_SMTP_PASSWORD)
    #[arg(long, value_name = "USER")]
    smtp_user: Option<String>,

    /// Upgrade a plain connection with STARTTLS instead of implicit TLS
    #[arg(long)]
    starttls: bool,
}

#[cfg(feature = "smtp")]
const SMTP_PASSWORD_VAR: &str = "U_SANTA_SMTP_PASSWORD";

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!(
                "No valid matching exists with the given constraints. \
                 Consider relaxing forbidden pairs or previous matches, or adding more participants."
            );
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Returns whether an assignment was found.
fn run(args: &Args) -> Result<bool> {
    let participants = read_participants(open(&args.participants)?)
        .with_context(|| format!("reading participants from {}", args.participants.display()))?;

    let prior: Vec<Pair> = match &args.previous {
        Some(path) => read_pairs(open(path)?)
            .with_context(|| format!("reading previous matches from {}", path.display()))?,
        None => Vec::new(),
    };

    let forbidden: Vec<ForbiddenPair> = match &args.forbidden {
        Some(path) => read_forbidden_pairs(open(path)?, !args.asymmetric)
            .with_context(|| format!("reading forbidden pairs from {}", path.display()))?,
        None => Vec::new(),
    };

    info!(
        participants = participants.len(),
        prior = prior.len(),
        forbidden = forbidden.len(),
        "inputs loaded"
    );

    let config = AssignConfig {
        seed: args.seed,
        ..AssignConfig::default()
    };
    let result = AssignRunner::run(&participants, &prior, &forbidden, &config)?;

    let assignment = match result.outcome {
        AssignOutcome::Assigned(a) => a,
        AssignOutcome::NoSolution => return Ok(false),
    };

    if args.send {
        let Some(from) = &args.from else {
            bail!("--send requires --from");
        };

        let mut template = MessageTemplate::default();
        if let Some(subject) = &args.subject {
            template = template.with_subject(subject.as_str());
        }
        if let Some(path) = &args.body_file {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("reading body template from {}", path.display()))?;
            template = template.with_body(body);
        }

        let mut transport = transport(args)?;
        let report = dispatch(&participants, &assignment, &template, from, transport.as_mut())?;

        println!("Messages sent: {}", report.sent);
        for failure in &report.failures {
            eprintln!("{}: {}", failure.recipient, failure.reason);
        }
    } else {
        println!("Matches generated (dry run, nothing sent):\n");
        print!("{}", render_table(&match_rows(&participants, &assignment)?));
    }

    if let Some(path) = &args.matches_out {
        write_matches(create(path)?, &participants, &assignment)
            .with_context(|| format!("writing matches to {}", path.display()))?;
    }

    if let Some(path) = &args.pairs_out {
        write_pairs(create(path)?, &assignment)
            .with_context(|| format!("writing pairs to {}", path.display()))?;
        info!(path = %path.display(), "pairs saved for next run");
    }

    Ok(true)
}

/// Picks the delivery path for `--send`.
fn transport(args: &Args) -> Result<Box<dyn Transport>> {
    #[cfg(feature = "smtp")]
    if let Some(host) = &args.smtp.smtp_host {
        use u_santa::notify::{SmtpConfig, SmtpRelay, SmtpSecurity};

        let security = if args.smtp.starttls {
            SmtpSecurity::StartTls
        } else {
            SmtpSecurity::Tls
        };
        let mut config = SmtpConfig::new(host.as_str())
            .with_port(args.smtp.smtp_port)
            .with_security(security);
        if let Some(user) = &args.smtp.smtp_user {
            let password = std::env::var(SMTP_PASSWORD_VAR)
                .with_context(|| format!("--smtp-user requires {SMTP_PASSWORD_VAR}"))?;
            config = config.with_credentials(user.as_str(), password);
        }

        let relay = SmtpRelay::new(config)?;
        relay
            .verify()
            .with_context(|| format!("connecting to {host}:{}", args.smtp.smtp_port))?;
        info!(host = %host, "delivering through SMTP relay");
        return Ok(Box::new(relay));
    }

    let Some(outbox) = &args.outbox else {
        bail!("--send requires --outbox or --smtp-host");
    };
    let transport = FileTransport::new(outbox)
        .with_context(|| format!("preparing outbox {}", outbox.display()))?;
    Ok(Box::new(transport))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("u_santa=debug")
        } else {
            EnvFilter::new("u_santa=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
