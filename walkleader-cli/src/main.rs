use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use walkleader_core::{
    leader_match_result, prior_matches_from_walks, ContactDetails, Member, PriorContactMemberMatch,
    PriorEvidenceIndex,
};
use walkleader_ingest::{parse_roster_csv, parse_walks_json, walks_since, WalkRecord};

mod config;
mod report;
mod state;

use config::{Config, OutputFormat};
use report::{resolve_pending, summary_lines, ResolutionRow};

#[derive(Parser, Debug)]
#[command(
    name = "walkleader",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WALKLEADER_BUILD_SHA"), ")"),
    about = "Match walk leaders to club roster members"
)]
struct Cli {
    /// Config file (default: ~/.walkleader/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log matching decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single leader contact against the roster
    Resolve {
        #[command(flatten)]
        inputs: Inputs,

        /// External contact id / alias
        #[arg(long)]
        contact_id: Option<String>,

        /// Known internal member id
        #[arg(long)]
        member_id: Option<String>,

        /// Leader display name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Resolve every unattributed walk in a pending-walks JSON export
    Batch {
        #[command(flatten)]
        inputs: Inputs,

        /// Walks awaiting attribution
        #[arg(long)]
        pending: PathBuf,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show prior contact/member pairings built from walk history
    History {
        /// Walk history JSON
        #[arg(long)]
        history: Option<PathBuf>,

        /// Ignore history walks before this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Only show pairings found for this contact id
        #[arg(long)]
        contact_id: Option<String>,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct Inputs {
    /// Roster CSV
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Walk history JSON used as prior evidence
    #[arg(long)]
    history: Option<PathBuf>,

    /// Ignore history walks before this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Resolve {
            inputs,
            contact_id,
            member_id,
            name,
            email,
            phone,
            format,
        } => {
            let members = load_roster(&inputs, &cfg)?;
            let prior = load_prior(inputs.history.as_deref(), inputs.since, &cfg)?;
            let contact = ContactDetails {
                contact_id,
                member_id,
                display_name: name,
                email,
                phone,
            };

            let result = leader_match_result(&members, &contact, &prior);
            let row = ResolutionRow::from_result(None, &result);

            match format.unwrap_or(cfg.output.format) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&row)?),
                OutputFormat::Text => println!("{}", row.to_line()),
            }
        }

        Command::Batch {
            inputs,
            pending,
            format,
        } => {
            let members = load_roster(&inputs, &cfg)?;
            let prior = load_prior(inputs.history.as_deref(), inputs.since, &cfg)?;
            let pending_walks = load_walks(&pending)?;

            let index = PriorEvidenceIndex::new(&prior);
            let report = resolve_pending(&members, &pending_walks, &index);
            info!(
                "batch: {} pending walk(s), {} prior pairing(s)",
                pending_walks.len(),
                prior.len()
            );

            match format.unwrap_or(cfg.output.format) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    for row in &report.rows {
                        println!("{}", row.to_line());
                    }
                    println!();
                    for line in summary_lines(&report.summary) {
                        println!("{}", line);
                    }
                }
            }
        }

        Command::History {
            history,
            since,
            contact_id,
        } => {
            let Some(prior_path) = history.or_else(|| cfg.paths.history.clone()) else {
                bail!(
                    "No walk history given. Pass --history <json> or set [paths] history in config"
                );
            };
            let prior = load_prior(Some(prior_path.as_path()), since, &cfg)?;

            match contact_id {
                Some(id) => {
                    let index = PriorEvidenceIndex::new(&prior);
                    let hits = index.matches_for_contact_id(id.as_str());
                    if hits.is_empty() {
                        println!("No usable history for {:?}", id);
                    }
                    for p in hits {
                        print_prior(p);
                    }
                }
                None => {
                    println!("{} pairing(s) from {}\n", prior.len(), prior_path.display());
                    for p in &prior {
                        print_prior(p);
                    }
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn print_prior(p: &PriorContactMemberMatch) {
    println!("{:<20} -> {:<12} x{}", p.contact_id, p.member_id, p.count);
}

fn load_roster(inputs: &Inputs, cfg: &Config) -> Result<Vec<Member>> {
    let Some(path) = inputs.roster.clone().or_else(|| cfg.paths.roster.clone()) else {
        bail!("No roster given. Pass --roster <csv> or set [paths] roster in config");
    };
    if !path.exists() {
        bail!("Roster not found: {} (pass --roster <path>)", path.display());
    }
    let members = parse_roster_csv(&path).with_context(|| format!("parsing {}", path.display()))?;
    info!("loaded {} member(s) from {}", members.len(), path.display());
    Ok(members)
}

fn load_walks(path: &Path) -> Result<Vec<WalkRecord>> {
    if !path.exists() {
        bail!("Walk file not found: {}", path.display());
    }
    parse_walks_json(path)
}

/// Prior pairings from the history file, if any. No history means no prior evidence.
fn load_prior(
    history: Option<&Path>,
    since: Option<NaiveDate>,
    cfg: &Config,
) -> Result<Vec<PriorContactMemberMatch>> {
    let Some(path) = history.map(Path::to_path_buf).or_else(|| cfg.paths.history.clone()) else {
        return Ok(Vec::new());
    };

    let mut walks = load_walks(&path)?;
    if let Some(since) = since.or(cfg.history.since) {
        walks = walks_since(walks, since);
    }

    let prior = prior_matches_from_walks(&walks);
    info!(
        "{} history walk(s) from {} -> {} pairing(s)",
        walks.len(),
        path.display(),
        prior.len()
    );
    Ok(prior)
}
