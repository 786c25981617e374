use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use hm_common::{
    api::{decode_record, decode_records, ListingRecord, MatchStats, RecordError, UserRecord},
    corrections::{correct_gender_preference, GenderPreference},
    logging::{init_tracing_subscriber, install_tracing_panic_hook},
    matching::{match_stats, LabelConfig, ListingFilter, RankingEngine, RankingEngineConfig},
    normalize::normalize_listing,
};
use serde::Serialize;
use tracing::info;

const APP_NAME: &str = "hm-ranker";

#[derive(Debug, Parser)]
#[command(
    name = "hm-ranker",
    about = "Score roommates and listings from exported hostel-match records"
)]
struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true, env = "HM_PRETTY")]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank roommate candidates for one student
    Roommates {
        /// Searching student's record (`-` for stdin)
        #[arg(long, env = "HM_USER_FILE")]
        user: PathBuf,
        /// Candidate student records (array or `{"data": [...]}`)
        #[arg(long)]
        candidates: PathBuf,
    },
    /// Normalize, filter and score listings for one student
    Listings {
        #[arg(long, env = "HM_USER_FILE")]
        user: PathBuf,
        #[arg(long)]
        listings: PathBuf,
        #[command(flatten)]
        filter: ListingFilterArgs,
    },
    /// Print listings in canonical form without scoring
    Normalize {
        #[arg(long)]
        listings: PathBuf,
    },
}

#[derive(Debug, Clone, Default, Args)]
struct ListingFilterArgs {
    /// Minimum starting price
    #[arg(long)]
    min_price: Option<f64>,
    /// Maximum starting price
    #[arg(long)]
    max_price: Option<f64>,
    /// Required amenity; repeat for several
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Gender the listing must accept (male, female, any)
    #[arg(long, value_parser = parse_gender_preference)]
    gender: Option<GenderPreference>,
}

impl From<ListingFilterArgs> for ListingFilter {
    fn from(args: ListingFilterArgs) -> Self {
        ListingFilter {
            min_price: args.min_price,
            max_price: args.max_price,
            amenities: args.amenities,
            gender: args.gender,
        }
    }
}

fn parse_gender_preference(raw: &str) -> Result<GenderPreference, String> {
    correct_gender_preference(raw).ok_or_else(|| format!("unknown gender preference: {raw}"))
}

#[derive(Debug, thiserror::Error)]
enum RankerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode records: {0}")]
    Record(#[from] RecordError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankerOutput<T> {
    generated_at: DateTime<Utc>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<MatchStats>,
    results: Vec<T>,
}

impl<T> RankerOutput<T> {
    fn new(generated_at: DateTime<Utc>, results: Vec<T>) -> Self {
        Self {
            generated_at,
            count: results.len(),
            stats: None,
            results,
        }
    }
}

fn read_input(path: &Path) -> Result<String, RankerError> {
    let io_err = |source| RankerError::Io {
        path: path.display().to_string(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(io_err)
}

fn rank_roommates(
    engine: &RankingEngine,
    user_json: &str,
    candidates_json: &str,
    now: DateTime<Utc>,
) -> Result<RankerOutput<hm_common::api::AnnotatedMatch>, RankerError> {
    let user: UserRecord = decode_record(user_json)?;
    let candidates: Vec<UserRecord> = decode_records(candidates_json)?;

    let matches = engine.rank_roommates(&user, &candidates);
    let stats = match_stats(&matches);
    let user_id = user.id_text().unwrap_or_else(|| "unknown".into());
    info!(
        user = %user_id,
        candidates = candidates.len(),
        matches = stats.total_matches,
        high = stats.high,
        "ranked roommates"
    );

    let mut output = RankerOutput::new(now, matches);
    output.stats = Some(stats);
    Ok(output)
}

fn annotate_listings(
    engine: &RankingEngine,
    user_json: &str,
    listings_json: &str,
    filter: &ListingFilter,
    now: DateTime<Utc>,
) -> Result<RankerOutput<hm_common::api::AnnotatedListing>, RankerError> {
    let user: UserRecord = decode_record(user_json)?;
    let records: Vec<ListingRecord> = decode_records(listings_json)?;

    let annotated = engine.annotate_listings(&user, &records, filter);
    let user_id = user.id_text().unwrap_or_else(|| "unknown".into());
    info!(
        user = %user_id,
        listings = records.len(),
        kept = annotated.len(),
        "annotated listings"
    );
    Ok(RankerOutput::new(now, annotated))
}

fn normalize_listings(
    listings_json: &str,
    now: DateTime<Utc>,
) -> Result<RankerOutput<hm_common::normalize::NormalizedListing>, RankerError> {
    let records: Vec<ListingRecord> = decode_records(listings_json)?;
    let listings: Vec<_> = records.iter().map(normalize_listing).collect();
    info!(listings = listings.len(), "normalized listings");
    Ok(RankerOutput::new(now, listings))
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, RankerError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn run(cli: Cli) -> Result<String, RankerError> {
    let engine = RankingEngine::new(RankingEngineConfig {
        labels: LabelConfig::from_env(),
        ..RankingEngineConfig::default()
    });
    let now = Utc::now();

    match cli.command {
        Command::Roommates { user, candidates } => {
            let output = rank_roommates(&engine, &read_input(&user)?, &read_input(&candidates)?, now)?;
            render(&output, cli.pretty)
        }
        Command::Listings {
            user,
            listings,
            filter,
        } => {
            let output = annotate_listings(
                &engine,
                &read_input(&user)?,
                &read_input(&listings)?,
                &filter.into(),
                now,
            )?;
            render(&output, cli.pretty)
        }
        Command::Normalize { listings } => {
            let output = normalize_listings(&read_input(&listings)?, now)?;
            render(&output, cli.pretty)
        }
    }
}

fn main() {
    dotenv().ok();
    init_tracing_subscriber(APP_NAME);
    install_tracing_panic_hook(APP_NAME);

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!(error = %err, "{APP_NAME} failed");
            std::process::exit(1);
        }
    }
}
