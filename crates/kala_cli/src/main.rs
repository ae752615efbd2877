use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use kala_core::{Body, Instant, SignPosition, ZodiacSign};
use kala_ephem::MeanElementOracle;
use kala_search::{
    AspectKind, Constraint, Outcome, SearchConfig, SearchDirection, find_event_with_stats,
    handle_find_event_json, planet_position, sky_at,
};
use kala_time::Duration;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit status when the search range is exhausted.
const EXIT_NOT_FOUND: i32 = 3;
/// Exit status for malformed input.
const EXIT_BAD_REQUEST: i32 = 1;
/// Exit status for oracle or internal failures.
const EXIT_INTERNAL: i32 = 2;

#[derive(Parser)]
#[command(name = "kala", version, about = "When do these sky conditions hold?")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the nearest instant at which all constraints hold
    FindEvent {
        /// JSON request file ({constraints, direction, startTime}); overrides the flags below
        #[arg(long)]
        request: Option<PathBuf>,
        /// Aspect constraint: BODY_A,BODY_B,ASPECT,ORB (e.g. Sun,Moon,conjunction,2)
        #[arg(long, value_parser = parse_aspect)]
        aspect: Vec<Constraint>,
        /// Sign constraint: BODY,SIGN (e.g. Sun,Pisces)
        #[arg(long = "in-sign", value_parser = parse_in_sign)]
        in_sign: Vec<Constraint>,
        /// Degree constraint: BODY,DEGREE,ORB (e.g. Mars,15,1)
        #[arg(long = "at-degree", value_parser = parse_at_degree)]
        at_degree: Vec<Constraint>,
        /// Search direction: future or past
        #[arg(long, default_value = "future")]
        direction: SearchDirection,
        /// Start instant (ISO-8601, UTC if no offset); defaults to now
        #[arg(long)]
        start: Option<Instant>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
        /// Print evaluation counts to stderr
        #[arg(long)]
        stats: bool,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Ecliptic longitude of one body
    Longitude {
        /// Body name (Sun, Moon, Mercury, ..., NorthNode, SouthNode)
        #[arg(long)]
        body: Body,
        /// Instant (ISO-8601); defaults to now
        #[arg(long)]
        at: Option<Instant>,
    },
    /// Positions of every body at one instant
    SkyAt {
        /// Instant (ISO-8601); defaults to now
        #[arg(long)]
        at: Option<Instant>,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Zodiac sign of an ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees (any real value)
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
}

/// Overrides for the search configuration defaults.
#[derive(clap::Args)]
struct TuningArgs {
    /// Coarse scan step in hours (default 24)
    #[arg(long)]
    coarse_step_hours: Option<f64>,
    /// Bisection half-window in minutes (default 60)
    #[arg(long)]
    fine_window_minutes: Option<f64>,
    /// Final precision in milliseconds (default 1000)
    #[arg(long)]
    precision_ms: Option<i64>,
    /// Coarse probe cap (default 3650)
    #[arg(long)]
    max_coarse_steps: Option<u32>,
    /// Bisection iteration cap (default 100)
    #[arg(long)]
    max_bisection_steps: Option<u32>,
    /// Start from the minute-precision preset instead of the defaults
    #[arg(long)]
    fast: bool,
}

impl TuningArgs {
    fn to_config(&self) -> SearchConfig {
        let mut config = if self.fast {
            SearchConfig::fast()
        } else {
            SearchConfig::default()
        };
        if let Some(h) = self.coarse_step_hours {
            config.coarse_step = fractional_ms(h * 3_600_000.0);
        }
        if let Some(m) = self.fine_window_minutes {
            config.fine_window = fractional_ms(m * 60_000.0);
        }
        if let Some(ms) = self.precision_ms {
            config.precision = Duration::try_milliseconds(ms).unwrap_or_else(Duration::zero);
        }
        if let Some(n) = self.max_coarse_steps {
            config.max_coarse_steps = n;
        }
        if let Some(n) = self.max_bisection_steps {
            config.max_bisection_steps = n;
        }
        config
    }
}

/// Round to whole milliseconds; non-finite or out-of-range input maps to
/// zero and is then rejected by config validation.
fn fractional_ms(ms: f64) -> Duration {
    if ms.is_finite() {
        Duration::try_milliseconds(ms.round() as i64).unwrap_or_else(Duration::zero)
    } else {
        Duration::zero()
    }
}

fn split_fields<const N: usize>(s: &str, usage: &str) -> Result<[String; N], String> {
    let parts: Vec<String> = s.split(',').map(|p| p.trim().to_string()).collect();
    parts
        .try_into()
        .map_err(|_| format!("expected {usage}, got {s:?}"))
}

fn parse_number(field: &str, what: &str) -> Result<f64, String> {
    field
        .parse::<f64>()
        .map_err(|e| format!("invalid {what} {field:?}: {e}"))
}

fn parse_aspect(s: &str) -> Result<Constraint, String> {
    let [a, b, aspect, orb] = split_fields::<4>(s, "BODY_A,BODY_B,ASPECT,ORB")?;
    let a: Body = a.parse().map_err(|e| format!("{e}"))?;
    let b: Body = b.parse().map_err(|e| format!("{e}"))?;
    let aspect: AspectKind = aspect.parse().map_err(|e| format!("{e}"))?;
    let orb = parse_number(&orb, "orb")?;
    Ok(Constraint::aspect(a, b, aspect, orb))
}

fn parse_in_sign(s: &str) -> Result<Constraint, String> {
    let [body, sign] = split_fields::<2>(s, "BODY,SIGN")?;
    let body: Body = body.parse().map_err(|e| format!("{e}"))?;
    let sign: ZodiacSign = sign.parse().map_err(|e| format!("{e}"))?;
    Ok(Constraint::in_sign(body, sign))
}

fn parse_at_degree(s: &str) -> Result<Constraint, String> {
    let [body, degree, orb] = split_fields::<3>(s, "BODY,DEGREE,ORB")?;
    let body: Body = body.parse().map_err(|e| format!("{e}"))?;
    let degree = parse_number(&degree, "degree")?;
    let orb = parse_number(&orb, "orb")?;
    Ok(Constraint::at_degree(body, degree, orb))
}

fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Found { .. } => 0,
        Outcome::NotFound => EXIT_NOT_FOUND,
        Outcome::BadRequest(_) => EXIT_BAD_REQUEST,
        Outcome::Internal(_) => EXIT_INTERNAL,
    }
}

fn report(outcome: &Outcome, json: bool) -> ! {
    if json {
        println!("{}", outcome.to_json());
    } else {
        match outcome {
            Outcome::Found { timestamp } => println!("{timestamp}"),
            Outcome::NotFound => println!("No event found within search bounds"),
            Outcome::BadRequest(msg) | Outcome::Internal(msg) => eprintln!("Error: {msg}"),
        }
    }
    process::exit(exit_code(outcome));
}

fn format_position(longitude_deg: f64, sign: ZodiacSign, degree_in_sign: f64) -> String {
    format!("{longitude_deg:>9.4} deg  {:<11} {degree_in_sign:>7.4} deg", sign.name())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let oracle = MeanElementOracle::new();

    match cli.command {
        Commands::FindEvent {
            request,
            aspect,
            in_sign,
            at_degree,
            direction,
            start,
            json,
            stats,
            tuning,
        } => {
            let config = tuning.to_config();

            if let Some(path) = request {
                let body = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                    eprintln!("Failed to read {}: {e}", path.display());
                    process::exit(EXIT_BAD_REQUEST);
                });
                let outcome = handle_find_event_json(&oracle, &body, &config);
                report(&outcome, json);
            }

            let constraints: Vec<Constraint> =
                aspect.into_iter().chain(in_sign).chain(at_degree).collect();
            if constraints.is_empty() {
                report(
                    &Outcome::BadRequest("Constraints are required".to_string()),
                    json,
                );
            }
            let start = start.unwrap_or_else(Instant::now);
            debug!(%start, %direction, count = constraints.len(), "searching");

            let result = find_event_with_stats(&oracle, &constraints, direction, start, &config);
            if stats {
                if let Ok(r) = &result {
                    let s = r.stats;
                    eprintln!(
                        "coarse probes: {}  bisection steps: {}  boundary probes: {}  evaluations: {}",
                        s.coarse_probes, s.bisection_steps, s.boundary_probes, s.evaluations
                    );
                }
            }
            report(&Outcome::from(result.map(|r| r.event)), json);
        }

        Commands::Longitude { body, at } => {
            let at = at.unwrap_or_else(Instant::now);
            match planet_position(&oracle, body, at) {
                Ok(p) => {
                    println!("{body} at {at}");
                    println!(
                        "  {}",
                        format_position(p.longitude_deg, p.sign, p.degree_in_sign)
                    );
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(EXIT_INTERNAL);
                }
            }
        }

        Commands::SkyAt { at, json } => {
            let at = at.unwrap_or_else(Instant::now);
            let sky = sky_at(&oracle, at).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(EXIT_INTERNAL);
            });
            if json {
                match serde_json::to_string_pretty(&sky) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        process::exit(EXIT_INTERNAL);
                    }
                }
            } else {
                println!("Sky at {at}");
                for p in &sky.positions {
                    println!(
                        "  {:<10} {}",
                        p.body.name(),
                        format_position(p.longitude_deg, p.sign, p.degree_in_sign)
                    );
                }
                if !sky.unsupported.is_empty() {
                    let names: Vec<&str> = sky.unsupported.iter().map(|b| b.name()).collect();
                    println!("  Not modeled: {}", names.join(", "));
                }
            }
        }

        Commands::Sign { lon } => {
            let p = SignPosition::from_longitude(lon);
            println!(
                "{}",
                format_position(p.longitude_deg, p.sign, p.degree_in_sign)
            );
        }
    }
}
