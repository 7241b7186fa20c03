use clap::Parser;
use dicecode::prelude::*;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dice notations to evaluate, e.g. `7D12-5`
    #[arg(required = true, allow_hyphen_values = true, value_name = "NOTATION")]
    notations: Vec<String>,

    /// Print the minimum and maximum instead of rolling
    #[arg(short, long, default_value_t = false, conflicts_with = "samples")]
    bounds: bool,

    /// Roll each notation this many times and print a summary
    #[arg(short = 'n', long, value_name = "COUNT")]
    samples: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Emit one JSON object per notation
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Exit with an error if any notation was rejected
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Report<'a> {
    Rolled {
        input: &'a str,
        result: RollResult,
    },
    Bounds {
        input: &'a str,
        minimum: i64,
        maximum: i64,
    },
    Sampled {
        input: &'a str,
        summary: SampleSummary,
    },
    Rejected {
        input: &'a str,
        kind: NotationErrorKind,
        message: String,
    },
}

impl Report<'_> {
    fn is_rejected(&self) -> bool {
        matches!(self, Report::Rejected { .. })
    }

    fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        match self {
            Report::Rolled { result, .. } => result.pretty_print(f),
            Report::Bounds {
                input,
                minimum,
                maximum,
            } => write!(f, "{input}: min {minimum}, max {maximum}"),
            Report::Sampled { summary, .. } => summary.pretty_print(f),
            Report::Rejected { message, .. } => write!(f, "{message}"),
        }
    }
}

fn evaluate<'a>(input: &'a str, args: &Args, roller: &mut Roller) -> anyhow::Result<Report<'a>> {
    let notation = match parse_notation(input) {
        Ok(notation) => notation,
        Err(err) => {
            log::debug!("Rejected {input:?}: {:?}", err.kind());
            return Ok(Report::Rejected {
                input,
                message: err.to_string(),
                kind: err.kind,
            });
        }
    };

    let report = if args.bounds {
        let (minimum, maximum) = notation.bounds();
        Report::Bounds {
            input,
            minimum,
            maximum,
        }
    } else if let Some(samples) = args.samples {
        Report::Sampled {
            input,
            summary: sample(&notation, samples, roller)?,
        }
    } else {
        Report::Rolled {
            input,
            result: notation.roll(roller),
        }
    };
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();
    log::debug!("Starting with args: {:?}", args);

    let mut roller = match args.seed {
        Some(seed) => Roller::from_seed(seed),
        None => Roller::new(),
    };

    let start_time = chrono::Utc::now();
    let mut rejected = 0usize;

    for input in &args.notations {
        // forked so a notation's draws don't depend on how many dice earlier ones rolled
        let mut notation_roller = roller.fork();
        let report = evaluate(input, &args, &mut notation_roller)?;
        if report.is_rejected() {
            rejected += 1;
        }

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            let mut buf = String::new();
            report.pretty_print(&mut buf)?;
            println!("{buf}");
        }
    }

    let elapsed = chrono::Utc::now() - start_time;
    log::info!(
        "Evaluated {} notations ({} rejected) in {} ms",
        args.notations.len(),
        rejected,
        elapsed.num_milliseconds()
    );

    if args.strict && rejected > 0 {
        anyhow::bail!("{rejected} of {} notations were rejected", args.notations.len());
    }

    Ok(())
}
