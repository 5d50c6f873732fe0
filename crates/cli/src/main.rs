use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratecard_core::advice::{self, PipelineHealth};
use ratecard_core::format::PlainPresenter;
use ratecard_core::wizard::{JsonFileStore, Stage, Wizard};
use ratecard_core::{CompensationInputs, Fraction, Percentage};

mod report;

#[derive(Debug, Parser)]
#[command(name = "ratecard", about = "Convert between salary and fractional consulting rates")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute hourly, daily, and annual figures.
    Compute(ComputeArgs),

    /// Print the utilization category for a percentage (0-100).
    Classify {
        #[arg(long, allow_negative_numbers = true)]
        utilization: f64,
    },

    /// Detailed recommendation for a utilization percentage and pipeline health.
    Recommend {
        #[arg(long, allow_negative_numbers = true)]
        utilization: f64,
        #[arg(long)]
        pipeline: PipelineHealth,
    },

    /// Severity-tagged advice for a utilization percentage and pipeline health.
    Advise {
        #[arg(long, allow_negative_numbers = true)]
        utilization: f64,
        #[arg(long)]
        pipeline: PipelineHealth,
    },

    /// Inspect or move through the calculator stages saved on this device.
    Progress {
        /// Overrides RATECARD_PROGRESS_DIR.
        #[arg(long)]
        store_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: ProgressAction,
    },
}

#[derive(Debug, Subcommand)]
enum ProgressAction {
    Show,
    Complete,
    Goto { stage: Stage },
    Reset,
}

#[derive(Debug, ClapArgs)]
struct ComputeArgs {
    /// JSON file with camelCase inputs; flags below override its values.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    base_salary: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    annual_bonus: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    annual_equity_fmv: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    hourly_rate: Option<f64>,
    /// Decimal, e.g. 0.25.
    #[arg(long, allow_negative_numbers = true)]
    overhead: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    hours_per_day: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    vacation_days: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    public_holidays: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    other_leave_days: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    training_days: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    project_work: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    bd: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    invoicing: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    admin: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    risk_tolerance: Option<f64>,

    /// Reject degenerate inputs instead of computing them.
    #[arg(long)]
    strict: bool,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

impl ComputeArgs {
    fn to_inputs(&self) -> anyhow::Result<CompensationInputs> {
        let mut inputs = match &self.input {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("read {} failed", path.display()))?;
                serde_json::from_str(&raw).with_context(|| {
                    format!("{} is not valid compensation input JSON", path.display())
                })?
            }
            None => CompensationInputs::default(),
        };

        let frac = |v: Option<f64>| v.map(Fraction::new);
        overlay(&mut inputs.base_salary, self.base_salary);
        overlay(&mut inputs.annual_bonus, self.annual_bonus);
        overlay(&mut inputs.annual_equity_fmv, self.annual_equity_fmv);
        overlay(&mut inputs.fractional_hourly_input, self.hourly_rate);
        overlay(&mut inputs.overhead_pct, frac(self.overhead));
        overlay(&mut inputs.hours_per_day, self.hours_per_day);
        overlay(&mut inputs.vacation_days, self.vacation_days);
        overlay(&mut inputs.public_holidays, self.public_holidays);
        overlay(&mut inputs.other_leave_days, self.other_leave_days);
        overlay(&mut inputs.training_days, self.training_days);
        overlay(&mut inputs.project_work_pct, frac(self.project_work));
        overlay(&mut inputs.bd_pct, frac(self.bd));
        overlay(&mut inputs.invoicing_pct, frac(self.invoicing));
        overlay(&mut inputs.admin_pct, frac(self.admin));
        overlay(&mut inputs.risk_tolerance_pct, frac(self.risk_tolerance));

        Ok(inputs)
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = ratecard_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(args, &settings) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "command failed");
        return Err(err);
    }
    Ok(())
}

fn run(args: Args, settings: &ratecard_core::config::Settings) -> anyhow::Result<()> {
    let presenter = PlainPresenter::new(settings.currency_symbol());

    match args.command {
        Command::Compute(compute) => {
            let inputs = compute.to_inputs()?;
            let results = if compute.strict {
                ratecard_core::compute_checked(&inputs)?
            } else {
                ratecard_core::compute(&inputs)
            };
            tracing::debug!(
                total_annual_comp = results.total_annual_comp,
                working_days_per_year = results.working_days_per_year,
                "computed compensation"
            );

            if compute.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::compensation(&results, &presenter));
            }
        }
        Command::Classify { utilization } => {
            println!(
                "{}",
                advice::classify_utilization(Percentage::new(utilization))
            );
        }
        Command::Recommend {
            utilization,
            pipeline,
        } => {
            let rendered = advice::recommend(Percentage::new(utilization), pipeline);
            print!("{}", report::recommendation(&rendered));
        }
        Command::Advise {
            utilization,
            pipeline,
        } => {
            print!(
                "{}",
                report::advice(advice::assess(Percentage::new(utilization), pipeline))
            );
        }
        Command::Progress { store_dir, action } => {
            let dir = store_dir.unwrap_or_else(|| settings.progress_dir());
            let store = JsonFileStore::new(dir);
            tracing::debug!(dir = %store.dir().display(), "opening progress store");
            let mut wizard = Wizard::open(store)?;
            match action {
                ProgressAction::Show => {}
                ProgressAction::Complete => {
                    wizard.complete_current()?;
                }
                ProgressAction::Goto { stage } => wizard.go_to(stage)?,
                ProgressAction::Reset => wizard.reset()?,
            }
            print!("{}", report::progress(wizard.state(), &presenter));
        }
    }

    Ok(())
}

fn init_sentry(settings: &ratecard_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
