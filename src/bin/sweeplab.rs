//! sweeplab - command-line dashboard for language-model parameter sweeps
//!
//! # Usage
//! ```sh
//! sweeplab run --prompt "Explain TCP" --name tcp-sweep --temp-min 0.2 --temp-max 0.6
//! sweeplab list
//! sweeplab show <id> --page 2 --sort creativity
//! sweeplab analytics --metric coherence --first-ten
//! sweeplab --data exported.json analytics   # offline, no backend
//! ```
//!
//! # Environment Variables
//! - `SWEEPLAB_API_URL` - backend base URL (upgraded to https)
//! - `SWEEPLAB_TIMEOUT_SECS` - request timeout (default: 120)
//! - `RUST_LOG` - log filter (default: info)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use sweeplab::analytics::{AnalyticsOptions, AnalyticsReport, MetricBreakdown};
use sweeplab::client::{ClientConfig, HttpBackend};
use sweeplab::dashboard::{
    page_slice, page_window, sort_responses, total_pages, FailureKind, RESPONSES_PER_PAGE,
};
use sweeplab::experiment::{Experiment, MetricKey, ResponseRecord, ScoreBand};
use sweeplab::export;
use sweeplab::store::{ExperimentRunner, ExperimentStore, MemoryStore};
use sweeplab::sweep::{SweepForm, DEFAULT_MAX_TOKENS};

#[derive(Parser, Debug)]
#[command(name = "sweeplab")]
#[command(author, version, about = "Configure, run and review LLM parameter-sweep experiments")]
struct Cli {
    /// Backend base URL (overrides SWEEPLAB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides SWEEPLAB_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Read experiments from a JSON file instead of the backend
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a new sweep and print the scored responses
    Run {
        /// Prompt sent for every combination
        #[arg(long)]
        prompt: String,
        /// Experiment name
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.1)]
        temp_min: f64,
        #[arg(long, default_value_t = 1.0)]
        temp_max: f64,
        #[arg(long, default_value_t = 0.1)]
        top_p_min: f64,
        #[arg(long, default_value_t = 1.0)]
        top_p_max: f64,
        /// Token budget (500-4000)
        #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
        max_tokens: u32,
        /// Metric to rank responses by
        #[arg(long, default_value = "overall")]
        sort: MetricKey,
        /// Also export the results as CSV into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Only print the request that would be sent
        #[arg(long)]
        dry_run: bool,
    },
    /// List previously run experiments
    List,
    /// Show one experiment, a page of responses at a time
    Show {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rank by this metric instead of stored order
        #[arg(long)]
        sort: Option<MetricKey>,
    },
    /// Delete an experiment
    Delete { id: String },
    /// Export an experiment's responses as CSV
    Export {
        id: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Cross-experiment analytics
    Analytics {
        #[arg(long, default_value = "overall")]
        metric: MetricKey,
        /// Restrict to these experiment ids (repeatable)
        #[arg(long = "select")]
        selection: Vec<String>,
        /// Only count the first 10 responses of each experiment
        #[arg(long)]
        first_ten: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Backend cache/latency counters
    Perf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.data {
        let store = MemoryStore::load_json(path)
            .with_context(|| format!("loading experiments from {}", path.display()))?;
        info!("Offline mode: {} experiments from {}", store.len(), path.display());
        return match cli.command {
            Command::Run { .. } | Command::Perf => {
                bail!("`run` and `perf` need the backend; drop --data")
            }
            Command::Delete { id } => {
                store.delete_experiment(&id).await?;
                store.save_json(path)?;
                println!("Deleted {id}");
                Ok(())
            }
            command => run_store_command(&store, command).await,
        };
    }

    let mut config = ClientConfig::from_env()?;
    // An explicit URL is used as typed, so local http backends work.
    if let Some(url) = cli.api_url {
        config = config.base_url(url).force_https(false);
    }
    if let Some(secs) = cli.timeout {
        config = config.timeout(Duration::from_secs(secs));
    }
    let backend = HttpBackend::new(&config)?;
    info!("Backend: {}", backend.base_url());

    match cli.command {
        Command::Run {
            prompt,
            name,
            temp_min,
            temp_max,
            top_p_min,
            top_p_max,
            max_tokens,
            sort,
            export_dir,
            dry_run,
        } => {
            let form = SweepForm::new(prompt, name)
                .temperature(temp_min, temp_max)
                .top_p(top_p_min, top_p_max)
                .max_tokens(max_tokens);
            run_sweep(&backend, &form, sort, export_dir, dry_run).await
        }
        Command::Perf => {
            let perf = backend.performance().await?;
            println!("API calls:        {}", perf.api_calls);
            println!("Cache hits:       {}", perf.cache_hits);
            println!("Cache misses:     {}", perf.cache_misses);
            println!("Cache hit rate:   {:.1}%", perf.cache_hit_rate);
            println!("Avg response:     {:.2}s", perf.avg_response_time);
            Ok(())
        }
        Command::Delete { id } => {
            backend.delete_experiment(&id).await?;
            println!("Deleted {id}");
            Ok(())
        }
        command => run_store_command(&backend, command).await,
    }
}

async fn run_sweep(
    backend: &HttpBackend,
    form: &SweepForm,
    sort: MetricKey,
    export_dir: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let request = form.build_request()?;
    let ranges = request.parameter_ranges();
    println!(
        "Sweep '{}': {} temperature x {} top-p = {} responses (max_tokens {})",
        request.experiment_name(),
        ranges.temperature_values.len(),
        ranges.top_p_values.len(),
        ranges.combination_count(),
        ranges.max_tokens
    );
    for hint in [form.temperature.hint(form.step), form.top_p.hint(form.step)]
        .into_iter()
        .flatten()
    {
        println!("  {hint}");
    }

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let experiment = match backend.create_experiment(&request).await {
        Ok(experiment) => experiment,
        Err(sweeplab::Error::Backend(message)) => {
            eprintln!("{}", FailureKind::classify(&message).user_message());
            bail!("{message}");
        }
        Err(e) => return Err(e.into()),
    };

    print_experiment_header(&experiment);
    for (i, response) in sort_responses(experiment.responses(), sort).iter().enumerate() {
        print_response(i + 1, response, sort);
    }

    if let Some(dir) = export_dir {
        let path = export::write_csv(&experiment, dir)?;
        println!("\nExported {}", path.display());
    }
    Ok(())
}

async fn run_store_command<S: ExperimentStore>(store: &S, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let experiments = store.list_experiments().await?;
            if experiments.is_empty() {
                println!("No experiments yet.");
            }
            for e in &experiments {
                let best = e.best_overall().map_or("-".to_string(), |v| format!("{v:.3}"));
                let worst = e.worst_overall().map_or("-".to_string(), |v| format!("{v:.3}"));
                println!(
                    "{:<26} {:<30} {}  {:>4} responses  best {best}  worst {worst}",
                    e.experiment_id(),
                    e.name(),
                    e.created_date(),
                    e.response_count(),
                );
            }
            Ok(())
        }
        Command::Show { id, page, sort } => {
            let experiment = store.get_experiment(&id).await?;
            print_experiment_header(&experiment);
            for b in MetricBreakdown::for_responses(experiment.responses()) {
                println!(
                    "  {:<14} avg {:.3}  max {:.3}  min {:.3}",
                    b.metric.label(),
                    b.average,
                    b.max,
                    b.min
                );
            }

            let ordered: Vec<ResponseRecord> = match sort {
                Some(metric) => sort_responses(experiment.responses(), metric)
                    .into_iter()
                    .cloned()
                    .collect(),
                None => experiment.responses().to_vec(),
            };
            let shown = sort.unwrap_or_default();
            let total = total_pages(ordered.len());
            let page = page.clamp(1, total.max(1));
            println!();
            for (i, response) in page_slice(&ordered, page).iter().enumerate() {
                print_response((page - 1) * RESPONSES_PER_PAGE + i + 1, response, shown);
            }
            let pager: Vec<String> = page_window(page, total)
                .into_iter()
                .map(|p| if p == page { format!("[{p}]") } else { p.to_string() })
                .collect();
            if total > 1 {
                println!("\nPage {page} of {total}: {}", pager.join(" "));
            }
            Ok(())
        }
        Command::Export { id, dir } => {
            let experiment = store.get_experiment(&id).await?;
            let path = export::write_csv(&experiment, dir)?;
            println!("Exported {}", path.display());
            Ok(())
        }
        Command::Analytics {
            metric,
            selection,
            first_ten,
            json,
        } => {
            let experiments = store.list_experiments().await?;
            let options = AnalyticsOptions::for_metric(metric)
                .with_selection(selection)
                .include_all_responses(!first_ten);
            let report = AnalyticsReport::compute(&experiments, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Command::Run { .. } | Command::Perf | Command::Delete { .. } => {
            bail!("command not supported by this store")
        }
    }
}

fn print_experiment_header(experiment: &Experiment) {
    println!("=== {} ({}) ===", experiment.name(), experiment.experiment_id());
    println!("Created:   {}", experiment.created_at().format("%Y-%m-%d %H:%M UTC"));
    println!("Prompt:    {}", experiment.prompt());
    println!("Responses: {}", experiment.response_count());
    if !experiment.response_count_matches() {
        println!(
            "  (backend reported {} but sent {})",
            experiment.response_count(),
            experiment.responses().len()
        );
    }
}

fn print_response(rank: usize, response: &ResponseRecord, metric: MetricKey) {
    let score = response.metrics.get(metric);
    let band = match ScoreBand::of(score) {
        ScoreBand::High => "high",
        ScoreBand::Medium => "medium",
        ScoreBand::Low => "low",
    };
    let preview: String = response.text.chars().take(80).collect();
    println!(
        "#{rank:<3} T={:.1} P={:.1}  {}={score:.3} ({band})  {}",
        response.parameters.temperature,
        response.parameters.top_p,
        metric.as_str(),
        preview.replace('\n', " ")
    );
}

fn print_report(report: &AnalyticsReport) {
    let s = &report.summary;
    println!("=== Analytics: {} ===", report.metric.label());
    println!("Total responses:  {}", s.count);
    println!("Avg {}:      {:.3}", report.metric.as_str(), s.mean);
    println!("Best score:       {:.3}", s.max);
    println!("Parameter range:  {}", s.parameter_range);

    println!("\nTrend:");
    for point in &report.trend {
        let value = point.value.map_or("no data".to_string(), |v| format!("{v:.3}"));
        println!(
            "  {:<30} {}  {value}  ({} responses)",
            point.name, point.date, point.response_count
        );
    }

    println!("\nParameter pairs:");
    for point in &report.correlation {
        println!(
            "  T={:.1} P={:.1}  {:.3}  (n={})",
            point.temperature, point.top_p, point.value, point.count
        );
    }
}
