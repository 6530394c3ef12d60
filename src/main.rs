use clap::{Args as ClapArgs, Parser, Subcommand};
use reprsim::{
    simulate, AnalysisConfig, CorrelationMethod, MetricKind, RsaAnalysis, SimulationConfig,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Representational Similarity Analysis toolkit
#[derive(Parser, Debug)]
#[command(name = "reprsim")]
#[command(about = "Compare similarity structure across two domains", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate stimulus and neural data and run RSA on them
    Simulate(SimulateArgs),
    /// List the supported similarity metrics
    Metrics,
}

#[derive(ClapArgs, Debug)]
struct SimulateArgs {
    /// Number of items
    #[arg(long, default_value_t = 8)]
    items: usize,

    /// Features per item in the stimulus domain
    #[arg(long, default_value_t = 5)]
    stimulus_features: usize,

    /// Channels per item in the neural domain
    #[arg(long, default_value_t = 20)]
    neural_features: usize,

    /// Amplitude of the noise added to neural data
    #[arg(long, default_value_t = 0.5)]
    noise: f64,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Analysis configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metric for the stimulus matrix (overrides the config file)
    #[arg(long)]
    model_metric: Option<MetricKind>,

    /// Metric for the neural matrix (overrides the config file)
    #[arg(long)]
    neural_metric: Option<MetricKind>,

    /// Correlation method, may be repeated (overrides the config file)
    #[arg(long = "method")]
    methods: Vec<CorrelationMethod>,

    /// Include both lower triangles in the output
    #[arg(long)]
    triples: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Simulate(sim) => run_simulation(sim),
        Command::Metrics => {
            for metric in MetricKind::ALL {
                let (lo, hi) = metric.range();
                println!(
                    "{:<28} diagonal={} range=[{}, {}]",
                    metric.as_str(),
                    metric.diagonal(),
                    lo,
                    hi
                );
            }
            Ok(())
        }
    }
}

fn run_simulation(args: SimulateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading analysis config from {:?}", path);
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(metric) = args.model_metric {
        config.model_metric = metric;
    }
    if let Some(metric) = args.neural_metric {
        config.neural_metric = metric;
    }
    if !args.methods.is_empty() {
        config.methods = args.methods;
    }

    let sim_config = SimulationConfig {
        n_items: args.items,
        stimulus_features: args.stimulus_features,
        neural_features: args.neural_features,
        noise: args.noise,
        seed: args.seed,
        ..SimulationConfig::default()
    };

    info!(
        "Simulating {} items ({} stimulus features, {} neural channels, noise {})",
        sim_config.n_items,
        sim_config.stimulus_features,
        sim_config.neural_features,
        sim_config.noise
    );
    let data = simulate(&sim_config)?;

    let analysis = RsaAnalysis::new(config)?;
    let mut report = analysis.run(&data.stimulus, &data.neural)?;
    if args.triples {
        report = report.with_triples();
    }

    println!("{}", report.to_json_pretty()?);
    Ok(())
}
