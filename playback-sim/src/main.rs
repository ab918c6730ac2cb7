mod sampler;
mod sink;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use decision_log::DecisionHistory;
use preference_store::PreferenceStore;
use quality_selector::{
    QualityDecision, QualityPriority, QualitySelector, SelectorConfig, TierChoice, UserPreference,
};

use sampler::{probe_device, NetworkWalker};
use sink::{BufferModel, SimulatedSink};

/// Playback Simulator
///
/// Drives the quality selector the way the browser player would:
/// - a 1s sampler timer feeding synthetic bandwidth measurements
/// - an evaluation timer asking for tier decisions on the configured cadence
/// - a simulated video sink that occasionally refuses a change
/// - an optional tab hide/show halfway through the session

#[derive(Parser)]
#[command(name = "playback-sim")]
#[command(about = "Synthetic playback session driving the quality selector")]
struct Cli {
    /// Session length in seconds
    #[arg(short, long, default_value_t = 60)]
    duration: u64,

    /// Priority mode: quality, balanced, performance, bandwidth
    #[arg(short, long, default_value = "balanced")]
    priority: String,

    /// Enable data saver
    #[arg(long)]
    data_saver: bool,

    /// Probability that the sink refuses an apply (0.0 - 1.0)
    #[arg(long, default_value_t = 0.05)]
    failure_rate: f64,

    /// Seed for the synthetic network walk
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Load and save preferences at this path instead of taking them from flags
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Simulate a tab hide/show halfway through the session
    #[arg(long)]
    background: bool,
}

fn parse_priority(s: &str) -> Result<QualityPriority> {
    Ok(match s {
        "quality" => QualityPriority::Quality,
        "balanced" => QualityPriority::Balanced,
        "performance" => QualityPriority::Performance,
        "bandwidth" => QualityPriority::Bandwidth,
        other => bail!("unknown priority: {}", other),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let store = cli.prefs.as_ref().map(|p| PreferenceStore::at(p.clone()));
    let preference = match &store {
        Some(store) => store.load_or_default(),
        None => UserPreference {
            priority: parse_priority(&cli.priority)?,
            data_saver: cli.data_saver,
            auto_enabled: true,
        },
    };
    println!(
        "Preference: priority={:?} data_saver={} auto={}",
        preference.priority, preference.data_saver, preference.auto_enabled
    );

    let config = SelectorConfig::default();
    let eval_interval = Duration::from_secs(config.evaluation_interval_secs);
    let mut selector = QualitySelector::new(config, preference);

    let device = probe_device();
    println!(
        "Device: {:.1} GiB memory, {} cores",
        device.memory_gib, device.logical_cores
    );
    selector.update_device_condition(device);

    let mut walker = NetworkWalker::new(cli.seed);
    let mut sink = SimulatedSink::new(cli.failure_rate, cli.seed);
    let mut buffer = BufferModel::new();
    let mut history = DecisionHistory::new();

    let started = Instant::now();
    let mut hide_at = cli
        .background
        .then(|| started + Duration::from_secs(cli.duration / 2));
    let mut hidden_since: Option<Instant> = None;

    let mut sample_tick = tokio::time::interval(Duration::from_secs(1));
    let mut eval_tick = tokio::time::interval(eval_interval);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(cli.duration);

    loop {
        tokio::select! {
            _ = sample_tick.tick() => {
                let now = Instant::now();
                let sample = walker.next_sample(now);
                buffer.advance(
                    sample.bandwidth_bps,
                    selector.current_tier().profile().video_bitrate_bps,
                );
                selector.record_network_sample(sample);

                if hide_at.is_some_and(|at| now >= at) {
                    hide_at = None;
                    hidden_since = Some(now);
                    println!("[{:>4}s] tab hidden", started.elapsed().as_secs());
                    if let Some(decision) = selector.on_visibility_hidden() {
                        complete(&mut selector, &mut sink, &mut history, started, decision).await;
                    }
                } else if hidden_since.is_some_and(|since| now.duration_since(since) >= Duration::from_secs(5)) {
                    hidden_since = None;
                    println!("[{:>4}s] tab visible", started.elapsed().as_secs());
                    selector.on_visibility_visible(now);
                }
            }
            _ = eval_tick.tick() => {
                evaluate(&mut selector, &mut sink, &mut history, &buffer, started).await;
            }
            _ = tokio::time::sleep_until(deadline) => break,
        }

        if selector.needs_evaluation() {
            evaluate(&mut selector, &mut sink, &mut history, &buffer, started).await;
        }
    }

    println!();
    println!(
        "Session ended at {} after {} decisions",
        selector.current_tier(),
        history.len()
    );
    println!("{}", history.to_json()?);

    if let Some(store) = &store {
        store.save(&selector.preference())?;
        println!("Preferences saved to {}", store.path().display());
    }

    Ok(())
}

async fn evaluate(
    selector: &mut QualitySelector,
    sink: &mut SimulatedSink,
    history: &mut DecisionHistory,
    buffer: &BufferModel,
    started: Instant,
) {
    let now = Instant::now();
    if let Some(decision) = selector.evaluate(now, Some(buffer.condition())) {
        complete(selector, sink, history, started, decision).await;
    }
}

async fn complete(
    selector: &mut QualitySelector,
    sink: &mut SimulatedSink,
    history: &mut DecisionHistory,
    started: Instant,
    decision: QualityDecision,
) {
    let applied = match decision.choice {
        TierChoice::Fixed(tier) => sink.apply(tier.profile()).await,
        TierChoice::Auto => true,
    };
    selector.complete_change(applied);

    let score = decision
        .score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "[{:>4}s] {:?} -> {} (score={}, applied={})",
        started.elapsed().as_secs(),
        decision.reason,
        decision.choice,
        score,
        applied
    );
    history.record(decision, applied);
}
