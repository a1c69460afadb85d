//! Session metrics using metrics-rs.
//!
//! Recording is a no-op unless a recorder is installed; the CLI installs
//! [`CliRecorder`] when `--metrics` is passed.

use std::collections::BTreeMap;
use std::sync::Arc;

use metrics::{
    Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit, counter,
    describe_counter, describe_histogram, histogram,
};
use parking_lot::RwLock;

// ============================================================================
// Metric descriptions
// ============================================================================

/// Register metric descriptions. Call once at startup.
pub fn init() {
    describe_counter!("rvstub_sessions_total", Unit::Count, "Debugger sessions served");
    describe_counter!(
        "rvstub_packets_total",
        Unit::Count,
        "Packets acknowledged and dispatched, by command"
    );
    describe_counter!(
        "rvstub_checksum_mismatches_total",
        Unit::Count,
        "Packets rejected with a negative acknowledgment"
    );
    describe_counter!(
        "rvstub_malformed_packets_total",
        Unit::Count,
        "Reads that did not contain a decodable packet"
    );
    describe_counter!("rvstub_steps_total", Unit::Count, "Single-steps performed");
    describe_histogram!(
        "rvstub_session_duration_seconds",
        Unit::Seconds,
        "Connection lifetime"
    );
}

// ============================================================================
// Recording
// ============================================================================

/// Record a dispatched packet.
pub fn record_packet(command: &'static str) {
    counter!("rvstub_packets_total", "command" => command).increment(1);
}

/// Record a packet rejected for its checksum.
pub fn record_checksum_mismatch() {
    counter!("rvstub_checksum_mismatches_total").increment(1);
}

/// Record a read that held no valid frame.
pub fn record_malformed() {
    counter!("rvstub_malformed_packets_total").increment(1);
}

/// Record a single-step.
pub fn record_step() {
    counter!("rvstub_steps_total").increment(1);
}

/// Record a finished session.
pub fn record_session(duration_secs: f64) {
    counter!("rvstub_sessions_total").increment(1);
    histogram!("rvstub_session_duration_seconds").record(duration_secs);
}

// ============================================================================
// CLI Recorder for terminal output
// ============================================================================

#[derive(Default)]
struct Store {
    counters: RwLock<BTreeMap<String, u64>>,
    histograms: RwLock<BTreeMap<String, Vec<f64>>>,
}

struct CliCounter {
    key: String,
    store: Arc<Store>,
}

impl metrics::CounterFn for CliCounter {
    fn increment(&self, value: u64) {
        *self.store.counters.write().entry(self.key.clone()).or_insert(0) += value;
    }

    fn absolute(&self, value: u64) {
        self.store.counters.write().insert(self.key.clone(), value);
    }
}

struct CliHistogram {
    key: String,
    store: Arc<Store>,
}

impl metrics::HistogramFn for CliHistogram {
    fn record(&self, value: f64) {
        self.store
            .histograms
            .write()
            .entry(self.key.clone())
            .or_default()
            .push(value);
    }
}

/// In-memory recorder that prints a summary on exit.
#[derive(Default)]
pub struct CliRecorder {
    store: Arc<Store>,
}

impl CliRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install as the global recorder.
    ///
    /// Returns `None` if a recorder is already installed.
    #[must_use]
    pub fn install(self) -> Option<CliRecorderHandle> {
        let store = Arc::clone(&self.store);
        metrics::set_global_recorder(self).ok()?;
        Some(CliRecorderHandle { store })
    }
}

fn key_to_string(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|l| format!("{}={}", l.key(), l.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for CliRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(Arc::new(CliCounter {
            key: key_to_string(key),
            store: Arc::clone(&self.store),
        }))
    }

    fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::from_arc(Arc::new(CliHistogram {
            key: key_to_string(key),
            store: Arc::clone(&self.store),
        }))
    }
}

/// Read access to metrics collected by an installed [`CliRecorder`].
pub struct CliRecorderHandle {
    store: Arc<Store>,
}

impl CliRecorderHandle {
    /// Counter value by rendered key, e.g. `rvstub_packets_total{command=step}`.
    #[must_use]
    pub fn get_counter(&self, key: &str) -> Option<u64> {
        self.store.counters.read().get(key).copied()
    }

    /// Print collected metrics.
    pub fn print_summary(&self) {
        let counters = self.store.counters.read();
        let histograms = self.store.histograms.read();

        if counters.is_empty() && histograms.is_empty() {
            println!("No metrics collected.");
            return;
        }

        println!();
        println!("## Metrics Summary");
        println!();

        if !counters.is_empty() {
            println!("### Counters");
            for (key, value) in counters.iter() {
                println!("  {key}: {value}");
            }
            println!();
        }

        if !histograms.is_empty() {
            println!("### Histograms");
            for (key, values) in histograms.iter().filter(|(_, v)| !v.is_empty()) {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                #[allow(clippy::cast_precision_loss)]
                let avg = values.iter().sum::<f64>() / values.len() as f64;
                println!(
                    "  {key}: count={}, min={min:.6}, max={max:.6}, avg={avg:.6}",
                    values.len()
                );
            }
            println!();
        }
    }
}
