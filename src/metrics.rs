//! Prediction counters and inference latency tracking.

use crate::types::Domain;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector shared by the dispatcher and the web layer
pub struct PredictionMetrics {
    /// Successful predictions
    pub predictions: AtomicU64,
    /// Predictions with a positive verdict
    pub positives: AtomicU64,
    /// Submissions rejected by input coercion
    pub invalid_inputs: AtomicU64,
    /// Inference runtime errors
    pub inference_failures: AtomicU64,
    /// Successful predictions by domain
    by_domain: RwLock<HashMap<Domain, u64>>,
    /// Model inference times (in microseconds)
    model_times: RwLock<HashMap<Domain, Vec<u64>>>,
    start_time: Instant,
}

impl PredictionMetrics {
    pub fn new() -> Self {
        Self {
            predictions: AtomicU64::new(0),
            positives: AtomicU64::new(0),
            invalid_inputs: AtomicU64::new(0),
            inference_failures: AtomicU64::new(0),
            by_domain: RwLock::new(HashMap::new()),
            model_times: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Record a completed prediction
    pub fn record_prediction(&self, domain: Domain, inference_time: Duration, positive: bool) {
        self.predictions.fetch_add(1, Ordering::Relaxed);
        if positive {
            self.positives.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut by_domain) = self.by_domain.write() {
            *by_domain.entry(domain).or_insert(0) += 1;
        }

        if let Ok(mut times) = self.model_times.write() {
            let model_times = times.entry(domain).or_default();
            model_times.push(inference_time.as_micros() as u64);
            // Keep only last 1000 per model
            if model_times.len() > 1000 {
                model_times.drain(0..500);
            }
        }
    }

    pub fn record_invalid_input(&self) {
        self.invalid_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inference_failure(&self) {
        self.inference_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get per-model latency stats
    pub fn get_model_stats(&self) -> HashMap<Domain, ModelStats> {
        let Ok(times) = self.model_times.read() else {
            return HashMap::new();
        };

        times
            .iter()
            .filter(|(_, model_times)| !model_times.is_empty())
            .map(|(domain, model_times)| {
                let mut sorted = model_times.clone();
                sorted.sort_unstable();

                let sum: u64 = sorted.iter().sum();
                let count = sorted.len();

                (
                    *domain,
                    ModelStats {
                        calls: count as u64,
                        mean_us: sum / count as u64,
                        p50_us: sorted[count / 2],
                        p99_us: sorted[((count as f64 * 0.99) as usize).min(count - 1)],
                    },
                )
            })
            .collect()
    }

    pub fn get_predictions_by_domain(&self) -> HashMap<Domain, u64> {
        self.by_domain
            .read()
            .map(|by_domain| by_domain.clone())
            .unwrap_or_default()
    }

    /// Point-in-time view for the health endpoint
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            predictions: self.predictions.load(Ordering::Relaxed),
            positives: self.positives.load(Ordering::Relaxed),
            invalid_inputs: self.invalid_inputs.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
            by_domain: self.get_predictions_by_domain(),
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let snapshot = self.snapshot();
        let positive_rate = if snapshot.predictions > 0 {
            (snapshot.positives as f64 / snapshot.predictions as f64) * 100.0
        } else {
            0.0
        };

        info!(
            uptime_secs = snapshot.uptime_secs,
            predictions = snapshot.predictions,
            positive_rate = format!("{:.1}%", positive_rate),
            invalid_inputs = snapshot.invalid_inputs,
            inference_failures = snapshot.inference_failures,
            "Prediction summary"
        );

        for domain in Domain::ALL {
            let count = snapshot.by_domain.get(&domain).copied().unwrap_or(0);
            info!(domain = %domain, predictions = count, "Predictions by domain");
        }

        let model_stats = self.get_model_stats();
        if !model_stats.is_empty() {
            info!("Model Inference Times (μs):");
            for (domain, stats) in &model_stats {
                info!(
                    "  {}: mean={} p50={} p99={} (calls={})",
                    domain, stats.mean_us, stats.p50_us, stats.p99_us, stats.calls
                );
            }
        }
    }
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Model-specific latency statistics
#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub calls: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p99_us: u64,
}

/// Serializable counter snapshot
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub predictions: u64,
    pub positives: u64,
    pub invalid_inputs: u64,
    pub inference_failures: u64,
    pub by_domain: HashMap<Domain, u64>,
}

/// Periodic reporter that logs the summary
pub struct MetricsReporter {
    metrics: Arc<PredictionMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<PredictionMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
