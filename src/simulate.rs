//! Synthetic stimulus and neural data
//!
//! Generates an item-by-feature stimulus matrix and a neural matrix whose
//! channels are noisy linear mixtures of the stimulus features, so the two
//! domains share representational structure by construction. Seeded, so a
//! given configuration always yields the same data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reprsim_core::{Error, ItemMatrix, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for [`simulate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub n_items: usize,
    pub stimulus_features: usize,
    pub neural_features: usize,
    /// Amplitude of uniform noise added to every neural value
    pub noise: f64,
    /// Per-channel baseline, recycled across channels by [`broadcast`]
    #[serde(default = "default_baseline")]
    pub neural_baseline: Vec<f64>,
    pub seed: u64,
}

fn default_baseline() -> Vec<f64> {
    vec![0.0]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_items: 8,
            stimulus_features: 5,
            neural_features: 20,
            noise: 0.5,
            neural_baseline: default_baseline(),
            seed: 42,
        }
    }
}

/// Synthetic data for both domains over the same items
#[derive(Debug, Clone)]
pub struct SimulatedData {
    pub stimulus: ItemMatrix,
    pub neural: ItemMatrix,
}

/// Repeat `values` until it has `len` entries.
///
/// Only whole repetitions are allowed: `len` must be a multiple of
/// `values.len()`, otherwise `DimensionMismatch` is returned.
pub fn broadcast(values: &[f64], len: usize) -> Result<Vec<f64>> {
    if values.is_empty() || len % values.len() != 0 {
        return Err(Error::DimensionMismatch(format!(
            "cannot broadcast {} values to length {}",
            values.len(),
            len
        )));
    }
    Ok(values.iter().copied().cycle().take(len).collect())
}

pub fn simulate(config: &SimulationConfig) -> Result<SimulatedData> {
    if config.n_items == 0 || config.stimulus_features == 0 || config.neural_features == 0 {
        return Err(Error::InvalidConfig(
            "item and feature counts must be positive".to_string(),
        ));
    }
    if !config.noise.is_finite() || config.noise < 0.0 {
        return Err(Error::InvalidConfig(format!("invalid noise level {}", config.noise)));
    }

    let baseline = broadcast(&config.neural_baseline, config.neural_features)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let stimulus: Vec<Vec<f64>> = (0..config.n_items)
        .map(|_| {
            (0..config.stimulus_features)
                .map(|_| rng.random_range(-1.0f64..1.0))
                .collect()
        })
        .collect();

    // weights[channel][feature]
    let weights: Vec<Vec<f64>> = (0..config.neural_features)
        .map(|_| {
            (0..config.stimulus_features)
                .map(|_| rng.random_range(-1.0f64..1.0))
                .collect()
        })
        .collect();

    let neural: Vec<Vec<f64>> = stimulus
        .iter()
        .map(|item| {
            weights
                .iter()
                .zip(baseline.iter())
                .map(|(w, base)| {
                    let signal: f64 = w.iter().zip(item.iter()).map(|(a, b)| a * b).sum();
                    base + signal + config.noise * rng.random_range(-1.0f64..1.0)
                })
                .collect()
        })
        .collect();

    debug!(
        items = config.n_items,
        stimulus_features = config.stimulus_features,
        neural_features = config.neural_features,
        seed = config.seed,
        "simulated data"
    );

    let labels: Vec<String> = (0..config.n_items).map(|i| format!("item_{}", i)).collect();
    Ok(SimulatedData {
        stimulus: ItemMatrix::from_rows(stimulus)?.with_labels(labels.clone())?,
        neural: ItemMatrix::from_rows(neural)?.with_labels(labels)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast() {
        assert_eq!(broadcast(&[1.0, 2.0], 6).unwrap(), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        assert_eq!(broadcast(&[3.0], 3).unwrap(), vec![3.0, 3.0, 3.0]);
        assert!(matches!(broadcast(&[1.0, 2.0], 5), Err(Error::DimensionMismatch(_))));
        assert!(matches!(broadcast(&[], 4), Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn test_simulate_shapes() {
        let config = SimulationConfig::default();
        let data = simulate(&config).unwrap();
        assert_eq!(data.stimulus.n_items(), 8);
        assert_eq!(data.stimulus.n_features(), 5);
        assert_eq!(data.neural.n_items(), 8);
        assert_eq!(data.neural.n_features(), 20);
        assert_eq!(data.neural.label_index("item_3"), Some(3));
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let config = SimulationConfig::default();
        let a = simulate(&config).unwrap();
        let b = simulate(&config).unwrap();
        assert_eq!(a.stimulus, b.stimulus);
        assert_eq!(a.neural, b.neural);

        let other = simulate(&SimulationConfig { seed: 7, ..config }).unwrap();
        assert_ne!(a.stimulus, other.stimulus);
    }

    #[test]
    fn test_baseline_must_fit_channels() {
        let config = SimulationConfig {
            neural_baseline: vec![1.0, 2.0, 3.0],
            neural_features: 20,
            ..SimulationConfig::default()
        };
        assert!(matches!(simulate(&config), Err(Error::DimensionMismatch(_))));
    }

    #[test]
    fn test_invalid_config() {
        let config = SimulationConfig {
            noise: -1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(simulate(&config), Err(Error::InvalidConfig(_))));
        let config = SimulationConfig {
            n_items: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(simulate(&config), Err(Error::InvalidConfig(_))));
    }
}
