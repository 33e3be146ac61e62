//! # Logistic Confidence Predictor
//!
//! A local logistic-regression model over the engine's feature vector.
//! Training happens elsewhere; this only evaluates exported coefficients.

use std::fs;
use std::path::Path;

use anyhow::{Context, ensure};
use async_trait::async_trait;
use parkr_core::ports::{ConfidencePredictor, FeatureVector};
use serde::{Deserialize, Serialize};

/// Coefficients in feature order, plus the intercept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticPredictor {
    pub coefficients: [f64; FeatureVector::LEN],
    pub intercept: f64,
}

impl LogisticPredictor {
    pub fn new(coefficients: [f64; FeatureVector::LEN], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Loads `{"coefficients": [..6..], "intercept": x}` from a JSON file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading model file {}", path.display()))?;
        let model: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing model file {}", path.display()))?;
        ensure!(
            model.coefficients.iter().all(|c| c.is_finite()) && model.intercept.is_finite(),
            "model file {} contains non-finite coefficients",
            path.display()
        );
        Ok(model)
    }

    pub fn probability(&self, features: &FeatureVector) -> anyhow::Result<f64> {
        let values = features.to_array();
        ensure!(
            values.iter().all(|v| v.is_finite()),
            "feature vector contains non-finite values: {values:?}"
        );

        let z: f64 = self.intercept
            + self
                .coefficients
                .iter()
                .zip(values.iter())
                .map(|(c, v)| c * v)
                .sum::<f64>();
        Ok(sigmoid(z))
    }
}

impl Default for LogisticPredictor {
    /// Close lots, free lots, cheap lots, calm traffic and good ratings all
    /// raise the odds; long stays lower them slightly.
    fn default() -> Self {
        Self::new([-0.45, -2.2, -0.08, -0.35, 0.4, -0.002], 1.6)
    }
}

#[async_trait]
impl ConfidencePredictor for LogisticPredictor {
    async fn predict(&self, features: &FeatureVector) -> anyhow::Result<f64> {
        self.probability(features)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
