//! Versioned JSON checkpoints.
//!
//! ```json
//! { "version": 1, "kind": "linear", "weights": [[...]], "bias": [...], "score": 1.5 }
//! ```
//!
//! Loading never falls back to an untrained policy: a missing file, bad JSON,
//! an unknown version or kind, or parameters of the wrong shape are all
//! errors.

use std::fs;
use std::path::Path;

use croupier_engine::env::{ACTION_DIM, OBSERVATION_DIM};
use serde::{Deserialize, Serialize};

use crate::baseline::{RedPolicy, UniformPolicy};
use crate::errors::CheckpointError;
use crate::linear::{LinearParams, LinearPolicy};
use crate::Policy;

pub const CHECKPOINT_VERSION: u32 = 1;

const KNOWN_KINDS: [&str; 3] = ["uniform", "red", "linear"];

/// Parameters of a policy, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PolicyState {
    Uniform,
    Red,
    Linear {
        /// `ACTION_DIM` rows of `OBSERVATION_DIM` weights
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
        /// Mean training return of these parameters, if known
        #[serde(default)]
        score: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub version: u32,
    #[serde(flatten)]
    pub state: PolicyState,
    /// RFC 3339 time the checkpoint was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    /// Environment steps spent in training
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timesteps: Option<u64>,
}

impl Checkpoint {
    pub fn from_policy(policy: &dyn Policy) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            state: policy.state(),
            trained_at: None,
            timesteps: None,
        }
    }

    /// Rebuild a frozen policy from the stored parameters.
    pub fn into_policy(self) -> Result<Box<dyn Policy>, CheckpointError> {
        match self.state {
            PolicyState::Uniform => Ok(Box::new(UniformPolicy)),
            PolicyState::Red => Ok(Box::new(RedPolicy)),
            PolicyState::Linear {
                weights,
                bias,
                score,
            } => {
                let params = linear_params(&weights, &bias)?;
                Ok(Box::new(LinearPolicy::frozen(params, score)))
            }
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CheckpointError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let found = value.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
        if found != u64::from(CHECKPOINT_VERSION) {
            return Err(CheckpointError::UnsupportedVersion {
                found,
                supported: CHECKPOINT_VERSION,
            });
        }
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .unwrap_or_default();
        if !KNOWN_KINDS.contains(&kind) {
            return Err(CheckpointError::UnknownKind(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn linear_params(weights: &[Vec<f64>], bias: &[f64]) -> Result<LinearParams, CheckpointError> {
    if weights.len() != ACTION_DIM || weights.iter().any(|r| r.len() != OBSERVATION_DIM) {
        return Err(CheckpointError::ShapeMismatch(format!(
            "weights must be {}x{}",
            ACTION_DIM, OBSERVATION_DIM
        )));
    }
    if bias.len() != ACTION_DIM {
        return Err(CheckpointError::ShapeMismatch(format!(
            "bias has {} entries, expected {}",
            bias.len(),
            ACTION_DIM
        )));
    }
    if weights.iter().flatten().chain(bias).any(|x| !x.is_finite()) {
        return Err(CheckpointError::ShapeMismatch(
            "parameters must be finite".into(),
        ));
    }
    let mut params = LinearParams::default();
    for (dst, src) in params.weights.iter_mut().zip(weights) {
        dst.copy_from_slice(src);
    }
    params.bias.copy_from_slice(bias);
    Ok(params)
}

pub fn save(path: &Path, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
    let text = checkpoint.to_json()?;
    fs::write(path, text).map_err(|source| CheckpointError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "checkpoint saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<Checkpoint, CheckpointError> {
    let text = fs::read_to_string(path).map_err(|source| CheckpointError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Checkpoint::from_json(&text)
}

/// [`load`] followed by [`Checkpoint::into_policy`].
pub fn load_policy(path: &Path) -> Result<Box<dyn Policy>, CheckpointError> {
    load(path)?.into_policy()
}
