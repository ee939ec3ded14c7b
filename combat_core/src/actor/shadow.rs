//! Shadow storage for reversible stat mutations

use serde::{Deserialize, Serialize};

/// Hidden pre-effect value for one reversible effect.
///
/// `baseline` is the stat value before the mutation and `applied` the value
/// the mutation wrote. Both are `None` only when state was restored from an
/// inconsistent snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub active: bool,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub applied: Option<f64>,
}

impl Shadow {
    pub fn capture(baseline: f64, applied: f64) -> Self {
        Shadow {
            active: true,
            baseline: Some(baseline),
            applied: Some(applied),
        }
    }
}
