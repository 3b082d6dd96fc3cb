//! Connection (directed weighted edge) between two warehouse nodes.

use serde::{Deserialize, Serialize};

/// A directed connection `from -> to` with a traversal cost.
///
/// `A -> B` does not imply `B -> A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from_node: String,
    pub to_node: String,
    pub distance: f64,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from_node: from.into(),
            to_node: to.into(),
            distance,
        }
    }

    /// Distances must be finite and non-negative for the search to be sound.
    pub fn has_valid_distance(&self) -> bool {
        self.distance.is_finite() && self.distance >= 0.0
    }
}
