//! Per-edge rounding weights consumed by the host's bevel operation.

use std::collections::BTreeMap;

use config::constants::is_valid_bevel_weight;
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::mesh_point::MeshPoint;

/// An undirected edge, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(u32, u32);

impl EdgeKey {
    /// Normalizes `(a, b)` so the smaller index comes first.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    #[inline]
    pub fn low(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn high(&self) -> u32 {
        self.1
    }
}

/// Mapping from undirected edge to rounding weight in `0.0..=1.0`.
///
/// Recording the same edge again overwrites the earlier weight.
///
/// # Example
///
/// ```rust
/// use keycase_kernel::BevelMap;
///
/// let mut bevels = BevelMap::new();
/// bevels.record(5, 3, 0.5).unwrap();
/// bevels.record(3, 5, 0.8).unwrap();
/// assert_eq!(bevels.len(), 1);
/// assert_eq!(bevels.get(3, 5), Some(0.8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BevelMap {
    weights: BTreeMap<EdgeKey, f64>,
}

impl BevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `weight` for the edge between two point indices.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a weight outside `0.0..=1.0` (or NaN), or for
    /// an edge from a point to itself.
    pub fn record(&mut self, a: u32, b: u32, weight: f64) -> KernelResult<()> {
        if !is_valid_bevel_weight(weight) {
            return Err(KernelError::invalid_parameter(
                "weight",
                format!("bevel weight must be within 0.0..=1.0, got {weight}"),
            ));
        }
        if a == b {
            return Err(KernelError::invalid_parameter(
                "edge",
                format!("edge ({a}, {b}) connects a point to itself"),
            ));
        }
        self.weights.insert(EdgeKey::new(a, b), weight);
        Ok(())
    }

    /// Records `weight` for the edge between two handles.
    pub fn record_edge(&mut self, a: &MeshPoint, b: &MeshPoint, weight: f64) -> KernelResult<()> {
        self.record(a.index(), b.index(), weight)
    }

    /// Weight of an edge, in either direction.
    pub fn get(&self, a: u32, b: u32) -> Option<f64> {
        self.weights.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Entries ordered by edge key.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.weights.iter().map(|(k, w)| (*k, *w))
    }

    /// Copies another map's entries with every index shifted by `offset`,
    /// matching `Mesh::merge`.
    pub fn merge_offset(&mut self, other: &BevelMap, offset: u32) {
        for (key, weight) in other.iter() {
            self.weights
                .insert(EdgeKey::new(key.low() + offset, key.high() + offset), weight);
        }
    }
}
