use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portfolio weights keyed by asset identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioWeights(BTreeMap<String, f64>);

impl PortfolioWeights {
    /// Pairs `assets` with `weights` positionally.
    pub fn from_assets(assets: &[String], weights: &[f64]) -> Self {
        Self(assets.iter().cloned().zip(weights.iter().copied()).collect())
    }

    pub fn get(&self, asset: &str) -> Option<f64> {
        self.0.get(asset).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// Weights in the order of `assets`; missing assets are `None`.
    pub fn aligned(&self, assets: &[String]) -> Option<Vec<f64>> {
        assets.iter().map(|a| self.get(a)).collect()
    }

    pub(crate) fn insert(&mut self, asset: String, weight: f64) {
        self.0.insert(asset, weight);
    }
}

impl FromIterator<(String, f64)> for PortfolioWeights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_follows_requested_order() {
        let assets = vec!["B".to_string(), "A".to_string()];
        let w = PortfolioWeights::from_assets(&assets, &[0.7, 0.3]);
        assert_eq!(w.aligned(&["A".to_string(), "B".to_string()]), Some(vec![0.3, 0.7]));
        assert_eq!(w.aligned(&["C".to_string()]), None);
        assert!((w.total() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn serializes_as_a_plain_map() {
        let w: PortfolioWeights = [("X".to_string(), 1.0)].into_iter().collect();
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"X":1.0}"#);
    }
}
