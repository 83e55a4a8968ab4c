//! Layered merge of configuration maps.
//!
//! Resolution stacks three layers: built-in defaults, the caller's initial
//! overrides, then the file or environment layer. This module folds them.
//!
//! # Merge Rules
//!
//! - Layers are applied left to right; later layers win
//! - Values are replaced per key, never merged recursively
//! - A null value in a later layer is kept as null, not treated as deletion

use super::key::ConfigMap;

/// Overlay one map on another.
///
/// Every key of `overlay` replaces the same key in `base`.
pub fn merge_layer(base: &ConfigMap, overlay: &ConfigMap) -> ConfigMap {
    let mut result = base.clone();
    result.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    result
}

/// Merge layers in order (later overrides earlier).
///
/// # Arguments
///
/// * `layers` - Maps in merge order (first is base, last has highest priority)
pub fn merge_layers(layers: &[&ConfigMap]) -> ConfigMap {
    layers
        .iter()
        .fold(ConfigMap::new(), |acc, layer| merge_layer(&acc, layer))
}
