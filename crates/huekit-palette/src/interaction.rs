//! Hover/active color derivation.
//!
//! A palette's interaction color is the stop just darker than its default
//! color. The default is found in its own generated scale (it sits at `500`)
//! and the next entry is returned as hex.
//!
//! Degenerate inputs fall back to the default color unchanged:
//!
//! - the default matches the darkest stop (`950`), so there is nothing darker;
//! - the default is not found because of rounding drift;
//! - the default is not a valid color and its scale is empty.

use crate::cache::{CachePolicy, PaletteCache};
use crate::color::normalize_hex;
use crate::palette::{generate_palette, ShadeScale};

/// Returns the hex of the stop following the one equal to `target`.
///
/// `target` must already be normalized. `None` when `target` is absent or is
/// the last stop.
pub fn next_darker(scale: &ShadeScale, target: &str) -> Option<String> {
    let hexes: Vec<String> = scale.iter().map(|(_, rgb)| rgb.to_hex()).collect();
    let index = hexes.iter().position(|hex| hex == target)?;
    hexes.get(index + 1).cloned()
}

/// Computes the interaction color of `default` without caching.
pub fn interaction_color(default: &str) -> String {
    let normalized = normalize_hex(default);
    next_darker(&generate_palette(&normalized), &normalized).unwrap_or_else(|| default.to_string())
}

/// Interaction color lookups backed by a [`PaletteCache`].
///
/// Callers feeding this from raw input events should debounce first: every
/// distinct color string costs one scale generation and one cache slot.
#[derive(Debug, Clone, Default)]
pub struct InteractionResolver {
    cache: PaletteCache,
}

impl InteractionResolver {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            cache: PaletteCache::new(policy),
        }
    }

    /// The interaction color for `default`, or `default` itself when none
    /// can be derived.
    pub fn resolve(&mut self, default: &str) -> String {
        let normalized = normalize_hex(default);
        let scale = self.cache.scale(&normalized);
        match next_darker(scale, &normalized) {
            Some(hex) => hex,
            None => {
                tracing::debug!(color = default, "no darker stop, keeping default");
                default.to_string()
            }
        }
    }

    /// The cached scale for `color`, shared with [`resolve`](Self::resolve).
    pub fn scale(&mut self, color: &str) -> &ShadeScale {
        self.cache.scale(color)
    }

    pub fn cache(&self) -> &PaletteCache {
        &self.cache
    }

    /// Ends the editing session's memoization.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
