//! Memoization of generated shade scales.
//!
//! Interactive editing asks for the scale of the same few colors over and
//! over. [`PaletteCache`] keys scales by normalized hex, so `#FFF` and
//! `#ffffff` hit the same entry.
//!
//! Two eviction policies are available:
//!
//! - [`CachePolicy::Lru`] keeps at most `n` scales and drops the least recently
//!   used one when full. Suitable for long-lived processes.
//! - [`CachePolicy::Session`] never evicts; the owner calls
//!   [`clear`](PaletteCache::clear) when the editing session ends.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::color::normalize_hex;
use crate::palette::{generate_palette, ShadeScale};

/// Default capacity for [`CachePolicy::Lru`].
pub const DEFAULT_CAPACITY: usize = 256;

/// How a [`PaletteCache`] bounds its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least-recently-used eviction at the given capacity.
    Lru(NonZeroUsize),
    /// Unbounded until [`PaletteCache::clear`].
    Session,
}

impl CachePolicy {
    /// `Lru(capacity)`, or `Session` when `capacity` is zero.
    pub fn from_capacity(capacity: usize) -> Self {
        match NonZeroUsize::new(capacity) {
            Some(n) => CachePolicy::Lru(n),
            None => CachePolicy::Session,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy::from_capacity(DEFAULT_CAPACITY)
    }
}

/// Hit/miss counters, reset by [`PaletteCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
enum Entries {
    Lru(LruCache<String, ShadeScale>),
    Session(HashMap<String, ShadeScale>),
}

/// Shade scales keyed by normalized hex.
#[derive(Debug, Clone)]
pub struct PaletteCache {
    policy: CachePolicy,
    entries: Entries,
    stats: CacheStats,
}

impl PaletteCache {
    pub fn new(policy: CachePolicy) -> Self {
        let entries = match policy {
            CachePolicy::Lru(capacity) => Entries::Lru(LruCache::new(capacity)),
            CachePolicy::Session => Entries::Session(HashMap::new()),
        };
        Self {
            policy,
            entries,
            stats: CacheStats::default(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Lru(cache) => cache.len(),
            Entries::Session(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Whether a scale for `color` is cached, without touching recency.
    pub fn contains(&self, color: &str) -> bool {
        self.contains_key(&normalize_hex(color))
    }

    /// Returns the scale for `color`, generating and caching it on a miss.
    ///
    /// Unparseable colors are cached as empty scales as well; they are just
    /// as expensive to re-check on every keystroke.
    pub fn scale(&mut self, color: &str) -> &ShadeScale {
        let key = normalize_hex(color);
        let hit = self.contains_key(&key);
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            tracing::trace!(color = %key, "palette cache miss");
        }

        match &mut self.entries {
            Entries::Lru(cache) => {
                if !hit && cache.len() == cache.cap().get() {
                    if let Some((oldest, _)) = cache.peek_lru() {
                        tracing::trace!(color = %oldest, "palette cache eviction");
                    }
                    self.stats.evictions += 1;
                }
                cache.get_or_insert(key.clone(), || generate_palette(&key))
            }
            Entries::Session(map) => map.entry(key).or_insert_with_key(|k| generate_palette(k)),
        }
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        match &mut self.entries {
            Entries::Lru(cache) => cache.clear(),
            Entries::Session(map) => map.clear(),
        }
        self.stats = CacheStats::default();
    }

    fn contains_key(&self, key: &str) -> bool {
        match &self.entries {
            Entries::Lru(cache) => cache.contains(key),
            Entries::Session(map) => map.contains_key(key),
        }
    }
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Shade;

    fn lru(n: usize) -> PaletteCache {
        PaletteCache::new(CachePolicy::from_capacity(n))
    }

    #[test]
    fn policy_from_capacity() {
        assert_eq!(CachePolicy::from_capacity(0), CachePolicy::Session);
        assert!(matches!(CachePolicy::from_capacity(3), CachePolicy::Lru(n) if n.get() == 3));
    }

    #[test]
    fn miss_then_hit() {
        let mut cache = lru(4);
        let first = cache.scale("#d946ef").clone();
        let second = cache.scale("#d946ef").clone();
        assert_eq!(first, second);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn keys_are_normalized() {
        let mut cache = lru(4);
        cache.scale("#FFF");
        cache.scale("#ffffff");
        cache.scale("#FFFFFF");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits, 2);
        assert!(cache.contains("#fff"));
    }

    #[test]
    fn lru_evicts_least_recent() {
        let mut cache = lru(2);
        cache.scale("#111111");
        cache.scale("#222222");
        // Refresh #111111 so #222222 becomes the oldest.
        cache.scale("#111111");
        cache.scale("#333333");

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("#111111"));
        assert!(!cache.contains("#222222"));
        assert!(cache.contains("#333333"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn contains_does_not_refresh_recency() {
        let mut cache = lru(2);
        cache.scale("#111111");
        cache.scale("#222222");
        assert!(cache.contains("#111111"));
        cache.scale("#333333");

        assert!(!cache.contains("#111111"));
        assert!(cache.contains("#222222"));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn hits_never_evict() {
        let mut cache = lru(1);
        cache.scale("#111111");
        cache.scale("#111111");
        cache.scale("#111111");
        assert_eq!(cache.stats().evictions, 0);
        cache.scale("#222222");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn session_policy_grows_until_cleared() {
        let mut cache = PaletteCache::new(CachePolicy::Session);
        for i in 0..50u8 {
            cache.scale(&format!("#{:02x}{:02x}{:02x}", i, i, 255 - i));
        }
        assert_eq!(cache.len(), 50);
        assert_eq!(cache.stats().evictions, 0);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn invalid_colors_cache_empty_scales() {
        let mut cache = lru(2);
        assert!(cache.scale("nope").is_empty());
        assert!(cache.scale("NOPE").is_empty());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn cached_scale_matches_direct_generation() {
        let mut cache = PaletteCache::default();
        let cached = cache.scale("#06B6D4").get(Shade::S600);
        assert_eq!(cached, generate_palette("#06b6d4").get(Shade::S600));
    }
}
