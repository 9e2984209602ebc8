// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoising measurement for a single render pass.

use alloc::string::String;
use core::cell::RefCell;

use hashbrown::{Equivalent, HashMap};

use crate::{TextMeasurer, TextMetrics, TextStyle};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    font_size_bits: u64,
    font_weight: u16,
}

/// Borrowed lookup form of [`CacheKey`]; hashes the same fields in the same order.
#[derive(Hash)]
struct CacheKeyRef<'a> {
    text: &'a str,
    font_size_bits: u64,
    font_weight: u16,
}

impl CacheKeyRef<'_> {
    fn to_key(&self) -> CacheKey {
        CacheKey {
            text: String::from(self.text),
            font_size_bits: self.font_size_bits,
            font_weight: self.font_weight,
        }
    }
}

impl Equivalent<CacheKey> for CacheKeyRef<'_> {
    fn equivalent(&self, key: &CacheKey) -> bool {
        self.text == key.text
            && self.font_size_bits == key.font_size_bits
            && self.font_weight == key.font_weight
    }
}

/// A [`TextMeasurer`] wrapper that remembers every measurement it has made.
///
/// Label layout measures the same strings several times (base size, shrunk
/// size, rotated extents, ellipsis probes). Wrapping the host measurer in a
/// `CachedMeasurer` for the duration of one render avoids repeating that work.
///
/// The cache is not meant to outlive a render: styles and fonts may change
/// between renders, so create a fresh wrapper (or [`clear`](Self::clear) it)
/// each time.
pub struct CachedMeasurer<M> {
    inner: M,
    cache: RefCell<HashMap<CacheKey, TextMetrics>>,
}

impl<M> core::fmt::Debug for CachedMeasurer<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CachedMeasurer")
            .field("entries", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the wrapped measurer.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Number of distinct `(text, style)` pairs measured so far.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns `true` if nothing has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    /// Drops every cached measurement.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let key = CacheKeyRef {
            text,
            font_size_bits: style.font_size.to_bits(),
            font_weight: style.font_weight.0,
        };
        if let Some(hit) = self.cache.borrow().get(&key) {
            return *hit;
        }
        // Only misses allocate an owned key.
        let metrics = self.inner.measure(text, style);
        self.cache.borrow_mut().insert(key.to_key(), metrics);
        metrics
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::cell::Cell;

    use super::*;
    use crate::HeuristicTextMeasurer;

    struct CountingMeasurer {
        calls: Cell<usize>,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
            self.calls.set(self.calls.get() + 1);
            HeuristicTextMeasurer.measure(text, style)
        }
    }

    #[test]
    fn repeated_measurements_hit_the_cache() {
        let cached = CachedMeasurer::new(CountingMeasurer {
            calls: Cell::new(0),
        });
        let a = cached.measure("January", TextStyle::new(10.0));
        let b = cached.measure("January", TextStyle::new(10.0));
        assert_eq!(a, b);
        assert_eq!(cached.inner().calls.get(), 1);

        cached.measure("January", TextStyle::new(8.0));
        assert_eq!(cached.inner().calls.get(), 2);
        assert_eq!(cached.len(), 2);

        cached.clear();
        assert!(cached.is_empty());
        cached.measure("January", TextStyle::new(10.0));
        assert_eq!(cached.inner().calls.get(), 3);
    }

    #[test]
    fn borrowed_lookups_find_owned_entries() {
        use core::hash::BuildHasher;

        let cached = CachedMeasurer::new(CountingMeasurer {
            calls: Cell::new(0),
        });
        let style = TextStyle::new(10.0).with_weight(crate::FontWeight::BOLD);
        let text = std::string::String::from("Revenue");
        cached.measure(&text, style);
        cached.measure(&text[..], style);
        assert_eq!(cached.inner().calls.get(), 1);

        let borrowed = CacheKeyRef {
            text: "Revenue",
            font_size_bits: style.font_size.to_bits(),
            font_weight: style.font_weight.0,
        };
        let owned = borrowed.to_key();
        assert!(borrowed.equivalent(&owned));
        let cache = cached.cache.borrow();
        assert_eq!(
            cache.hasher().hash_one(&borrowed),
            cache.hasher().hash_one(&owned)
        );
    }
}
