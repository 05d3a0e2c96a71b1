// Invocation-scoped string interning cache.
//
// The number of distinct command tokens in a blueprint is tiny, but the
// same tokens repeat millions of times across a large region. Interning
// them keeps the sparse volume's per-cell cost to one shared `Rc<str>`
// instead of a fresh allocation per tile, which is the difference
// between handling a full-map sweep and running out of memory.
//
// The cache is owned by one invocation's call tree (`export.rs` creates
// it and drops it when the sweep finishes), so there is no global state
// to clear and nothing to guard if the host ever overlaps invocations —
// each gets its own cache.

use rustc_hash::FxHashSet;
use std::rc::Rc;

/// Content-deduplicating store of command tokens.
#[derive(Debug, Default)]
pub struct StringCache {
    strings: FxHashSet<Rc<str>>,
}

impl StringCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared storage slot for `text`, allocating it on
    /// first sight. Repeated calls with equal content return clones of
    /// the same `Rc`.
    pub fn intern(&mut self, text: &str) -> Rc<str> {
        if let Some(existing) = self.strings.get(text) {
            return Rc::clone(existing);
        }
        let stored: Rc<str> = Rc::from(text);
        self.strings.insert(Rc::clone(&stored));
        stored
    }

    /// Number of distinct tokens interned so far.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_content_shares_storage() {
        let mut cache = StringCache::new();
        let a = cache.intern("wc(3x3)");
        let b = cache.intern("wc(3x3)");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_content_gets_distinct_slots() {
        let mut cache = StringCache::new();
        let a = cache.intern("d");
        let b = cache.intern("h");
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
        assert_eq!(&*a, "d");
        assert_eq!(&*b, "h");
    }

    #[test]
    fn starts_empty() {
        let cache = StringCache::new();
        assert!(cache.is_empty());
    }
}
