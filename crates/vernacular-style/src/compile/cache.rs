//! Parse result caching.

use std::collections::{HashMap, VecDeque};

use vernacular_core::logging::targets;

use crate::parser::ParseOutput;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Cache key for parsed source: a content hash plus the byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSignature {
    hash: u64,
    len: usize,
}

impl SourceSignature {
    /// Compute the signature of a source text.
    pub fn of(source: &str) -> Self {
        Self {
            hash: fnv1a(source.as_bytes()),
            len: source.len(),
        }
    }
}

/// Bounded FIFO cache of parse results.
///
/// When full, the oldest entry is evicted. A capacity of zero disables
/// caching.
#[derive(Debug)]
pub struct ParseCache {
    entries: HashMap<SourceSignature, ParseOutput>,
    order: VecDeque<SourceSignature>,
    capacity: usize,
}

impl ParseCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Get a cached result.
    pub fn get(&self, signature: &SourceSignature) -> Option<&ParseOutput> {
        self.entries.get(signature)
    }

    /// Insert a result, evicting the oldest entry when full.
    pub fn insert(&mut self, signature: SourceSignature, output: ParseOutput) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(signature, output).is_some() {
            return;
        }
        self.order.push_back(signature);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::trace!(target: targets::COMPILE, "evicted oldest parse result");
            }
        }
    }

    /// Invalidate all cached results.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}
