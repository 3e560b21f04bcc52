use rustc_hash::FxHashMap;

/// Occurrence count of every symbol seen in one compression run. Symbols that never occur
/// have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqTable {
    counts: FxHashMap<u8, u64>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Set the count for a symbol, returning the previous count if there was one.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    /// Count for a symbol, 0 if it was never seen.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, which is the length of the data the table was built from.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// (symbol, count) pairs in ascending symbol order. Anything that needs a stable order
    /// (tree seeding, archive headers) goes through here rather than the hash map.
    pub fn sorted(&self) -> Vec<(u8, u64)> {
        let mut pairs: Vec<(u8, u64)> = self.counts.iter().map(|(&s, &c)| (s, c)).collect();
        pairs.sort_unstable_by_key(|&(s, _)| s);
        pairs
    }
}

impl FromIterator<(u8, u64)> for FreqTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u8]) -> FreqTable {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(sym, &count)| (sym as u8, count))
        .collect()
}
