//! Fetched pages

/// One response of the products API: the server-side match count and the
/// records actually returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }

    /// The server matched more records than it returned
    pub fn is_truncated(&self) -> bool {
        self.total > self.items.len() as u64
    }

    pub fn returned(&self) -> usize {
        self.items.len()
    }
}
