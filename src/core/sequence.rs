/// Hands out monotonically increasing request numbers.
///
/// A response is applied only if the number it was issued with is still the latest one
/// recorded for its slot; anything older is stale and dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    last: u64,
}

impl RequestSequencer {
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// Outcome of applying a response that may have been superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<T> {
    Current(T),
    Stale,
}

impl<T> Applied<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Applied::Stale)
    }

    pub fn current(self) -> Option<T> {
        match self {
            Applied::Current(value) => Some(value),
            Applied::Stale => None,
        }
    }
}
