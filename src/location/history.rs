use crate::location::sample::PositionSample;

/// Ordered record of every sample the filter accepted.
///
/// No deduplication happens here; callers only append samples that already
/// passed [`crate::location::is_different`].
#[derive(Debug, Clone, Default)]
pub struct LocationHistory {
    samples: Vec<PositionSample>,
}

impl LocationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sample: PositionSample) {
        self.samples.push(sample);
    }

    /// Drops every stored sample. Used when the host is low on memory.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn last(&self) -> Option<&PositionSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionSample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<PositionSample> {
        self.samples.clone()
    }
}
