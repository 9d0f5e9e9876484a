//! Size observation for the terminal surface.
//!
//! A terminal has no layout engine to subscribe to. Observation here means
//! remembering which items are mounted so the host can re-measure them by
//! wrapping their text at the current content width.

use crate::model::EntryId;
use crate::virtual_list::{ObservationId, ObserveError, SizeObserver};
use std::collections::HashMap;

/// Tracks mounted entries and the column width they are measured at.
#[derive(Debug, Default)]
pub struct RowObserver {
    width: u16,
    next_id: u64,
    observed: HashMap<ObservationId, usize>,
}

impl RowObserver {
    /// Observer measuring at `width` columns.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Current content width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Update the content width after a resize. Existing observations stay
    /// live and are re-measured at the new width.
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Indices with a live observation, ascending.
    pub fn observed_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.observed.values().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Number of live observations.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Returns true if nothing is observed.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

impl SizeObserver<EntryId> for RowObserver {
    fn observe(&mut self, _key: &EntryId, index: usize) -> Result<ObservationId, ObserveError> {
        if self.width == 0 {
            return Err(ObserveError::Unsupported(
                "terminal has no columns to measure against".to_string(),
            ));
        }
        self.next_id += 1;
        let id = ObservationId(self.next_id);
        self.observed.insert(id, index);
        Ok(id)
    }

    fn unobserve(&mut self, id: ObservationId) {
        self.observed.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_then_unobserve() {
        let mut observer = RowObserver::new(40);
        let a = observer.observe(&EntryId::new(1), 3).unwrap();
        let b = observer.observe(&EntryId::new(2), 1).unwrap();
        assert_ne!(a, b);
        assert_eq!(observer.observed_indices(), vec![1, 3]);

        observer.unobserve(a);
        assert_eq!(observer.observed_indices(), vec![1]);
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn zero_width_is_unsupported() {
        let mut observer = RowObserver::new(0);
        let result = observer.observe(&EntryId::new(1), 0);
        assert!(matches!(result, Err(ObserveError::Unsupported(_))));
        assert!(observer.is_empty());
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut observer = RowObserver::new(10);
        observer.unobserve(ObservationId(99));
        assert!(observer.is_empty());
    }
}
