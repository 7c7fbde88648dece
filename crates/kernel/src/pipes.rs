use serde::{Deserialize, Serialize};

/// Fixed-length rolling window of pipe gap heights.
///
/// Index 0 is the oldest (left-most) pipe. The only mutation is
/// [`PipeWindow::rotate_in`], which drops the oldest height and appends a new
/// one, so the length fixed at construction is kept for the window's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeWindow {
    heights: Box<[f32]>,
    /// Slot holding the oldest height.
    head: usize,
}

impl PipeWindow {
    /// Build a window from heights in left-to-right order.
    pub fn from_heights(heights: impl IntoIterator<Item = f32>) -> Self {
        Self {
            heights: heights.into_iter().collect(),
            head: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of the `index`-th pipe counted from the oldest.
    pub fn get(&self, index: usize) -> Option<f32> {
        if index >= self.heights.len() {
            return None;
        }
        Some(self.heights[(self.head + index) % self.heights.len()])
    }

    /// Drop the oldest height, append `height` as the newest, and return the
    /// dropped value. An empty window returns `None` and stays empty.
    pub fn rotate_in(&mut self, height: f32) -> Option<f32> {
        if self.heights.is_empty() {
            return None;
        }
        let dropped = std::mem::replace(&mut self.heights[self.head], height);
        self.head = (self.head + 1) % self.heights.len();
        Some(dropped)
    }

    /// Heights from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let (newer, older) = self.heights.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let w = PipeWindow::from_heights([1.0, 2.0, 3.0]);
        assert_eq!(w.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(w.get(0), Some(1.0));
        assert_eq!(w.get(2), Some(3.0));
        assert_eq!(w.get(3), None);
    }

    #[test]
    fn rotate_drops_oldest_and_appends_newest() {
        let mut w = PipeWindow::from_heights([1.0, 2.0, 3.0]);
        assert_eq!(w.rotate_in(4.0), Some(1.0));
        assert_eq!(w.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(w.rotate_in(5.0), Some(2.0));
        assert_eq!(w.to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(w.get(0), Some(3.0));
    }

    #[test]
    fn length_is_conserved_across_many_rotations() {
        let mut w = PipeWindow::from_heights((0..8).map(|i| i as f32));
        for i in 0..1000 {
            w.rotate_in(i as f32);
            assert_eq!(w.len(), 8);
        }
        assert_eq!(w.to_vec(), (992..1000).map(|i| i as f32).collect::<Vec<_>>());
    }

    #[test]
    fn empty_window_ignores_rotation() {
        let mut w = PipeWindow::from_heights([]);
        assert!(w.is_empty());
        assert_eq!(w.rotate_in(1.0), None);
        assert_eq!(w.iter().count(), 0);
    }
}
