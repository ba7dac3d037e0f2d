use serde::{Deserialize, Serialize};

/// Position within the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(usize);

impl Cursor {
    pub fn position(self) -> usize {
        self.0
    }

    pub fn set(&mut self, position: usize) {
        self.0 = position;
    }

    pub fn up(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.0 + 1 < len {
            self.0 += 1;
        }
    }

    pub fn first(&mut self) {
        self.0 = 0;
    }

    pub fn last(&mut self, len: usize) {
        if len > 0 {
            self.0 = len - 1;
        }
    }

    /// A rebuilt list that no longer reaches the cursor sends it home.
    pub fn snap_after_rebuild(&mut self, len: usize) {
        if self.0 >= len {
            self.0 = 0;
        }
    }

    /// Catalog index under the cursor.
    pub fn station(self, visible: &[usize]) -> Option<usize> {
        visible.get(self.0).copied()
    }
}
