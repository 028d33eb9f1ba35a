use std::fmt;

use swipedeck_ui::SwipeDirection;

/// What the user did with each card, by card id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipeLedger {
    pub saved: Vec<u32>,
    pub rejected: Vec<u32>,
    pub super_liked: Vec<u32>,
}

impl SwipeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, direction: SwipeDirection, id: u32) {
        let list = match direction {
            SwipeDirection::Right => &mut self.saved,
            SwipeDirection::Left => &mut self.rejected,
            SwipeDirection::Top => &mut self.super_liked,
        };
        list.push(id);
    }

    pub fn total(&self) -> usize {
        self.saved.len() + self.rejected.len() + self.super_liked.len()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.saved.contains(&id) || self.rejected.contains(&id) || self.super_liked.contains(&id)
    }
}

impl fmt::Display for SwipeLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "saved {:?}, rejected {:?}, super-liked {:?}",
            self.saved, self.rejected, self.super_liked
        )
    }
}
