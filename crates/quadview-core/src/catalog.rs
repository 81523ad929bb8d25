/// Direction for set navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Ordered image-set identifiers plus the current position.
#[derive(Clone, Debug, Default)]
pub struct SetCatalog {
    sets: Vec<String>,
    /// Always in range, or `None` when there are no sets.
    current: Option<usize>,
}

impl SetCatalog {
    pub fn new(sets: Vec<String>) -> Self {
        Self { sets, current: None }
    }

    pub fn sets(&self) -> &[String] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Current index, or -1 when nothing is selected.
    pub fn index(&self) -> isize {
        self.current.map_or(-1, |i| i as isize)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.map(|i| self.sets[i].as_str())
    }

    /// Move to `index`. Returns the set id when the position actually changes.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index >= self.sets.len() || self.current == Some(index) {
            return None;
        }
        self.current = Some(index);
        Some(self.sets[index].as_str())
    }

    /// Step one set forward or back, wrapping around the ends.
    pub fn step(&mut self, direction: Direction) -> Option<&str> {
        let len = self.sets.len();
        if len == 0 {
            return None;
        }
        let target = match (self.current, direction) {
            (None, _) => 0,
            (Some(i), Direction::Next) => (i + 1) % len,
            (Some(i), Direction::Previous) => (i + len - 1) % len,
        };
        self.select(target)
    }

    /// Select the set with the given identifier.
    pub fn select_id(&mut self, id: &str) -> Option<&str> {
        let index = self.sets.iter().position(|s| s == id)?;
        self.select(index)
    }
}
