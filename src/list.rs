/// Growth-only arena addressed by `i32` index.
///
/// Indices are handed out in push order and stay valid for the life of the list, which is
/// what lets the quadtree link nodes to each other by index instead of by reference.
#[derive(Clone, Debug)]
pub struct List<T> {
    data: Vec<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: i32) -> Self {
        Self {
            data: Vec::with_capacity(capacity.max(0) as usize),
        }
    }

    pub fn size(&self) -> i32 {
        self.data.len() as i32
    }

    pub fn get(&self, index: i32) -> &T {
        debug_assert!(index >= 0 && index < self.size());
        &self.data[index as usize]
    }

    pub fn get_mut(&mut self, index: i32) -> &mut T {
        debug_assert!(index >= 0 && index < self.size());
        &mut self.data[index as usize]
    }

    pub fn push(&mut self, element: T) -> i32 {
        let index = self.size();
        self.data.push(element);
        index
    }

    /// Removes the most recently pushed element. Only used when the list serves as a
    /// traversal stack; arena indices are never reused.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    pub fn indices(&self) -> impl Iterator<Item = i32> {
        0..self.size()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}
