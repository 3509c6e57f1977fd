// Row queue
//
// Power-of-two ring buffer between the tokenizer (producer) and the
// caller (consumer). One slot is always left free so begin == end means
// empty; when a push would fill that slot the ring doubles first.

/// Starting number of slots.
pub const INITIAL_QUEUE_CAPACITY: usize = 4;

#[derive(Debug)]
pub struct RowQueue<T> {
    slots: Vec<Option<T>>,
    begin: usize,
    end: usize,
}

impl<T> RowQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_QUEUE_CAPACITY)
    }

    /// `capacity` is rounded up to a power of two, minimum 2.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2).next_power_of_two();
        RowQueue {
            slots: Self::empty_slots(capacity),
            begin: 0,
            end: 0,
        }
    }

    fn empty_slots(capacity: usize) -> Vec<Option<T>> {
        std::iter::repeat_with(|| None).take(capacity).collect()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.end.wrapping_sub(self.begin) & self.mask()
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn push(&mut self, item: T) {
        if (self.end + 1) & self.mask() == self.begin {
            self.grow();
        }
        self.slots[self.end] = Some(item);
        self.end = (self.end + 1) & self.mask();
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.begin].take();
        self.begin = (self.begin + 1) & self.mask();
        item
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mask = self.mask();
        (0..self.len()).filter_map(move |i| self.slots[(self.begin + i) & mask].as_ref())
    }

    /// Double the ring and move queued items to `[0, len)`.
    fn grow(&mut self) {
        let len = self.len();
        let new_capacity = self.slots.len() * 2;
        let mut slots = Self::empty_slots(new_capacity);
        let mask = self.mask();
        for (i, slot) in slots.iter_mut().take(len).enumerate() {
            *slot = self.slots[(self.begin + i) & mask].take();
        }
        self.slots = slots;
        self.begin = 0;
        self.end = len;
        tracing::trace!(capacity = new_capacity, queued = len, "row queue grown");
    }
}

impl<T> Default for RowQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
