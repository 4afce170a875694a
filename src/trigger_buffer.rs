//! Shift-propagated trigger flags
//!
//! A strike enters at slot 0 and walks one slot towards the end of the
//! strip on every frame, which is what draws the comet. The buffer holds one
//! slot per pixel plus a tail slot past the last pixel, where a flag spends
//! its final frame before it is discarded.

use heapless::Vec;

/// Fixed-capacity trigger queue for a strip of up to `N` pixels
#[derive(Debug, Clone)]
pub struct TriggerBuffer<const N: usize> {
    /// One flag per pixel
    slots: Vec<bool, N>,
    /// Slot just past the last pixel
    tail: bool,
}

impl<const N: usize> TriggerBuffer<N> {
    /// Create an empty buffer for `pixels` pixels
    ///
    /// Returns `None` if `pixels` exceeds the capacity `N`.
    pub fn new(pixels: usize) -> Option<Self> {
        let mut slots = Vec::new();
        slots.resize(pixels, false).ok()?;
        Some(Self { slots, tail: false })
    }

    /// Number of slots, including the tail slot
    pub fn len(&self) -> usize {
        self.slots.len() + 1
    }

    /// A buffer always holds at least its tail slot
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Light slot 0
    pub fn ignite(&mut self) {
        match self.slots.first_mut() {
            Some(first) => *first = true,
            None => self.tail = true,
        }
    }

    /// Advance every flag one slot towards the tail
    ///
    /// The tail flag is dropped and slot 0 is cleared.
    pub fn tick(&mut self) {
        let len = self.slots.len();
        let Some(last) = self.slots.last().copied() else {
            self.tail = false;
            return;
        };
        self.tail = last;
        self.slots.copy_within(..len - 1, 1);
        self.slots[0] = false;
    }

    /// Whether slot `index` holds a flag this frame
    ///
    /// Index `pixels` is the tail slot; anything past it reads as unlit.
    pub fn is_lit(&self, index: usize) -> bool {
        match self.slots.get(index) {
            Some(lit) => *lit,
            None => index == self.slots.len() && self.tail,
        }
    }

    /// Number of lit slots, tail included
    pub fn lit_count(&self) -> usize {
        self.slots.iter().filter(|lit| **lit).count() + usize::from(self.tail)
    }

    /// Drop every flag
    pub fn clear(&mut self) {
        self.slots.fill(false);
        self.tail = false;
    }
}
