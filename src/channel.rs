//! Externally requested strikes
//!
//! Sensors are normally polled by the frame loop. Some inputs are easier to
//! catch elsewhere: a GPIO edge interrupt, a test button on another task.
//! Those push a [`Strike`] here and the installation drains the queue at
//! the start of every frame. Built on `critical-section` and
//! `heapless::Deque`, so pushing from an interrupt handler is safe.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::config::SensorBinding;

/// Strike addressed to one rig of an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    /// Index of the rig in the installation
    pub rig: u8,
    /// Drum pixels to flash
    pub binding: SensorBinding,
}

impl Strike {
    /// Strike the whole rig
    pub const fn whole(rig: u8) -> Self {
        Self {
            rig,
            binding: SensorBinding::Whole,
        }
    }
}

/// Returned when the queue is full; carries the rejected strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub Strike);

/// Bounded strike queue holding up to `SIZE` pending strikes
pub struct StrikeChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Strike, SIZE>>>,
}

impl<const SIZE: usize> StrikeChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers
    pub const fn sender(&self) -> StrikeSender<'_, SIZE> {
        StrikeSender { channel: self }
    }

    /// Handle for the frame loop
    pub const fn receiver(&self) -> StrikeReceiver<'_, SIZE> {
        StrikeReceiver { channel: self }
    }

    /// Queue a strike
    ///
    /// A full queue drops the new strike, never an older one.
    pub fn try_send(&self, strike: Strike) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(strike).map_err(QueueFull)
        })
    }

    /// Take the oldest pending strike
    pub fn try_receive(&self) -> Option<Strike> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of pending strikes
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for StrikeChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`StrikeChannel`]
#[derive(Clone, Copy)]
pub struct StrikeSender<'a, const SIZE: usize> {
    channel: &'a StrikeChannel<SIZE>,
}

impl<const SIZE: usize> StrikeSender<'_, SIZE> {
    pub fn try_send(&self, strike: Strike) -> Result<(), QueueFull> {
        self.channel.try_send(strike)
    }
}

/// Consumer handle of a [`StrikeChannel`]
#[derive(Clone, Copy)]
pub struct StrikeReceiver<'a, const SIZE: usize> {
    channel: &'a StrikeChannel<SIZE>,
}

impl<const SIZE: usize> StrikeReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<Strike> {
        self.channel.try_receive()
    }
}
