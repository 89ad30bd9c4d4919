use circular_buffer::CircularBuffer;

use crate::logging::trace;

/// The most recent wind speeds, oldest evicted first.
///
/// The display keeps one of these per column (`SpeedHistory<X>`) so that every sample has a pixel in the trail.
pub struct SpeedHistory<const CAP: usize> {
    /// oldest at the front, newest at the back
    buffer: CircularBuffer<CAP, f32>,
}

impl<const CAP: usize> Default for SpeedHistory<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> SpeedHistory<CAP> {
    pub fn new() -> Self {
        // start empty. zeroes would drag the average down until the buffer filled
        Self {
            buffer: CircularBuffer::new(),
        }
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// once full, this drops the oldest sample
    pub fn push(&mut self, speed: f32) {
        self.buffer.push_back(speed);

        trace!("history: {} samples, newest {}", self.buffer.len(), speed);
    }

    /// Arithmetic mean of whatever is buffered. An empty history averages to 0.
    pub fn average(&self) -> f32 {
        if self.buffer.is_empty() {
            return 0.0;
        }

        self.buffer.iter().sum::<f32>() / self.buffer.len() as f32
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = f32> + '_ {
        self.buffer.iter().rev().copied()
    }

    pub fn snapshot(&self) -> heapless::Vec<f32, CAP> {
        self.iter_newest_first().collect()
    }
}
