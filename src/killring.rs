//! The kill ring shared by all sessions of a process.

/// Number of slots; a power of two so indices wrap with a mask.
pub const KILL_RING_SIZE: usize = 32;
const MASK: usize = KILL_RING_SIZE - 1;

#[derive(Debug, Clone)]
pub struct KillRing {
    slots: Vec<Option<Vec<char>>>,
    /// Slot the next kill is stored in.
    next: usize,
    /// Slot most recently put, the starting point of put-pop.
    last_put: usize,
}

impl Default for KillRing {
    fn default() -> Self {
        Self {
            slots: vec![None; KILL_RING_SIZE],
            next: 0,
            last_put: MASK,
        }
    }
}

impl KillRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores killed text, overwriting the oldest slot once full. Empty
    /// text is not stored.
    pub fn push(&mut self, text: Vec<char>) {
        if text.is_empty() {
            return;
        }
        self.slots[self.next] = Some(text);
        self.next = (self.next + 1) & MASK;
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The most recent kill, which becomes the put-pop starting point.
    pub fn take_latest(&mut self) -> Option<&[char]> {
        let index = self.next.wrapping_sub(1) & MASK;
        let text = self.slots[index].as_deref()?;
        self.last_put = index;
        Some(text)
    }

    /// The nearest non-empty slot older than the last put, cycling through
    /// the ring. Returns `None` when the ring is empty.
    pub fn take_older(&mut self) -> Option<&[char]> {
        let mut index = self.last_put;
        for _ in 0..KILL_RING_SIZE {
            index = index.wrapping_sub(1) & MASK;
            if self.slots[index].is_some() {
                self.last_put = index;
                return self.slots[index].as_deref();
            }
        }
        None
    }

    /// Live entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &[char]> {
        (1..=KILL_RING_SIZE)
            .map(move |back| self.next.wrapping_sub(back) & MASK)
            .filter_map(move |i| self.slots[i].as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn latest_then_older_cycles() {
        let mut ring = KillRing::new();
        ring.push(chars("abc"));
        ring.push(chars("xyz"));
        assert_eq!(ring.take_latest(), Some(&chars("xyz")[..]));
        assert_eq!(ring.take_older(), Some(&chars("abc")[..]));
        assert_eq!(ring.take_older(), Some(&chars("xyz")[..]));
    }

    #[test]
    fn wraps_after_capacity() {
        let mut ring = KillRing::new();
        for i in 0..KILL_RING_SIZE + 3 {
            ring.push(chars(&i.to_string()));
        }
        assert_eq!(ring.entries().count(), KILL_RING_SIZE);
        assert_eq!(ring.take_latest(), Some(&chars("34")[..]));
        assert!(!ring.entries().any(|e| e == chars("2")));
    }

    #[test]
    fn empty_ring_yields_nothing() {
        let mut ring = KillRing::new();
        ring.push(Vec::new());
        assert!(ring.is_empty());
        assert_eq!(ring.take_latest(), None);
        assert_eq!(ring.take_older(), None);
    }
}
