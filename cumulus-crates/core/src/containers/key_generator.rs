use std::marker::PhantomData;

use super::StorageKey;

/// Generates a sequence of [`StorageKey`]s.
///
/// The generator is owned by whoever hands out the identifiers (e.g. the store which creates
/// propagators), there is no process-wide counter.
#[derive(Clone, Copy, Debug)]
pub struct KeyGenerator<Key> {
    key: PhantomData<Key>,
    counter: usize,
}

impl<Key> Default for KeyGenerator<Key> {
    fn default() -> Self {
        Self {
            key: Default::default(),
            counter: Default::default(),
        }
    }
}

impl<Key: StorageKey> KeyGenerator<Key> {
    /// Generate a new `Key`.
    pub fn next_key(&mut self) -> Key {
        let key = Key::create_from_index(self.counter);
        self.counter += 1;
        key
    }

    /// The number of keys which have been generated so far.
    pub fn len(&self) -> usize {
        self.counter
    }

    pub fn is_empty(&self) -> bool {
        self.counter == 0
    }
}
