use crate::types::{KeySlot, MifareKey};

/// The two MIFARE keys the host has set. Held in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet {
    a: MifareKey,
    b: MifareKey,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: KeySlot, key: MifareKey) {
        match slot {
            KeySlot::A => self.a = key,
            KeySlot::B => self.b = key,
        }
    }

    pub fn get(&self, slot: KeySlot) -> &MifareKey {
        match slot {
            KeySlot::A => &self.a,
            KeySlot::B => &self.b,
        }
    }
}
