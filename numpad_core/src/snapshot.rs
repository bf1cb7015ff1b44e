//! Entry snapshot for deterministic replay testing

use serde::{Deserialize, Serialize};

/// Complete observable state of one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub kind: String,
    pub text: String,
    pub precision: u32,
    pub separator: char,
    pub is_clear: bool,
    pub fraction_digits: u32,
    pub show_decimal_point: bool,
}

impl EntrySnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in replay tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.kind.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.text.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.precision.to_le_bytes());
        hasher.update((self.separator as u32).to_le_bytes());
        hasher.update([self.is_clear as u8, self.show_decimal_point as u8]);
        hasher.update(self.fraction_digits.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
