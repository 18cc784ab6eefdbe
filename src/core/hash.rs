//! Key hashing for the chained hash table

use crate::core::types::VersionId;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Compute the 64-bit FNV-1a hash of data
pub fn fnv1a_64(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in data {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Compute the FNV-1a hash of a string's UTF-8 bytes
pub fn hash_string(s: &str) -> u64 {
    fnv1a_64(s.as_bytes())
}

/// Keys that can be placed in a [`HashTable`](crate::storage::HashTable)
pub trait TableKey: Eq {
    fn table_hash(&self) -> u64;
}

// Integer keys hash to themselves.
macro_rules! identity_table_key {
    ($($t:ty),*) => {
        $(
            impl TableKey for $t {
                fn table_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

identity_table_key!(u8, u16, u32, u64, usize);

impl TableKey for VersionId {
    fn table_hash(&self) -> u64 {
        u64::from(self.get())
    }
}

impl TableKey for String {
    fn table_hash(&self) -> u64 {
        hash_string(self)
    }
}

impl TableKey for str {
    fn table_hash(&self) -> u64 {
        hash_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_vectors() {
        assert_eq!(fnv1a_64(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_string_and_str_agree() {
        let owned = String::from("Report-2024.TXT");
        assert_eq!(owned.table_hash(), "Report-2024.TXT".table_hash());
    }

    #[test]
    fn test_full_byte_range_distinguished() {
        // The old lowercase-only polynomial hash collided on these.
        assert_ne!(hash_string("A"), hash_string("a"));
        assert_ne!(hash_string("ä"), hash_string("a"));
        assert_ne!(hash_string("1"), hash_string("!"));
    }

    #[test]
    fn test_integer_identity() {
        assert_eq!(42u32.table_hash(), 42);
        assert_eq!(VersionId::new(17).table_hash(), 17);
    }
}
