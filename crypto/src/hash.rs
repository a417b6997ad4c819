//! Blake2b-256 digests for admission messages and address derivation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Bytes of key digest appended to an encoded address.
pub const ADDRESS_CHECKSUM_LEN: usize = 5;

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Blake2b256::digest(data));
    output
}

/// Hash `parts` under a domain `tag`.
///
/// Each part is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` never
/// collide, and no two tags share a digest space.
pub fn tagged_hash(tag: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update((tag.len() as u32).to_le_bytes());
    hasher.update(tag);
    for part in parts {
        hasher.update((part.len() as u32).to_le_bytes());
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Leading digest bytes of `key`, used to catch mistyped addresses.
pub fn address_checksum(key: &[u8; 32]) -> [u8; ADDRESS_CHECKSUM_LEN] {
    let digest = blake2b_256(key);
    let mut checksum = [0u8; ADDRESS_CHECKSUM_LEN];
    checksum.copy_from_slice(&digest[..ADDRESS_CHECKSUM_LEN]);
    checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_boundaries_matter() {
        assert_ne!(
            tagged_hash(b"join", &[b"hive_ab", b"c"]),
            tagged_hash(b"join", &[b"hive_a", b"bc"])
        );
    }

    #[test]
    fn tags_separate_domains() {
        assert_ne!(
            tagged_hash(b"join", &[b"hive_abc"]),
            tagged_hash(b"hive-contract", &[b"hive_abc"])
        );
    }

    #[test]
    fn checksum_is_digest_prefix() {
        let key = [7u8; 32];
        assert_eq!(address_checksum(&key)[..], blake2b_256(&key)[..ADDRESS_CHECKSUM_LEN]);
        assert_ne!(address_checksum(&key), address_checksum(&[8u8; 32]));
    }
}
