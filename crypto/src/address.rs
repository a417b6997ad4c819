//! Address derivation for accounts and group contracts.
//!
//! Address format: `hive_` + base32(key, 52 chars) + base32(checksum, 8 chars)
//!
//! The 32-byte key is an account's Ed25519 public key, or for a group
//! contract the tagged Blake2b hash of its factory address and creation
//! nonce. Checksum: first 5 bytes of Blake2b-256(key).

use crate::hash::{address_checksum, tagged_hash, ADDRESS_CHECKSUM_LEN};
use hive_types::{Address, PublicKey};

/// Base32 alphabet (avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[BASE32_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// 52 key characters + 8 checksum characters.
const ENCODED_LEN: usize = 60;
const KEY_CHARS: usize = 52;

/// Domain separator for contract address derivation.
const CONTRACT_DOMAIN: &[u8] = b"hive-contract";

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }
    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    (pos == N).then_some(result)
}

fn encode_address(key: &[u8; 32]) -> Address {
    let body = encode_base32(key) + &encode_base32(&address_checksum(key));
    Address::from_body(&body)
}

/// Derive the address of the account controlled by `public_key`.
pub fn derive_address(public_key: &PublicKey) -> Address {
    encode_address(public_key.as_bytes())
}

/// Derive the address of the `nonce`-th contract created by `factory`.
pub fn contract_address(factory: &Address, nonce: u64) -> Address {
    let key = tagged_hash(
        CONTRACT_DOMAIN,
        &[factory.as_str().as_bytes(), &nonce.to_le_bytes()],
    );
    encode_address(&key)
}

/// Extract the 32-byte key from a well-formed address.
///
/// Returns `None` on a bad prefix, length, alphabet or checksum.
pub fn decode_address(address: &str) -> Option<[u8; 32]> {
    let encoded = address.strip_prefix(Address::PREFIX)?;
    if !encoded.is_ascii() || encoded.len() != ENCODED_LEN {
        return None;
    }
    let key: [u8; 32] = decode_base32_fixed(&encoded[..KEY_CHARS])?;
    let checksum: [u8; ADDRESS_CHECKSUM_LEN] = decode_base32_fixed(&encoded[KEY_CHARS..])?;
    if checksum != address_checksum(&key) {
        return None;
    }
    Some(key)
}

/// Validate that an address string is well-formed with a correct checksum.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}
