//! ABI encoding for the token constructor, `(string, string, address)`.
//!
//! Standard head/tail layout: three 32-byte head words (two offsets and the
//! inlined address), followed by the length-prefixed, zero-padded string
//! data. The encoded blob is appended to the creation bytecode.

use crate::address::Address;

const WORD: usize = 32;

pub fn encode_constructor_args(name: &str, symbol: &str, system_wallet: &Address) -> Vec<u8> {
    let head_len = 3 * WORD;
    let name_tail = encode_string(name);
    let symbol_tail = encode_string(symbol);

    let mut out = Vec::with_capacity(head_len + name_tail.len() + symbol_tail.len());
    out.extend_from_slice(&encode_uint(head_len as u64));
    out.extend_from_slice(&encode_uint((head_len + name_tail.len()) as u64));
    out.extend_from_slice(&encode_address(system_wallet));
    out.extend_from_slice(&name_tail);
    out.extend_from_slice(&symbol_tail);
    out
}

fn encode_uint(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode_address(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 20..].copy_from_slice(address.as_bytes());
    word
}

fn encode_string(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let padded_len = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded_len);
    out.extend_from_slice(&encode_uint(bytes.len() as u64));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded_len, 0);
    out
}
