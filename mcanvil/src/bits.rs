//! Nibble packing specific to the pre-1.13 section format.
//!
//! Block metadata, block light, sky light and the high bits of block ids are
//! stored as 4-bit values, two to a byte. The value for an even index sits in
//! the high nibble of its byte and the following odd index in the low nibble.

use bit_field::BitField;

/// Read the 4-bit value at `index` from a packed array.
pub(crate) fn get_nibble(packed: &[i8], index: usize) -> u8 {
    let byte = packed[index / 2] as u8;
    if index % 2 == 0 {
        byte.get_bits(4..8)
    } else {
        byte.get_bits(0..4)
    }
}

/// Pack 4-bit values two to a byte. Each value is shifted in from the low end,
/// so the earlier of each pair ends up in the high nibble. Only the low four
/// bits of each value are kept.
pub(crate) fn pack_nibbles(values: impl ExactSizeIterator<Item = u8>) -> Vec<i8> {
    let mut packed = vec![0u8; (values.len() + 1) / 2];
    for (i, v) in values.enumerate() {
        let byte = &mut packed[i / 2];
        *byte = (*byte << 4) | (v & 0x0f);
    }
    packed.into_iter().map(|b| b as i8).collect()
}
