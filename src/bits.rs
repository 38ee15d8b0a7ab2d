//! Word-level helpers shared by the block transforms.

use byteorder::ByteOrder;

#[inline(always)]
pub(crate) fn rotl(x: u32, n: u32) -> u32 {
    x.rotate_left(n)
}

#[inline(always)]
pub(crate) fn rotr(x: u32, n: u32) -> u32 {
    x.rotate_right(n)
}

/// Loads `dst.len()` consecutive 32-bit words from `src` using byte order `E`.
#[inline(always)]
pub(crate) fn load_words<E: ByteOrder>(src: &[u8], dst: &mut [u32]) {
    E::read_u32_into(&src[..dst.len() * 4], dst);
}

/// Stores words into `dst` using byte order `E`. `dst` may be shorter than the
/// word slice times four; trailing words are then truncated byte-wise.
pub(crate) fn store_words<E: ByteOrder>(src: &[u32], dst: &mut [u8]) {
    let mut tmp = [0u8; 4];
    for (chunk, word) in dst.chunks_mut(4).zip(src) {
        E::write_u32(&mut tmp, *word);
        chunk.copy_from_slice(&tmp[..chunk.len()]);
    }
}
