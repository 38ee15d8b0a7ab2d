use byteorder::BigEndian;
use digest::typenum::U32;

use crate::bits::{load_words, rotr, store_words};
use crate::hasher::{md_pad, BlockTransform, FixedTransform, Hasher};

/// The size in bytes of a SHA-256 checksum.
pub const DIGEST_SIZE: usize = 32;

/// Block size, in bytes, of the SHA-256 compression function.
pub const BLOCK_SIZE: usize = 64;

/// Sha256 is a streaming SHA-256 hasher.
pub type Sha256 = Hasher<Sha256Core>;

const H: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Sha256Core is the SHA-256 block transform.
#[derive(Clone)]
pub struct Sha256Core {
    h: [u32; 8],
    w: [u32; 64],
}

impl Default for Sha256Core {
    fn default() -> Self {
        Self { h: H, w: [0; 64] }
    }
}

impl BlockTransform for Sha256Core {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn compress(&mut self, block: &[u8]) {
        let w = &mut self.w;
        load_words::<BigEndian>(block, &mut w[..16]);
        for j in 16..64 {
            let s0 = rotr(w[j - 15], 7) ^ rotr(w[j - 15], 18) ^ (w[j - 15] >> 3);
            let s1 = rotr(w[j - 2], 17) ^ rotr(w[j - 2], 19) ^ (w[j - 2] >> 10);
            w[j] = w[j - 16]
                .wrapping_add(s0)
                .wrapping_add(w[j - 7])
                .wrapping_add(s1);
        }

        let mut r = self.h;
        for (k, wj) in K.iter().zip(w.iter()) {
            let [a, b, c, d, e, f, g, h] = r;
            let s1 = rotr(e, 6) ^ rotr(e, 11) ^ rotr(e, 25);
            let ch = (e & f) ^ (!e & g);
            let t1 = h
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(*k)
                .wrapping_add(*wj);
            let s0 = rotr(a, 2) ^ rotr(a, 13) ^ rotr(a, 22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let t2 = s0.wrapping_add(maj);
            r = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
        }

        for (h, v) in self.h.iter_mut().zip(r) {
            *h = h.wrapping_add(v);
        }
    }

    fn finalize(&mut self, block: &mut [u8], filled: usize, total: u64, out: &mut [u8]) {
        md_pad::<BigEndian, _>(self, block, filled, total);
        store_words::<BigEndian>(&self.h, out);
    }

    fn reset(&mut self) {
        self.h = H;
    }
}

impl FixedTransform for Sha256Core {
    type OutputSize = U32;
}

#[cfg(test)]
pub mod test {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_vector() -> Result<()> {
        let vectors = [
            (
                "",
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
            (
                "abc",
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
            (
                "The quick brown fox jumps over the lazy dog",
                "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
            ),
            (
                "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
            ),
            (
                "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab",
                "539deb4a951195ca3377514b8a44b95061b4fcd5ae21b29be3748cc835992b52",
            ),
        ];
        for (input, output) in vectors {
            let mut h = Sha256::default();
            let mut out = [0u8; DIGEST_SIZE];
            h.update(input.as_bytes()).digest_into(&mut out)?;
            assert_eq!(hex::decode(output)?, out, "input {:?}", input);
        }
        Ok(())
    }

    #[test]
    fn million_a() {
        let mut h = Sha256::default();
        let input = vec![b'a'; 1_000_000];
        // uneven splits cross every buffering path
        for chunk in input.chunks(997) {
            h.update(chunk);
        }
        assert_eq!(
            h.hex_digest(),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }
}
