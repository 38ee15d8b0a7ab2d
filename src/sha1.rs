use byteorder::BigEndian;
use digest::typenum::U20;

use crate::bits::{load_words, rotl, store_words};
use crate::hasher::{md_pad, BlockTransform, FixedTransform, Hasher};

/// The size in bytes of a SHA-1 checksum.
pub const DIGEST_SIZE: usize = 20;

/// Block size, in bytes, of the SHA-1 compression function.
pub const BLOCK_SIZE: usize = 64;

/// Sha1 is a streaming SHA-1 hasher.
pub type Sha1 = Hasher<Sha1Core>;

const H: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

const K0020: u32 = 0x5a827999;
const K2040: u32 = 0x6ed9eba1;
const K4060: u32 = 0x8f1bbcdc;
const K6080: u32 = 0xca62c1d6;

/// Sha1Core is the SHA-1 block transform.
#[derive(Clone)]
pub struct Sha1Core {
    h: [u32; 5],
    w: [u32; 80],
}

impl Default for Sha1Core {
    fn default() -> Self {
        Self { h: H, w: [0; 80] }
    }
}

impl BlockTransform for Sha1Core {
    fn name(&self) -> &'static str {
        "sha1"
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
        for j in 16..80 {
            w[j] = rotl(w[j - 3] ^ w[j - 8] ^ w[j - 14] ^ w[j - 16], 1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.h;
        for (j, wj) in w.iter().enumerate() {
            let (f, k) = match j / 20 {
                0 => ((b & c) | (!b & d), K0020),
                1 => (b ^ c ^ d, K2040),
                2 => ((b & c) ^ (b & d) ^ (c & d), K4060),
                _ => (b ^ c ^ d, K6080),
            };
            let temp = rotl(a, 5)
                .wrapping_add(e)
                .wrapping_add(f)
                .wrapping_add(k)
                .wrapping_add(*wj);
            e = d;
            d = c;
            c = rotl(b, 30);
            b = a;
            a = temp;
        }

        for (h, v) in self.h.iter_mut().zip([a, b, c, d, e]) {
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

impl FixedTransform for Sha1Core {
    type OutputSize = U20;
}
