use byteorder::LittleEndian;
use digest::typenum::U16;

use crate::bits::{load_words, rotl, store_words};
use crate::hasher::{md_pad, BlockTransform, FixedTransform, Hasher};

/// The size in bytes of an MD5 checksum.
pub const DIGEST_SIZE: usize = 16;

/// Block size, in bytes, of the MD5 compression function.
pub const BLOCK_SIZE: usize = 64;

/// Md5 is a streaming MD5 hasher.
pub type Md5 = Hasher<Md5Core>;

const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

// Per-round rotate amounts, four per round.
const S: [u32; 16] = [7, 12, 17, 22, 5, 9, 14, 20, 4, 11, 16, 23, 6, 10, 15, 21];

// T[j] = floor(2^32 * |sin(j + 1)|)
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Md5Core is the MD5 block transform: 64 steps over 16 little-endian words.
#[derive(Clone)]
pub struct Md5Core {
    h: [u32; 4],
}

impl Default for Md5Core {
    fn default() -> Self {
        Self { h: IV }
    }
}

impl BlockTransform for Md5Core {
    fn name(&self) -> &'static str {
        "md5"
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn compress(&mut self, block: &[u8]) {
        let mut m = [0u32; 16];
        load_words::<LittleEndian>(block, &mut m);

        let [mut a, mut b, mut c, mut d] = self.h;
        for j in 0..64 {
            let round = j / 16;
            let (f, g) = match round {
                0 => ((b & c) | (!b & d), j),
                1 => ((b & d) | (c & !d), (5 * j + 1) & 0x0f),
                2 => (b ^ c ^ d, (3 * j + 5) & 0x0f),
                _ => (c ^ (b | !d), (7 * j) & 0x0f),
            };
            let sum = a.wrapping_add(f).wrapping_add(m[g]).wrapping_add(T[j]);
            let temp = b.wrapping_add(rotl(sum, S[(round << 2) | (j & 3)]));
            a = d;
            d = c;
            c = b;
            b = temp;
        }

        self.h[0] = self.h[0].wrapping_add(a);
        self.h[1] = self.h[1].wrapping_add(b);
        self.h[2] = self.h[2].wrapping_add(c);
        self.h[3] = self.h[3].wrapping_add(d);
    }

    fn finalize(&mut self, block: &mut [u8], filled: usize, total: u64, out: &mut [u8]) {
        md_pad::<LittleEndian, _>(self, block, filled, total);
        store_words::<LittleEndian>(&self.h, out);
    }

    fn reset(&mut self) {
        self.h = IV;
    }
}

impl FixedTransform for Md5Core {
    type OutputSize = U16;
}

#[cfg(test)]
pub mod test {
    use super::*;

    struct TestElement {
        input: &'static str,
        output: &'static str,
    }

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "d41d8cd98f00b204e9800998ecf8427e",
        },
        TestElement {
            input: "a",
            output: "0cc175b9c0f1b6a831c399e269772661",
        },
        TestElement {
            input: "abc",
            output: "900150983cd24fb0d6963f7d28e17f72",
        },
        TestElement {
            input: "message digest",
            output: "f96b697d7cb7938d525a2f31aaf161d0",
        },
        TestElement {
            input: "abcdefghijklmnopqrstuvwxyz",
            output: "c3fcd3d76192e4007dfb496cca67e13b",
        },
        TestElement {
            input: "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            output: "d174ab98d277d9f5a5611c2c9f419d9f",
        },
        TestElement {
            input: "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            output: "57edf4a22be3c955ac49da2e2107b67a",
        },
        TestElement {
            input: "The quick brown fox jumps over the lazy dog",
            output: "9e107d9d372bb6826bd81d3542a419d6",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let sum = Md5::default().update(element.input.as_bytes()).hex_digest();
            assert_eq!(
                element.output, sum,
                "test vector element mismatched on index {} failed! got {}, want {}",
                i, sum, element.output
            );
        })
    }

    #[test]
    fn sine_table() {
        for (j, t) in T.iter().enumerate() {
            let expected = ((1u64 << 32) as f64 * ((j + 1) as f64).sin().abs()) as u32;
            assert_eq!(*t, expected, "T[{}]", j);
        }
    }

    #[test]
    fn million_a() {
        let mut h = Md5::default();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            h.update(&chunk);
        }
        assert_eq!(h.hex_digest(), "7707d6ae4e027c70eea2a935c2296f21");
    }

    #[test]
    fn reuse_after_digest() {
        let mut h = Md5::default();
        h.update(b"some earlier message");
        h.digest();
        h.update(b"message digest");
        assert_eq!(h.hex_digest(), "f96b697d7cb7938d525a2f31aaf161d0");
    }
}
