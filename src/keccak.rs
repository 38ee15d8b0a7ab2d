//! Keccak-f[1600] sponge and the SHA-3 family built on it: legacy Keccak,
//! SHA-3, SHAKE, and the SP 800-185 cSHAKE and KMAC constructions.
//!
//! All modes share [`KeccakCore`] and are driven by the same [`Hasher`]
//! engine as the Merkle–Damgård hashes; only the rate, the domain separation
//! byte and an optional absorbed prefix differ.

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::hasher::{BlockTransform, Hasher, MAX_BLOCK_SIZE};
use crate::Error;

/// Keccak is a streaming hasher for any SHA-3 family mode.
pub type Keccak = Hasher<KeccakCore>;

const ROUNDS: usize = 24;

const RC: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

// Rotation offset of lane x + 5y.
const RHO: [u32; 25] = [
    0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

// Destination of lane x + 5y under pi: y + 5 * ((2x + 3y) mod 5).
const PI: [usize; 25] = [
    0, 10, 20, 5, 15, 16, 1, 11, 21, 6, 7, 17, 2, 12, 22, 23, 8, 18, 3, 13, 14, 24, 9, 19, 4,
];

/// Applies the 24-round Keccak-f[1600] permutation to the 25 lanes.
pub fn keccak_f1600(a: &mut [u64; 25]) {
    let mut b = [0u64; 25];
    for rc in RC {
        // theta
        let mut c = [0u64; 5];
        for (x, cx) in c.iter_mut().enumerate() {
            *cx = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in (0..25).step_by(5) {
                a[y + x] ^= d;
            }
        }

        // rho + pi
        for i in 0..25 {
            b[PI[i]] = a[i].rotate_left(RHO[i]);
        }

        // chi
        for y in (0..25).step_by(5) {
            for x in 0..5 {
                a[y + x] = b[y + x] ^ (!b[y + (x + 1) % 5] & b[y + (x + 2) % 5]);
            }
        }

        // iota
        a[0] ^= rc;
    }
}

/// Mode selects the padding (domain separation) of a Keccak sponge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Original Keccak submission padding, as used by Ethereum.
    Keccak,
    /// FIPS 202 SHA-3.
    Sha3,
    /// FIPS 202 extendable output.
    Shake,
    /// SP 800-185 customizable SHAKE.
    CShake,
    /// SP 800-185 Keccak message authentication code.
    Kmac,
}

impl Mode {
    fn domain(self) -> u8 {
        match self {
            Mode::Keccak => 0x01,
            Mode::Sha3 => 0x06,
            Mode::Shake => 0x1f,
            Mode::CShake | Mode::Kmac => 0x04,
        }
    }
}

const FIXED_BITS: [usize; 4] = [224, 256, 384, 512];
const XOF_BITS: [usize; 2] = [128, 256];

/// KeccakCore is the sponge transform for every SHA-3 family mode.
///
/// Its block size is the sponge rate, `(1600 - 2 * bits) / 8` bytes, where
/// `bits` is the security level.
#[derive(Clone)]
pub struct KeccakCore {
    state: [u64; 25],
    initial: [u64; 25], // state after absorbing any cSHAKE/KMAC prefix
    rate: usize,
    mode: Mode,
    output_bits: usize,
}

impl KeccakCore {
    fn new(mode: Mode, bits: usize, output_bits: usize) -> Self {
        Self {
            state: [0; 25],
            initial: [0; 25],
            rate: (1600 - 2 * bits) / 8,
            mode,
            output_bits,
        }
    }

    /// Legacy Keccak with a `bits`-bit digest (224, 256, 384 or 512).
    pub fn keccak(bits: usize) -> Result<Self, Error> {
        check_bits(&FIXED_BITS, bits)?;
        Ok(Self::new(Mode::Keccak, bits, bits))
    }

    /// SHA3 with a `bits`-bit digest (224, 256, 384 or 512).
    pub fn sha3(bits: usize) -> Result<Self, Error> {
        check_bits(&FIXED_BITS, bits)?;
        Ok(Self::new(Mode::Sha3, bits, bits))
    }

    /// SHAKE128 or SHAKE256 producing `output_bits` bits.
    pub fn shake(bits: usize, output_bits: usize) -> Result<Self, Error> {
        check_bits(&XOF_BITS, bits)?;
        check_output_bits(output_bits)?;
        Ok(Self::new(Mode::Shake, bits, output_bits))
    }

    /// cSHAKE128 or cSHAKE256. With an empty function name and customization
    /// string this is plain SHAKE.
    pub fn cshake(
        bits: usize,
        output_bits: usize,
        function_name: &[u8],
        customization: &[u8],
    ) -> Result<Self, Error> {
        if function_name.is_empty() && customization.is_empty() {
            return Self::shake(bits, output_bits);
        }
        check_bits(&XOF_BITS, bits)?;
        check_output_bits(output_bits)?;

        let mut core = Self::new(Mode::CShake, bits, output_bits);
        let prefix = bytepad(&[function_name, customization], core.rate);
        core.absorb_prefix(&prefix);
        debug!(
            bits,
            output_bits,
            rate = core.rate,
            prefix_len = prefix.len(),
            "cshake prefix absorbed"
        );
        Ok(core)
    }

    /// KMAC128 or KMAC256 keyed with `key`, producing `output_bits` bits.
    pub fn kmac(
        bits: usize,
        key: &[u8],
        output_bits: usize,
        customization: &[u8],
    ) -> Result<Self, Error> {
        check_bits(&XOF_BITS, bits)?;
        check_output_bits(output_bits)?;

        let mut core = Self::new(Mode::Kmac, bits, output_bits);
        let mut prefix = bytepad(&[b"KMAC", customization], core.rate);
        prefix.extend(bytepad(&[key], core.rate));
        core.absorb_prefix(&prefix);
        debug!(bits, output_bits, rate = core.rate, "kmac key absorbed");
        Ok(core)
    }

    /// Padding mode of this sponge.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Output length in bits.
    pub fn output_bits(&self) -> usize {
        self.output_bits
    }

    fn absorb_prefix(&mut self, prefix: &[u8]) {
        for block in prefix.chunks_exact(self.rate) {
            self.absorb(block);
        }
        self.initial = self.state;
    }

    fn absorb(&mut self, block: &[u8]) {
        for (lane, chunk) in self.state.iter_mut().zip(block.chunks_exact(8)) {
            *lane ^= LittleEndian::read_u64(chunk);
        }
        keccak_f1600(&mut self.state);
    }

    /// Absorbs the buffered tail, the KMAC length suffix and the padding.
    fn pad(&mut self, block: &mut [u8], mut filled: usize) {
        let rate = self.rate;
        if self.mode == Mode::Kmac {
            let mut enc = [0u8; 9];
            for &byte in right_encode(self.output_bits as u64, &mut enc) {
                block[filled] = byte;
                filled += 1;
                if filled == rate {
                    self.absorb(block);
                    filled = 0;
                }
            }
        }

        block[filled..].fill(0);
        block[filled] ^= self.mode.domain();
        block[rate - 1] ^= 0x80;
        self.absorb(block);
    }

    /// Writes successive lanes low byte first, permuting after every rate's worth.
    fn squeeze(&mut self, out: &mut [u8]) {
        for (n, chunk) in out.chunks_mut(self.rate).enumerate() {
            if n > 0 {
                keccak_f1600(&mut self.state);
            }
            store_lanes(&self.state, chunk);
        }
    }
}

impl BlockTransform for KeccakCore {
    fn name(&self) -> &'static str {
        match self.mode {
            Mode::Keccak => "keccak",
            Mode::Sha3 => "sha3",
            Mode::Shake => "shake",
            Mode::CShake => "cshake",
            Mode::Kmac => "kmac",
        }
    }

    fn block_size(&self) -> usize {
        self.rate
    }

    fn digest_size(&self) -> usize {
        self.output_bits / 8
    }

    fn compress(&mut self, block: &[u8]) {
        self.absorb(block);
    }

    fn finalize(&mut self, block: &mut [u8], filled: usize, _total: u64, out: &mut [u8]) {
        self.pad(block, filled);
        self.squeeze(out);
    }

    fn reset(&mut self) {
        self.state = self.initial;
    }
}

fn store_lanes(state: &[u64; 25], out: &mut [u8]) {
    let mut tmp = [0u8; 8];
    for (chunk, lane) in out.chunks_mut(8).zip(state) {
        LittleEndian::write_u64(&mut tmp, *lane);
        chunk.copy_from_slice(&tmp[..chunk.len()]);
    }
}

fn check_bits(allowed: &[usize], bits: usize) -> Result<(), Error> {
    if allowed.contains(&bits) {
        Ok(())
    } else {
        debug!(bits, ?allowed, "rejected security level");
        Err(Error::SecurityLevel { bits })
    }
}

fn check_output_bits(bits: usize) -> Result<(), Error> {
    if bits > 0 && bits % 8 == 0 {
        Ok(())
    } else {
        debug!(bits, "rejected output length");
        Err(Error::OutputBits { bits })
    }
}

/// left_encode from SP 800-185: the minimal big-endian encoding of `val`
/// (at least one byte) preceded by its length in bytes.
pub fn left_encode(val: u64, b: &mut [u8; 9]) -> &[u8] {
    b[1..].copy_from_slice(&val.to_be_bytes());
    let i = b[1..8].iter().take_while(|&&a| a == 0).count();
    b[i] = (8 - i) as u8;
    &b[i..]
}

/// right_encode from SP 800-185: like [`left_encode`] with the length byte last.
pub fn right_encode(val: u64, b: &mut [u8; 9]) -> &[u8] {
    b[..8].copy_from_slice(&val.to_be_bytes());
    let i = b[..7].iter().take_while(|&&a| a == 0).count();
    b[8] = (8 - i) as u8;
    &b[i..]
}

/// bytepad(encode_string(s_1) || ... || encode_string(s_n), w), zero-filled to
/// a multiple of `w` bytes.
pub fn bytepad(strings: &[&[u8]], w: usize) -> Vec<u8> {
    let mut b = [0u8; 9];
    let mut out = left_encode(w as u64, &mut b).to_vec();
    for s in strings {
        out.extend_from_slice(left_encode(s.len() as u64 * 8, &mut b));
        out.extend_from_slice(s);
    }
    let rem = out.len() % w;
    if rem != 0 {
        out.resize(out.len() + w - rem, 0);
    }
    out
}

/// KeccakReader squeezes an unbounded output stream out of a finalized sponge.
/// It has no absorb method: once squeezing starts the sponge is sealed.
#[derive(Clone)]
pub struct KeccakReader {
    state: [u64; 25],
    rate: usize,
    buf: [u8; MAX_BLOCK_SIZE],
    pos: usize,
}

impl KeccakReader {
    fn new(state: [u64; 25], rate: usize) -> Self {
        let mut buf = [0; MAX_BLOCK_SIZE];
        store_lanes(&state, &mut buf[..rate]);
        Self {
            state,
            rate,
            buf,
            pos: 0,
        }
    }

    /// Fills `out` with the next `out.len()` output bytes.
    pub fn read(&mut self, mut out: &mut [u8]) {
        while !out.is_empty() {
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                store_lanes(&self.state, &mut self.buf[..self.rate]);
                self.pos = 0;
            }
            let take = (self.rate - self.pos).min(out.len());
            out[..take].copy_from_slice(&self.buf[self.pos..self.pos + take]);
            self.pos += take;
            out = &mut out[take..];
        }
    }
}

impl Keccak {
    /// Pads the absorbed message and returns a reader over the output stream,
    /// then resets the hasher. The first [`Hasher::digest_size`] bytes read
    /// equal [`Hasher::digest`].
    pub fn finalize_xof(&mut self) -> KeccakReader {
        self.finish(|core, block, filled, _| {
            core.pad(block, filled);
            KeccakReader::new(core.state, core.rate)
        })
    }
}

fn one_shot(core: KeccakCore, data: &[u8]) -> Vec<u8> {
    let mut h = Keccak::new(core);
    h.update(data);
    h.digest()
}

/// Legacy Keccak-224 of `data`.
pub fn keccak_224(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Keccak, 224, 224), data)
}

/// Legacy Keccak-256 of `data`.
pub fn keccak_256(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Keccak, 256, 256), data)
}

/// Legacy Keccak-384 of `data`.
pub fn keccak_384(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Keccak, 384, 384), data)
}

/// Legacy Keccak-512 of `data`.
pub fn keccak_512(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Keccak, 512, 512), data)
}

/// SHA3-224 of `data`.
pub fn sha3_224(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Sha3, 224, 224), data)
}

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Sha3, 256, 256), data)
}

/// SHA3-384 of `data`.
pub fn sha3_384(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Sha3, 384, 384), data)
}

/// SHA3-512 of `data`.
pub fn sha3_512(data: &[u8]) -> Vec<u8> {
    one_shot(KeccakCore::new(Mode::Sha3, 512, 512), data)
}

/// SHAKE128 of `data`, `output_bits` long.
pub fn shake128(data: &[u8], output_bits: usize) -> Result<Vec<u8>, Error> {
    Ok(one_shot(KeccakCore::shake(128, output_bits)?, data))
}

/// SHAKE256 of `data`, `output_bits` long.
pub fn shake256(data: &[u8], output_bits: usize) -> Result<Vec<u8>, Error> {
    Ok(one_shot(KeccakCore::shake(256, output_bits)?, data))
}

/// cSHAKE128 of `data` under the given function name and customization.
pub fn cshake128(
    data: &[u8],
    output_bits: usize,
    function_name: &[u8],
    customization: &[u8],
) -> Result<Vec<u8>, Error> {
    let core = KeccakCore::cshake(128, output_bits, function_name, customization)?;
    Ok(one_shot(core, data))
}

/// cSHAKE256 of `data` under the given function name and customization.
pub fn cshake256(
    data: &[u8],
    output_bits: usize,
    function_name: &[u8],
    customization: &[u8],
) -> Result<Vec<u8>, Error> {
    let core = KeccakCore::cshake(256, output_bits, function_name, customization)?;
    Ok(one_shot(core, data))
}

/// KMAC128 of `data` under `key`.
pub fn kmac128(
    key: &[u8],
    data: &[u8],
    output_bits: usize,
    customization: &[u8],
) -> Result<Vec<u8>, Error> {
    Ok(one_shot(KeccakCore::kmac(128, key, output_bits, customization)?, data))
}

/// KMAC256 of `data` under `key`.
pub fn kmac256(
    key: &[u8],
    data: &[u8],
    output_bits: usize,
    customization: &[u8],
) -> Result<Vec<u8>, Error> {
    Ok(one_shot(KeccakCore::kmac(256, key, output_bits, customization)?, data))
}
