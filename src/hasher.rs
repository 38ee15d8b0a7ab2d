use std::io;

use byteorder::ByteOrder;
use digest::{
    generic_array::ArrayLength, FixedOutput, FixedOutputReset, HashMarker, Output,
    OutputSizeUser, Reset, Update,
};
use tracing::{debug, trace};

use crate::Error;

/// Largest block, in bytes, consumed by any transform in this crate (the SHAKE128 rate).
pub const MAX_BLOCK_SIZE: usize = 168;

/// BlockTransform is the compression function driven by a [`Hasher`].
///
/// The hasher owns buffering and length accounting, so a transform only ever
/// sees whole blocks of exactly [`BlockTransform::block_size`] bytes.
pub trait BlockTransform: Clone {
    /// Algorithm name, used in log events.
    fn name(&self) -> &'static str;
    /// Number of bytes consumed per call to [`BlockTransform::compress`].
    fn block_size(&self) -> usize;
    /// Number of bytes written by [`BlockTransform::finalize`].
    fn digest_size(&self) -> usize;
    /// Mixes one full block into the running state.
    fn compress(&mut self, block: &[u8]);
    /// Pads the buffered tail and writes the digest into `out`.
    ///
    /// `block` spans a whole block and its first `filled` bytes are unprocessed
    /// message data (`filled < block.len()`); the rest of the slice is scratch.
    /// `total` is the number of bytes written since the last reset.
    /// `out.len()` equals [`BlockTransform::digest_size`].
    fn finalize(&mut self, block: &mut [u8], filled: usize, total: u64, out: &mut [u8]);
    /// Restores the initial state.
    fn reset(&mut self);
}

/// A transform whose digest size is known at compile time. These hashers
/// implement the RustCrypto [`digest`] traits.
pub trait FixedTransform: BlockTransform + Default {
    /// Digest size as a type-level number.
    type OutputSize: ArrayLength<u8> + 'static;
}

/// Hasher is a streaming hash over any [`BlockTransform`]: it accepts writes of
/// any size and feeds the transform whole blocks.
///
/// Finalizing with [`Hasher::digest`] or [`Hasher::digest_into`] resets the
/// hasher, so the same instance can hash another message.
#[derive(Clone)]
pub struct Hasher<T: BlockTransform> {
    t: T,
    x: [u8; MAX_BLOCK_SIZE], // data written since last compression
    nx: usize,               // number of bytes in x
    len: u64,                // total number of input bytes written overall
}

impl<T: BlockTransform> Hasher<T> {
    /// Wraps `t` in an empty hasher.
    ///
    /// # Panics
    ///
    /// Panics if `t.block_size()` is 0 or greater than [`MAX_BLOCK_SIZE`].
    pub fn new(t: T) -> Self {
        let block_size = t.block_size();
        assert!(
            block_size > 0 && block_size <= MAX_BLOCK_SIZE,
            "bad block size: {}",
            block_size
        );
        Self {
            t,
            x: [0; MAX_BLOCK_SIZE],
            nx: 0,
            len: 0,
        }
    }

    /// Block size of the transform in bytes.
    pub fn block_size(&self) -> usize {
        self.t.block_size()
    }

    /// Digest size in bytes.
    pub fn digest_size(&self) -> usize {
        self.t.digest_size()
    }

    /// Number of bytes written since construction or the last reset.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether nothing has been written since construction or the last reset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writes `p` and returns the hasher for chaining.
    pub fn update(&mut self, mut p: &[u8]) -> &mut Self {
        let b = self.t.block_size();
        self.len = self.len.wrapping_add(p.len() as u64);

        if self.nx > 0 {
            // continue with existing buffer, if nonempty
            let n = (b - self.nx).min(p.len());
            self.x[self.nx..self.nx + n].copy_from_slice(&p[..n]);
            self.nx += n;
            if self.nx == b {
                self.t.compress(&self.x[..b]);
                self.nx = 0;
            }
            p = &p[n..];
        }

        // handle any remaining full input blocks without copying
        let mut blocks = p.chunks_exact(b);
        for block in &mut blocks {
            self.t.compress(block);
        }

        let rest = blocks.remainder();
        if !rest.is_empty() {
            self.x[..rest.len()].copy_from_slice(rest);
            self.nx = rest.len();
        }
        self
    }

    /// Writes `len` bytes of `data` starting at `offset`.
    pub fn update_range(
        &mut self,
        data: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<&mut Self, Error> {
        let window = offset
            .checked_add(len)
            .and_then(|end| data.get(offset..end))
            .ok_or(Error::InputRange {
                offset,
                len,
                available: data.len(),
            })?;
        Ok(self.update(window))
    }

    /// Writes the digest into `out`, which must be exactly
    /// [`Hasher::digest_size`] bytes long, then resets the hasher.
    pub fn digest_into(&mut self, out: &mut [u8]) -> Result<(), Error> {
        let expected = self.t.digest_size();
        if out.len() != expected {
            debug!(
                algorithm = self.t.name(),
                expected,
                actual = out.len(),
                "rejected digest buffer"
            );
            return Err(Error::OutputSize {
                expected,
                actual: out.len(),
            });
        }
        self.finish(|t, block, filled, total| t.finalize(block, filled, total, out));
        Ok(())
    }

    /// Returns the digest and resets the hasher.
    pub fn digest(&mut self) -> Vec<u8> {
        let mut out = vec![0; self.t.digest_size()];
        self.finish(|t, block, filled, total| t.finalize(block, filled, total, &mut out));
        out
    }

    /// Lower-case hex encoding of [`Hasher::digest`].
    pub fn hex_digest(&mut self) -> String {
        hex::encode(self.digest())
    }

    /// Discards buffered input and restores the initial state.
    pub fn reset(&mut self) {
        self.t.reset();
        self.x = [0; MAX_BLOCK_SIZE];
        self.nx = 0;
        self.len = 0;
    }

    /// Hands the buffered tail to `f` and resets afterwards.
    pub(crate) fn finish<R>(&mut self, f: impl FnOnce(&mut T, &mut [u8], usize, u64) -> R) -> R {
        let b = self.t.block_size();
        let (filled, total) = (self.nx, self.len);
        let r = f(&mut self.t, &mut self.x[..b], filled, total);
        trace!(algorithm = self.t.name(), bytes = total, "finalized");
        self.reset();
        r
    }
}

impl<T: BlockTransform + Default> Hasher<T> {
    /// One-shot digest of `data`.
    pub fn hash(data: &[u8]) -> Vec<u8> {
        let mut h = Self::default();
        h.update(data);
        h.digest()
    }
}

impl<T: BlockTransform + Default> Default for Hasher<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Merkle–Damgård strengthening shared by MD5, SHA-1 and SHA-256: a single
/// `0x80`, zeros, then the 64-bit message length in bits stored with byte
/// order `E` in the last 8 bytes of the final block. Spills into a second
/// block when the tail leaves less than 9 bytes.
pub(crate) fn md_pad<E: ByteOrder, T: BlockTransform>(
    t: &mut T,
    block: &mut [u8],
    filled: usize,
    total: u64,
) {
    let b = block.len();
    let bitlen = total << 3; // number of input bits written

    block[filled] = 0x80;
    if filled + 9 > b {
        block[filled + 1..].fill(0);
        t.compress(block);
        block[..b - 8].fill(0);
    } else {
        block[filled + 1..b - 8].fill(0);
    }
    E::write_u64(&mut block[b - 8..], bitlen);
    t.compress(block);
}

impl<T: BlockTransform> io::Write for Hasher<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: FixedTransform> HashMarker for Hasher<T> {}

impl<T: FixedTransform> OutputSizeUser for Hasher<T> {
    type OutputSize = T::OutputSize;
}

impl<T: FixedTransform> Update for Hasher<T> {
    fn update(&mut self, data: &[u8]) {
        Hasher::<T>::update(self, data);
    }
}

impl<T: FixedTransform> FixedOutput for Hasher<T> {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        self.finish(|t, block, filled, total| t.finalize(block, filled, total, out.as_mut_slice()));
    }
}

impl<T: FixedTransform> FixedOutputReset for Hasher<T> {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        self.finish(|t, block, filled, total| t.finalize(block, filled, total, out.as_mut_slice()));
    }
}

impl<T: FixedTransform> Reset for Hasher<T> {
    fn reset(&mut self) {
        Hasher::<T>::reset(self);
    }
}
