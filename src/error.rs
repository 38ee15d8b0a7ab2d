/// Errors returned by hasher construction and finalization.
///
/// Every variant is a caller contract violation; none of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The security level is not one the requested mode supports.
    #[error("unsupported security level: {bits} bits")]
    SecurityLevel {
        /// Requested security level.
        bits: usize,
    },
    /// The output length is zero or not a whole number of bytes.
    #[error("output length must be a positive multiple of 8 bits, got {bits}")]
    OutputBits {
        /// Requested output length in bits.
        bits: usize,
    },
    /// The output buffer does not match the digest size.
    #[error("output buffer has wrong size: expected {expected} bytes, got {actual}")]
    OutputSize {
        /// Digest size in bytes.
        expected: usize,
        /// Length of the buffer passed in.
        actual: usize,
    },
    /// The input window does not fit inside the input slice.
    #[error("input window out of range: offset {offset} + len {len} exceeds {available} bytes")]
    InputRange {
        /// Start of the window.
        offset: usize,
        /// Length of the window.
        len: usize,
        /// Length of the input slice.
        available: usize,
    },
}

#[cfg(test)]
pub mod test {
    use super::Error;

    // one message per variant; the match is exhaustive
    fn sample(e: &Error) -> &'static str {
        match e {
            Error::SecurityLevel { .. } => "unsupported security level: 192 bits",
            Error::OutputBits { .. } => "output length must be a positive multiple of 8 bits, got 12",
            Error::OutputSize { .. } => "output buffer has wrong size: expected 32 bytes, got 16",
            Error::InputRange { .. } => {
                "input window out of range: offset 10 + len 20 exceeds 18 bytes"
            }
        }
    }

    #[test]
    fn display() {
        let errors = [
            Error::SecurityLevel { bits: 192 },
            Error::OutputBits { bits: 12 },
            Error::OutputSize {
                expected: 32,
                actual: 16,
            },
            Error::InputRange {
                offset: 10,
                len: 20,
                available: 18,
            },
        ];
        for e in &errors {
            assert_eq!(e.to_string(), sample(e));
        }
    }
}
