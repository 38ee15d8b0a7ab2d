use krypto::{keccak, BlockTransform, Hasher, KeccakCore, Md5, Sha1, Sha256};
use proptest::prelude::*;

/// Feeds `msg` in pieces cut at `cuts` (taken modulo the message length).
fn streamed<T: BlockTransform>(mut h: Hasher<T>, msg: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (msg.len() + 1)).collect();
    points.push(0);
    points.push(msg.len());
    points.sort_unstable();
    for pair in points.windows(2) {
        h.update(&msg[pair[0]..pair[1]]);
    }
    h.digest()
}

/// Digests `first`, then hashes `second` on the same instance.
fn reused<T: BlockTransform>(mut h: Hasher<T>, first: &[u8], second: &[u8]) -> Vec<u8> {
    h.update(first);
    h.digest();
    h.update(second);
    h.digest()
}

fn keccak_cores() -> Vec<KeccakCore> {
    let mut cores = Vec::new();
    for bits in [224, 256, 384, 512] {
        cores.push(KeccakCore::keccak(bits).unwrap());
        cores.push(KeccakCore::sha3(bits).unwrap());
    }
    for bits in [128, 256] {
        cores.push(KeccakCore::shake(bits, 8 * 200).unwrap());
        cores.push(KeccakCore::cshake(bits, 256, b"name", b"custom").unwrap());
        cores.push(KeccakCore::kmac(bits, b"key", 256, b"").unwrap());
    }
    cores
}

proptest! {
    #[test]
    fn chunking_does_not_change_digest(
        msg in prop::collection::vec(any::<u8>(), 0..600),
        cuts in prop::collection::vec(any::<usize>(), 0..8),
    ) {
        prop_assert_eq!(streamed(Md5::default(), &msg, &cuts), Md5::hash(&msg));
        prop_assert_eq!(streamed(Sha1::default(), &msg, &cuts), Sha1::hash(&msg));
        prop_assert_eq!(streamed(Sha256::default(), &msg, &cuts), Sha256::hash(&msg));
        for core in keccak_cores() {
            let mut whole = Hasher::new(core.clone());
            whole.update(&msg);
            prop_assert_eq!(streamed(Hasher::new(core), &msg, &cuts), whole.digest());
        }
    }

    #[test]
    fn reuse_matches_fresh(
        first in prop::collection::vec(any::<u8>(), 0..300),
        second in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        prop_assert_eq!(reused(Md5::default(), &first, &second), Md5::hash(&second));
        prop_assert_eq!(reused(Sha1::default(), &first, &second), Sha1::hash(&second));
        prop_assert_eq!(reused(Sha256::default(), &first, &second), Sha256::hash(&second));

        for core in keccak_cores() {
            let mut fresh = Hasher::new(core.clone());
            fresh.update(&second);
            prop_assert_eq!(reused(Hasher::new(core), &first, &second), fresh.digest());
        }
    }

    #[test]
    fn digest_length_is_fixed(msg in prop::collection::vec(any::<u8>(), 0..400)) {
        prop_assert_eq!(Md5::hash(&msg).len(), 16);
        prop_assert_eq!(Sha1::hash(&msg).len(), 20);
        prop_assert_eq!(Sha256::hash(&msg).len(), 32);
        prop_assert_eq!(keccak::sha3_224(&msg).len(), 28);
        prop_assert_eq!(keccak::keccak_512(&msg).len(), 64);
    }

    #[test]
    fn shake_outputs_share_prefix(
        msg in prop::collection::vec(any::<u8>(), 0..300),
        a in 1usize..400,
        b in 1usize..400,
    ) {
        let short = keccak::shake256(&msg, 8 * a.min(b)).unwrap();
        let long = keccak::shake256(&msg, 8 * a.max(b)).unwrap();
        prop_assert_eq!(&long[..short.len()], &short[..]);
    }
}
