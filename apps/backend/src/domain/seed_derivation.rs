//! RNG seed derivation for reproducible shuffles.
//!
//! Every room carries one base seed. Each deal and each center-pile reshuffle
//! within a deal gets its own seed derived from it, so a whole match can be
//! replayed from the base seed and the action log.

/// Derive the shuffle seed for the `deal_no`-th deal (1-based) of a room.
pub fn derive_deal_seed(room_seed: u64, deal_no: u32) -> u64 {
    derive(b"speed:deal", room_seed, deal_no, 0)
}

/// Derive the seed for the `reshuffle_no`-th reshuffle (1-based) within a deal.
pub fn derive_reshuffle_seed(deal_seed: u64, reshuffle_no: u32) -> u64 {
    derive(b"speed:reshuffle", deal_seed, reshuffle_no, 1)
}

fn derive(context: &[u8], base: u64, counter: u32, lane: u8) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(context);
    hasher.update(&base.to_le_bytes());
    hasher.update(&counter.to_le_bytes());
    hasher.update(&[lane]);
    let hash = hasher.finalize();

    let mut buf = [0u8; 8];
    buf.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(buf)
}
