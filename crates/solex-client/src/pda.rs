//! PDA derivation for the example programs.
//!
//! Derivation is computed locally so that two parties agree on the account of
//! a username without asking the cluster. The algorithm matches the runtime's
//! `sol_try_find_program_address`: hash `seeds ‖ bump ‖ program_id ‖ marker`
//! with SHA-256 and reject candidates that decompress to an ed25519 point.

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

use crate::constants::{MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER};
use crate::errors::{SolexError, SolexResult};

/// An address found by [`find_program_address`] together with its bump seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Whether `bytes` is the compressed form of a point on the ed25519 curve,
/// i.e. an address somebody could hold a private key for.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

fn check_seeds(seeds: &[&[u8]], count: usize) -> SolexResult<()> {
    if count > MAX_SEEDS {
        return Err(SolexError::TooManySeeds { count, max: MAX_SEEDS });
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(SolexError::SeedTooLong { index, len: seed.len(), max: MAX_SEED_LEN });
        }
    }
    Ok(())
}

fn hash_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> [u8; 32] {
    let mut h = Sha256::new();
    for seed in seeds {
        h.update(seed);
    }
    h.update(program_id.as_ref());
    h.update(PDA_MARKER);
    h.finalize().into()
}

/// Compute the program address for a full seed list (bump included).
///
/// Fails with [`SolexError::OnCurve`] when the hash is a valid public key.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> SolexResult<Pubkey> {
    check_seeds(seeds, seeds.len())?;

    let hash = hash_program_address(seeds, program_id);
    if is_on_curve(&hash) {
        return Err(SolexError::OnCurve);
    }
    Ok(Pubkey::new_from_array(hash))
}

/// Find the first off-curve address, trying bump seeds from 255 down to 1.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> SolexResult<DerivedAddress> {
    search_bumps(seeds, program_id, is_on_curve)
}

fn search_bumps(
    seeds: &[&[u8]],
    program_id: &Pubkey,
    on_curve: fn(&[u8; 32]) -> bool,
) -> SolexResult<DerivedAddress> {
    check_seeds(seeds, seeds.len() + 1)?;

    for bump in (1..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);

        let hash = hash_program_address(&with_bump, program_id);
        if !on_curve(&hash) {
            return Ok(DerivedAddress { address: Pubkey::new_from_array(hash), bump });
        }
    }
    Err(SolexError::NoViableBump)
}

/// Derive the account that records the owner of `username`.
///
/// The username bytes are the only seed, exactly as the registry program
/// derives it on-chain. Any length up to 32 bytes is accepted, the empty
/// name included.
pub fn derive_username(program_id: &Pubkey, username: &str) -> SolexResult<DerivedAddress> {
    find_program_address(&[username.as_bytes()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use solana_sdk::signature::{Keypair, Signer};

    fn program() -> Pubkey {
        Pubkey::new_from_array([7u8; 32])
    }

    #[test]
    fn matches_runtime_derivation() {
        let program_id = program();
        let longest = "x".repeat(MAX_SEED_LEN);
        for name in ["alice", "bob", "a", longest.as_str()] {
            let local = derive_username(&program_id, name).unwrap();
            let (address, bump) = Pubkey::find_program_address(&[name.as_bytes()], &program_id);
            assert_eq!(local, DerivedAddress { address, bump }, "username {name}");
        }
    }

    #[test]
    fn alice_derivation_is_fixed() {
        let program_id = program();
        let first = derive_username(&program_id, "alice").unwrap();
        let second = derive_username(&program_id, "alice").unwrap();
        assert_eq!(first, second);
        assert!(!is_on_curve(&first.address.to_bytes()));
    }

    #[test]
    fn returned_bump_is_the_highest_viable() {
        let program_id = program();
        let found = derive_username(&program_id, "alice").unwrap();
        for bump in (u16::from(found.bump) + 1)..=255 {
            let r = create_program_address(&[b"alice", &[bump as u8]], &program_id);
            assert_matches!(r, Err(SolexError::OnCurve));
        }
        let again = create_program_address(&[b"alice", &[found.bump]], &program_id).unwrap();
        assert_eq!(again, found.address);
    }

    #[test]
    fn keypair_addresses_are_on_curve() {
        let kp = Keypair::new();
        assert!(is_on_curve(&kp.pubkey().to_bytes()));
    }

    #[test]
    fn rejects_overlong_username() {
        let name = "n".repeat(MAX_SEED_LEN + 1);
        let r = derive_username(&program(), &name);
        assert_matches!(r, Err(SolexError::SeedTooLong { index: 0, len: 33, max: 32 }));
    }

    #[test]
    fn empty_username_derives_like_the_runtime() {
        let program_id = program();
        let local = derive_username(&program_id, "").unwrap();
        let (address, bump) = Pubkey::find_program_address(&[b""], &program_id);
        assert_eq!(local, DerivedAddress { address, bump });
    }

    #[test]
    fn exhausted_bumps_are_an_error() {
        let r = search_bumps(&[b"alice"], &program(), |_| true);
        assert_matches!(r, Err(SolexError::NoViableBump));
    }

    #[test]
    fn rejects_too_many_seeds() {
        let seeds: Vec<&[u8]> = vec![&b"s"[..]; MAX_SEEDS];
        let r = find_program_address(&seeds, &program());
        assert_matches!(r, Err(SolexError::TooManySeeds { count: 17, max: 16 }));
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(seed in proptest::collection::vec(any::<u8>(), 0..=MAX_SEED_LEN),
                                       program in any::<[u8; 32]>()) {
            let program_id = Pubkey::new_from_array(program);
            let a = find_program_address(&[&seed[..]], &program_id).unwrap();
            let b = find_program_address(&[&seed[..]], &program_id).unwrap();
            prop_assert_eq!(a, b);
            prop_assert!(!is_on_curve(&a.address.to_bytes()));
        }

        #[test]
        fn overlong_seeds_never_truncate(extra in 1usize..64, byte in any::<u8>()) {
            let seed = vec![byte; MAX_SEED_LEN + extra];
            let r = find_program_address(&[&seed[..]], &program());
            let rejected = matches!(r, Err(SolexError::SeedTooLong { len, .. }) if len == MAX_SEED_LEN + extra);
            prop_assert!(rejected, "got {:?}", r);
        }
    }
}
