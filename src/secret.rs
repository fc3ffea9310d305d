// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Owned big-integer secrets that are wiped on drop.

use std::fmt;

use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::octets::Octets;

/// A private exponent, scalar, or intermediate secret held as a `BigUint`,
/// wiped through [`wipe`].
pub(crate) struct SecretUint(BigUint);

impl SecretUint {
    pub(crate) fn new(value: BigUint) -> Self {
        SecretUint(value)
    }

    pub(crate) fn from_bytes_be(bytes: &[u8]) -> Self {
        SecretUint(BigUint::from_bytes_be(bytes))
    }

    /// Uniformly random in `[low, high)`.
    pub(crate) fn random_range(low: &BigUint, high: &BigUint) -> Result<Self> {
        if low >= high {
            return Err(Error::KeyGenFailed("empty private key range".into()));
        }
        Ok(SecretUint(OsRng.gen_biguint_range(low, high)))
    }

    pub(crate) fn expose(&self) -> &BigUint {
        &self.0
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Big-endian encoding, left-padded to `width`.
    pub(crate) fn to_octets(&self, width: usize) -> Result<Octets> {
        let minimal = Zeroizing::new(self.0.to_bytes_be());
        Octets::from_slice(&minimal).left_pad_to(width)
    }
}

/// Overwrite the digits of `value` with zeros in place.
///
/// `num-bigint` has no zeroize support. `assign_from_slice` clears the digit
/// vector and refills the same allocation with zeros before normalizing it
/// away, so the old digits do not survive in freed memory.
pub(crate) fn wipe(value: &mut BigUint) {
    let digits = (value.bits() as usize).div_ceil(32);
    value.assign_from_slice(&vec![0u32; digits]);
    #[cfg(test)]
    drop_observer::record(digits);
}

impl Zeroize for SecretUint {
    fn zeroize(&mut self) {
        wipe(&mut self.0);
    }
}

impl Drop for SecretUint {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SecretUint {}

impl fmt::Debug for SecretUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretUint(..)")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroize_leaves_zero() {
        let mut secret = SecretUint::from_bytes_be(&[0xab; 64]);
        assert!(!secret.is_zero());
        secret.zeroize();
        assert!(secret.is_zero());
        assert_eq!(secret.expose().bits(), 0);
    }

    #[test]
    fn test_zeroize_small_and_zero_values() {
        let mut one = SecretUint::new(BigUint::from(1u8));
        one.zeroize();
        assert!(one.is_zero());

        let mut zero = SecretUint::new(BigUint::zero());
        zero.zeroize();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_drop_wipes_digits() {
        let before = drop_observer::wiped_digits();
        drop(SecretUint::from_bytes_be(&[0xab; 64]));
        assert_eq!(drop_observer::wiped_digits() - before, 16);

        // Nothing to overwrite in a zero value
        let before = drop_observer::wiped_digits();
        drop(SecretUint::new(BigUint::zero()));
        assert_eq!(drop_observer::wiped_digits(), before);
    }

    #[test]
    fn test_wipe_in_place() {
        let mut value = BigUint::from_bytes_be(&[0x5a; 20]);
        wipe(&mut value);
        assert!(value.is_zero());
    }

    #[test]
    fn test_random_range_bounds() {
        let low = BigUint::from(2u8);
        let high = BigUint::from(10u8);
        for _ in 0..64 {
            let secret = SecretUint::random_range(&low, &high).unwrap();
            assert!(secret.expose() >= &low);
            assert!(secret.expose() < &high);
        }
    }

    #[test]
    fn test_random_range_empty() {
        let bound = BigUint::from(5u8);
        assert!(SecretUint::random_range(&bound, &bound).is_err());
    }

    #[test]
    fn test_to_octets_pads() {
        let secret = SecretUint::new(BigUint::from(0x0102u16));
        assert_eq!(secret.to_octets(4).unwrap().as_bytes(), &[0, 0, 1, 2]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretUint::new(BigUint::from(42u8));
        assert_eq!(format!("{:?}", secret), "SecretUint(..)");
    }
}
