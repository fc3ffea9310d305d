// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Fixed-width big-endian octet strings.
//!
//! Every exchange value and shared secret crosses the wire as a big-endian
//! string of exactly `encoded_length()` bytes. Integers coming out of the
//! arithmetic libraries are minimal-length, so they are right-aligned into a
//! zero-filled buffer with [`Octets::left_pad_to`]. Curve points are two such
//! fields back to back, taken apart again with [`Octets::split_in_half`].

use std::fmt;
use std::ops::Deref;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// An owned byte string that is wiped when dropped.
///
/// The same type carries public exchange values and shared secrets, so it
/// never prints its contents and compares in constant time.
#[derive(Clone)]
pub struct Octets(Zeroizing<Vec<u8>>);

impl Octets {
    /// Takes ownership of `bytes`.
    pub fn new(bytes: Vec<u8>) -> Self {
        Octets(Zeroizing::new(bytes))
    }

    /// Copies `bytes` into a new buffer.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Octets::new(bytes.to_vec())
    }

    /// A buffer of `width` zero bytes.
    pub fn zeroed(width: usize) -> Self {
        Octets::new(vec![0u8; width])
    }

    /// Concatenates two halves, padding each to `half_width` first.
    pub fn concat_halves(left: &[u8], right: &[u8], half_width: usize) -> Result<Self> {
        let mut out = Octets::zeroed(2 * half_width);
        right_align(&mut out.0[..half_width], left)?;
        right_align(&mut out.0[half_width..], right)?;
        Ok(out)
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Copy the bytes out. The copy is no longer wiped on drop.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Right-aligns the contents in a zero-filled buffer of `width` bytes.
    ///
    /// Leading zero bytes beyond `width` are dropped; any other overflow is an
    /// [`Error::InvalidLength`], since the value does not fit the field.
    pub fn left_pad_to(&self, width: usize) -> Result<Octets> {
        let mut out = Octets::zeroed(width);
        right_align(&mut out.0, &self.0)?;
        Ok(out)
    }

    /// Splits an even-length buffer into its two equal halves.
    pub fn split_in_half(&self) -> Result<(&[u8], &[u8])> {
        if self.0.len() % 2 != 0 {
            return Err(Error::InvalidLength {
                expected: self.0.len() + 1,
                actual: self.0.len(),
            });
        }
        Ok(self.0.split_at(self.0.len() / 2))
    }
}

/// Copies `src` into the tail of `dst`, leaving the head zero.
fn right_align(dst: &mut [u8], src: &[u8]) -> Result<()> {
    let start = src.iter().position(|&b| b != 0).unwrap_or(src.len());
    let significant = &src[start..];
    if significant.len() > dst.len() {
        return Err(Error::InvalidLength {
            expected: dst.len(),
            actual: significant.len(),
        });
    }
    let offset = dst.len() - significant.len();
    dst[..offset].fill(0);
    dst[offset..].copy_from_slice(significant);
    Ok(())
}

impl Deref for Octets {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Octets {
    fn from(bytes: &[u8]) -> Self {
        Octets::from_slice(bytes)
    }
}

impl From<Vec<u8>> for Octets {
    fn from(bytes: Vec<u8>) -> Self {
        Octets::new(bytes)
    }
}

impl AsRef<[u8]> for Octets {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Octets {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for Octets {}

impl fmt::Debug for Octets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Octets({} bytes)", self.0.len())
    }
}

impl Zeroize for Octets {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Octets {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_pad_short_value() {
        let value = Octets::from_slice(&[0x01, 0x02]);
        let padded = value.left_pad_to(5).unwrap();
        assert_eq!(padded.as_bytes(), &[0, 0, 0, 0x01, 0x02]);
    }

    #[test]
    fn test_left_pad_exact_width_is_unchanged() {
        let value = Octets::from_slice(&[0xff, 0x00, 0x01]);
        assert_eq!(value.left_pad_to(3).unwrap(), value);
    }

    #[test]
    fn test_left_pad_strips_redundant_leading_zeros() {
        let value = Octets::from_slice(&[0, 0, 0, 0x7f]);
        assert_eq!(value.left_pad_to(2).unwrap().as_bytes(), &[0, 0x7f]);
    }

    #[test]
    fn test_left_pad_zero_value() {
        let value = Octets::from_slice(&[0]);
        assert_eq!(value.left_pad_to(4).unwrap().as_bytes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_left_pad_overflow() {
        let value = Octets::from_slice(&[1, 2, 3]);
        match value.left_pad_to(2) {
            Err(Error::InvalidLength { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected InvalidLength, got {:?}", other),
        }
    }

    #[test]
    fn test_split_in_half() {
        let value = Octets::from_slice(&[1, 2, 3, 4, 5, 6]);
        let (x, y) = value.split_in_half().unwrap();
        assert_eq!(x, &[1, 2, 3]);
        assert_eq!(y, &[4, 5, 6]);
    }

    #[test]
    fn test_split_odd_length() {
        let value = Octets::from_slice(&[1, 2, 3]);
        assert!(value.split_in_half().is_err());
    }

    #[test]
    fn test_concat_halves_pads_each_side() {
        let joined = Octets::concat_halves(&[0xaa], &[0xbb, 0xcc], 3).unwrap();
        assert_eq!(joined.as_bytes(), &[0, 0, 0xaa, 0, 0xbb, 0xcc]);
        let (x, y) = joined.split_in_half().unwrap();
        assert_eq!(x, &[0, 0, 0xaa]);
        assert_eq!(y, &[0, 0xbb, 0xcc]);
    }

    #[test]
    fn test_debug_hides_contents() {
        let secret = Octets::from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(format!("{:?}", secret), "Octets(4 bytes)");
    }

    #[test]
    fn test_zeroize_clears() {
        let mut secret = Octets::from_slice(&[0x55; 16]);
        secret.zeroize();
        assert!(secret.is_empty());
    }
}
