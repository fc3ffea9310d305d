// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! MODP backend: Diffie-Hellman over the multiplicative group modulo a prime.
//!
//! Exchange values are `g^x mod p` and shared secrets `y^x mod p`, both
//! big-endian and left-padded to the byte length of `p`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::identities::One;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::catalog::{DomainParams, GroupSpec};
use crate::error::{Error, Result};
use crate::group::KeyExchange;
use crate::octets::Octets;
use crate::secret::SecretUint;

/// MODP domain parameters.
///
/// # Parameters
/// - `p`: prime modulus
/// - `g`: generator
/// - `q`: order of the subgroup `g` generates, when it is a known prime
///   smaller than `(p-1)/2` (RFC 5114 groups)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModpParams {
    p: BigUint,
    g: BigUint,
    q: Option<BigUint>,
    /// Cached p - 1
    p_minus_1: BigUint,
    bits: usize,
}

impl ModpParams {
    /// Custom parameters from big-endian prime and generator bytes.
    pub fn new(p: &[u8], g: &[u8]) -> Result<Self> {
        Self::from_parts(BigUint::from_bytes_be(p), BigUint::from_bytes_be(g), None)
    }

    /// Parameters of a catalog MODP group.
    pub fn from_spec(spec: &GroupSpec) -> Result<Self> {
        let DomainParams::Modp {
            prime,
            generator,
            subgroup_order,
        } = spec.params
        else {
            return Err(Error::InvalidParameters(format!(
                "group {} is not a MODP group",
                spec.id
            )));
        };
        let q = subgroup_order.map(parse_hex).transpose()?;
        let params = Self::from_parts(parse_hex(prime)?, parse_hex(generator)?, q)?;
        if params.bits != spec.bits {
            return Err(Error::InvalidParameters(format!(
                "group {}: modulus has {} bits, catalog says {}",
                spec.id, params.bits, spec.bits
            )));
        }
        Ok(params)
    }

    /// Attach the prime order of the generator's subgroup.
    ///
    /// Peer values are then also required to lie in that subgroup.
    pub fn with_subgroup_order(self, q: &[u8]) -> Result<Self> {
        Self::from_parts(self.p, self.g, Some(BigUint::from_bytes_be(q)))
    }

    fn from_parts(p: BigUint, g: BigUint, q: Option<BigUint>) -> Result<Self> {
        // p must be an odd prime candidate above 3, g in (1, p-1)
        if p.bits() < 3 || p.is_even() {
            return Err(Error::InvalidParameters("modulus must be odd and > 3".into()));
        }
        let p_minus_1 = &p - 1u32;
        if g <= BigUint::one() || g >= p_minus_1 {
            return Err(Error::InvalidParameters("generator out of range".into()));
        }
        if let Some(q) = &q {
            if q <= &BigUint::one() || !p_minus_1.is_multiple_of(q) || !g.modpow(q, &p).is_one() {
                return Err(Error::InvalidParameters(
                    "subgroup order does not match generator".into(),
                ));
            }
        }
        let bits = p.bits() as usize;
        Ok(ModpParams {
            p,
            g,
            q,
            p_minus_1,
            bits,
        })
    }

    /// Get the prime modulus p
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Get the generator g
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Get the subgroup order q, if known
    pub fn subgroup_order(&self) -> Option<&BigUint> {
        self.q.as_ref()
    }

    /// Byte length of the modulus.
    pub fn encoded_length(&self) -> usize {
        self.bits.div_ceil(8)
    }

    /// Half-open range private exponents are drawn from:
    /// `[2, q)` with a known subgroup order, else `[2, p-1)`.
    fn exponent_range(&self) -> (BigUint, BigUint) {
        let high = match &self.q {
            Some(q) => q.clone(),
            None => self.p_minus_1.clone(),
        };
        (BigUint::from(2u32), high)
    }

    /// Reject peer values outside `[2, p-2]`, and outside the subgroup when
    /// its order is known.
    fn check_peer(&self, y: &BigUint) -> Result<()> {
        if y <= &BigUint::one() || y >= &self.p_minus_1 {
            return Err(Error::InvalidPeerValue(
                "value outside [2, p-2]".into(),
            ));
        }
        if let Some(q) = &self.q {
            if !y.modpow(q, &self.p).is_one() {
                return Err(Error::InvalidPeerValue(
                    "value not in the prime-order subgroup".into(),
                ));
            }
        }
        Ok(())
    }
}

fn parse_hex(value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidParameters(format!("bad hex constant {:.16}...", value)))
}

const KEYGEN_ATTEMPTS: usize = 32;

/// A MODP key pair bound to its domain parameters.
pub struct ModpGroup {
    params: ModpParams,
    /// Private exponent x
    exponent: SecretUint,
    /// Public value g^x mod p
    public: BigUint,
}

impl ModpGroup {
    /// Generate a key pair for custom or catalog parameters.
    ///
    /// Exponents whose public value the peer would reject (`1` or `p-1`) are
    /// drawn again.
    pub fn generate(params: ModpParams) -> Result<Self> {
        let (low, high) = params.exponent_range();
        for _ in 0..KEYGEN_ATTEMPTS {
            let exponent = SecretUint::random_range(&low, &high)?;
            match Self::with_exponent(params.clone(), exponent) {
                Ok(group) => return Ok(group),
                Err(Error::KeyGenFailed(_)) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(Error::KeyGenFailed(format!(
            "no usable exponent after {} attempts",
            KEYGEN_ATTEMPTS
        )))
    }

    /// Build a key pair from a fixed private exponent.
    ///
    /// Used for known-answer tests. In production, use `generate()` instead.
    #[doc(hidden)]
    pub fn from_exponent(params: ModpParams, exponent: &[u8]) -> Result<Self> {
        let exponent = SecretUint::from_bytes_be(exponent);
        if exponent.is_zero() || exponent.expose() >= &params.p_minus_1 {
            return Err(Error::KeyGenFailed("exponent out of range".into()));
        }
        Self::with_exponent(params, exponent)
    }

    fn with_exponent(params: ModpParams, exponent: SecretUint) -> Result<Self> {
        let public = params.g.modpow(exponent.expose(), &params.p);
        if public <= BigUint::one() || public >= params.p_minus_1 {
            return Err(Error::KeyGenFailed("degenerate public value".into()));
        }
        Ok(ModpGroup {
            params,
            exponent,
            public,
        })
    }

    /// Domain parameters of this key pair.
    pub fn params(&self) -> &ModpParams {
        &self.params
    }
}

impl KeyExchange for ModpGroup {
    fn initialize(spec: &'static GroupSpec) -> Result<Self> {
        let params =
            ModpParams::from_spec(spec).map_err(|e| Error::KeyGenFailed(e.to_string()))?;
        Self::generate(params)
    }

    fn encoded_length(&self) -> usize {
        self.params.encoded_length()
    }

    fn produce_exchange_value(&self) -> Result<Octets> {
        Octets::new(self.public.to_bytes_be()).left_pad_to(self.encoded_length())
    }

    fn derive_shared(&self, peer_exchange_value: &[u8]) -> Result<Octets> {
        let width = self.encoded_length();
        if peer_exchange_value.len() != width {
            return Err(Error::InvalidPeerValue(format!(
                "expected {} bytes, got {}",
                width,
                peer_exchange_value.len()
            )));
        }
        let y = BigUint::from_bytes_be(peer_exchange_value);
        self.params.check_peer(&y)?;
        let shared = SecretUint::new(y.modpow(self.exponent.expose(), &self.params.p));
        shared.to_octets(width)
    }
}

impl Zeroize for ModpGroup {
    fn zeroize(&mut self) {
        self.exponent.zeroize();
    }
}

impl ZeroizeOnDrop for ModpGroup {}
