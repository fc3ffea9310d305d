// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Oakley EC2N curves `y^2 + xy = x^3 + ax^2 + b` over GF(2^m).
//!
//! Field elements are polynomials over GF(2) held as `BigUint` bit strings,
//! reduced by a trinomial `x^m + x^k + 1`. Points are affine.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::catalog::CurveId;
use crate::error::{Error, Result};
use crate::secret::{wipe, SecretUint};

use super::AffineCoordinates;

/// Affine point, `None` for the point at infinity. Coordinates are wiped on
/// drop.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Point(Option<(BigUint, BigUint)>);

impl Point {
    fn infinity() -> Self {
        Point(None)
    }

    fn new(x: BigUint, y: BigUint) -> Self {
        Point(Some((x, y)))
    }

    fn is_infinity(&self) -> bool {
        self.0.is_none()
    }

    fn into_affine(mut self) -> Option<(SecretUint, SecretUint)> {
        self.0
            .take()
            .map(|(x, y)| (SecretUint::new(x), SecretUint::new(y)))
    }
}

impl Drop for Point {
    fn drop(&mut self) {
        if let Some((x, y)) = &mut self.0 {
            wipe(x);
            wipe(y);
        }
    }
}

/// Domain parameters of a binary-field curve.
///
/// `n` is the order of the generator. For both Oakley curves it is
/// composite, `n = h * q` with prime `q` and cofactor `h` (4 for EC2N-155,
/// 2 for EC2N-185).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryCurve {
    m: u64,
    poly: BigUint,
    a: BigUint,
    b: BigUint,
    gx: BigUint,
    gy: BigUint,
    n: BigUint,
    cofactor: BigUint,
    field_len: usize,
}

fn trinomial(m: u64, k: u64) -> BigUint {
    let mut poly = BigUint::one();
    poly.set_bit(m, true);
    poly.set_bit(k, true);
    poly
}

fn parse_hex(value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidParameters(format!("bad curve constant {}", value)))
}

impl BinaryCurve {
    pub fn oakley(curve: CurveId) -> Result<Self> {
        // RFC 2409 sections 6.3 and 6.4
        let (m, k, b, gx, gy, n, h) = match curve {
            CurveId::Ec2n155 => (155, 62, "07338f", "7b", "1c8", "2aaaaaaaaaaaaaaaaaac7f3c7881bd0868fa86c", 4u32),
            CurveId::Ec2n185 => (185, 69, "1ee9", "18", "0d", "ffffffffffffffffffffffedf97c44db9f2420bafca75e", 2u32),
            other => {
                return Err(Error::InvalidParameters(format!(
                    "{:?} is not a binary-field curve",
                    other
                )))
            }
        };
        Ok(BinaryCurve {
            m,
            poly: trinomial(m, k),
            a: BigUint::zero(),
            b: parse_hex(b)?,
            gx: parse_hex(gx)?,
            gy: parse_hex(gy)?,
            n: parse_hex(n)?,
            cofactor: BigUint::from(h),
            field_len: (m as usize).div_ceil(8),
        })
    }

    /// Prime order `q` of the subgroup private keys live in.
    fn subgroup_order(&self) -> BigUint {
        &self.n / &self.cofactor
    }

    pub fn field_len(&self) -> usize {
        self.field_len
    }

    fn is_element(&self, v: &BigUint) -> bool {
        v.bits() <= self.m
    }

    fn reduce(&self, mut r: BigUint) -> BigUint {
        while r.bits() > self.m {
            let shift = r.bits() - 1 - self.m;
            r ^= &self.poly << shift as usize;
        }
        r
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let mut r = BigUint::zero();
        for i in 0..b.bits() {
            if b.bit(i) {
                r ^= a << i as usize;
            }
        }
        self.reduce(r)
    }

    fn sqr(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    /// Inverse by the extended Euclidean algorithm on polynomials.
    /// `a` must be non-zero.
    fn inv(&self, a: &BigUint) -> BigUint {
        let mut u = a.clone();
        let mut v = self.poly.clone();
        let mut g1 = BigUint::one();
        let mut g2 = BigUint::zero();
        while !u.is_one() && !u.is_zero() {
            let (du, dv) = (u.bits(), v.bits());
            if du < dv {
                std::mem::swap(&mut u, &mut v);
                std::mem::swap(&mut g1, &mut g2);
            }
            let j = u.bits().abs_diff(v.bits()) as usize;
            u ^= &v << j;
            g1 ^= &g2 << j;
        }
        self.reduce(g1)
    }

    fn div(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.mul(a, &self.inv(b))
    }

    /// `y^2 + xy == x^3 + ax^2 + b`.
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        if !self.is_element(x) || !self.is_element(y) {
            return false;
        }
        let x2 = self.sqr(x);
        let lhs = self.sqr(y) ^ self.mul(x, y);
        let rhs = self.mul(&x2, x) ^ self.mul(&self.a, &x2) ^ &self.b;
        lhs == rhs
    }

    fn double(&self, pt: &Point) -> Point {
        let Some((x1, y1)) = &pt.0 else {
            return Point::infinity();
        };
        if x1.is_zero() {
            return Point::infinity();
        }
        // l = x + y/x, x3 = l^2 + l + a, y3 = x^2 + (l + 1) x3
        let l = x1 ^ self.div(y1, x1);
        let x3 = self.sqr(&l) ^ &l ^ &self.a;
        let y3 = self.sqr(x1) ^ self.mul(&(&l ^ BigUint::one()), &x3);
        Point::new(x3, y3)
    }

    fn add(&self, p: &Point, q: &Point) -> Point {
        let Some((x1, y1)) = &p.0 else {
            return q.clone();
        };
        let Some((x2, y2)) = &q.0 else {
            return p.clone();
        };
        if x1 == x2 {
            // Q is P or -P = (x, x + y)
            if y1 == y2 {
                return self.double(p);
            }
            return Point::infinity();
        }
        // l = (y1 + y2)/(x1 + x2), x3 = l^2 + l + x1 + x2 + a,
        // y3 = l(x1 + x3) + x3 + y1
        let l = self.div(&(y1 ^ y2), &(x1 ^ x2));
        let x3 = self.sqr(&l) ^ &l ^ x1 ^ x2 ^ &self.a;
        let y3 = self.mul(&l, &(x1 ^ &x3)) ^ &x3 ^ y1;
        Point::new(x3, y3)
    }

    fn ladder(&self, k: &BigUint, pt: &Point) -> Point {
        let mut r0 = Point::infinity();
        let mut r1 = pt.clone();
        let steps = self.n.bits().max(k.bits());
        for i in (0..steps).rev() {
            if k.bit(i) {
                r0 = self.add(&r0, &r1);
                r1 = self.double(&r1);
            } else {
                r1 = self.add(&r0, &r1);
                r0 = self.double(&r0);
            }
        }
        r0
    }

    /// `k * (x, y)`, `None` for the point at infinity.
    pub fn multiply(
        &self,
        k: &BigUint,
        x: &BigUint,
        y: &BigUint,
    ) -> Option<(SecretUint, SecretUint)> {
        self.ladder(k, &Point::new(x.clone(), y.clone())).into_affine()
    }

    fn is_killed_by(&self, k: &BigUint, x: &BigUint, y: &BigUint) -> bool {
        self.ladder(k, &Point::new(x.clone(), y.clone())).is_infinity()
    }

    /// On the curve, killed by the generator's order `n` and not by the
    /// cofactor. The last check rejects the points of order 2 and 4.
    pub fn validate(&self, x: &BigUint, y: &BigUint) -> bool {
        self.contains(x, y)
            && self.is_killed_by(&self.n, x, y)
            && !self.is_killed_by(&self.cofactor, x, y)
    }
}

/// Key pair on an Oakley EC2N curve.
///
/// The private scalar is always a multiple of the cofactor, so the public
/// point lies in the prime-order subgroup and any small-order component of
/// a peer point drops out of the shared point.
pub struct BinaryCurveKey {
    curve: BinaryCurve,
    secret: SecretUint,
    public: AffineCoordinates,
}

impl BinaryCurveKey {
    pub fn generate(curve: CurveId) -> Result<Self> {
        let curve = BinaryCurve::oakley(curve)?;
        let base = SecretUint::random_range(&BigUint::one(), &curve.subgroup_order())?;
        let secret = SecretUint::new(base.expose() * &curve.cofactor);
        Self::with_secret(curve, secret)
    }

    /// Load a fixed scalar, for known-answer tests.
    #[doc(hidden)]
    pub fn from_scalar(curve: CurveId, scalar: &[u8]) -> Result<Self> {
        let curve = BinaryCurve::oakley(curve)?;
        let secret = SecretUint::from_bytes_be(scalar);
        if secret.is_zero() || secret.expose() >= &curve.n {
            return Err(Error::KeyGenFailed("scalar out of range".into()));
        }
        if !secret.expose().is_multiple_of(&curve.cofactor) {
            return Err(Error::KeyGenFailed(
                "scalar is not a multiple of the cofactor".into(),
            ));
        }
        Self::with_secret(curve, secret)
    }

    fn with_secret(curve: BinaryCurve, secret: SecretUint) -> Result<Self> {
        let (x, y) = curve
            .multiply(secret.expose(), &curve.gx, &curve.gy)
            .ok_or_else(|| Error::KeyGenFailed("public point is the point at infinity".into()))?;
        if !curve.validate(x.expose(), y.expose()) {
            return Err(Error::KeyGenFailed(
                "generated public point failed validation".into(),
            ));
        }
        let width = curve.field_len;
        let public = AffineCoordinates::new(x.to_octets(width)?, y.to_octets(width)?);
        Ok(BinaryCurveKey {
            curve,
            secret,
            public,
        })
    }

    pub fn public_point(&self) -> Result<AffineCoordinates> {
        Ok(self.public.clone())
    }

    pub fn agree(&self, peer: &AffineCoordinates) -> Result<AffineCoordinates> {
        let x = BigUint::from_bytes_be(peer.x());
        let y = BigUint::from_bytes_be(peer.y());
        if !self.curve.is_element(&x) || !self.curve.is_element(&y) {
            return Err(Error::MalformedPoint(format!(
                "coordinate exceeds {} bits",
                self.curve.m
            )));
        }
        if !self.curve.validate(&x, &y) {
            return Err(Error::InvalidPeerValue(
                "point is not in the prime-order subgroup".into(),
            ));
        }
        let (sx, sy) = self
            .curve
            .multiply(self.secret.expose(), &x, &y)
            .ok_or_else(|| Error::InvalidPeerValue("result is the point at infinity".into()))?;
        let width = self.curve.field_len;
        Ok(AffineCoordinates::new(
            sx.to_octets(width)?,
            sy.to_octets(width)?,
        ))
    }
}

impl Zeroize for BinaryCurveKey {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl ZeroizeOnDrop for BinaryCurveKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octets::Octets;
    use crate::secret::drop_observer;

    fn point(encoded: &str) -> AffineCoordinates {
        let bytes = hex::decode(encoded).unwrap();
        let (x, y) = bytes.split_at(bytes.len() / 2);
        AffineCoordinates::new(Octets::from_slice(x), Octets::from_slice(y))
    }

    fn encode(p: &AffineCoordinates) -> String {
        format!("{}{}", hex::encode(p.x()), hex::encode(p.y()))
    }

    fn coordinates(p: &AffineCoordinates) -> (BigUint, BigUint) {
        (BigUint::from_bytes_be(p.x()), BigUint::from_bytes_be(p.y()))
    }

    /// `(0, sqrt(b))`, the only point of order 2.
    fn order_two_point(curve: &BinaryCurve) -> Point {
        let mut y = curve.b.clone();
        for _ in 1..curve.m {
            y = curve.sqr(&y);
        }
        Point::new(BigUint::zero(), y)
    }

    #[test]
    fn test_generators() {
        for id in [CurveId::Ec2n155, CurveId::Ec2n185] {
            let curve = BinaryCurve::oakley(id).unwrap();
            assert!(curve.contains(&curve.gx, &curve.gy), "{:?}", id);
            assert!(curve.validate(&curve.gx, &curve.gy), "{:?}", id);
            assert_eq!(curve.subgroup_order() * &curve.cofactor, curve.n);
        }
        assert_eq!(BinaryCurve::oakley(CurveId::Ec2n155).unwrap().field_len(), 20);
        assert_eq!(BinaryCurve::oakley(CurveId::Ec2n185).unwrap().field_len(), 24);
    }

    #[test]
    fn test_not_binary() {
        assert!(BinaryCurve::oakley(CurveId::P256).is_err());
    }

    #[test]
    fn test_inverse() {
        let curve = BinaryCurve::oakley(CurveId::Ec2n155).unwrap();
        for v in [1u32, 2, 3, 0x7b, 0x1c8, 0xdead_beef] {
            let v = BigUint::from(v);
            assert!(curve.mul(&v, &curve.inv(&v)).is_one(), "{}", v);
        }
    }

    #[test]
    fn test_doubling_matches_addition_chain() {
        let curve = BinaryCurve::oakley(CurveId::Ec2n155).unwrap();
        let g = Point::new(curve.gx.clone(), curve.gy.clone());
        let two_g = curve.double(&g);
        assert_eq!(two_g, curve.ladder(&BigUint::from(2u8), &g));
        let three_g = curve.add(&two_g, &g);
        assert_eq!(three_g, curve.ladder(&BigUint::from(3u8), &g));
        let (x, y) = three_g.0.as_ref().unwrap();
        assert!(curve.contains(x, y));
    }

    #[test]
    fn test_ec2n155_known_answer() {
        let alice = BinaryCurveKey::from_scalar(
            CurveId::Ec2n155,
            &hex::decode("01798e85a5574358267d678cb1f4399864c15348").unwrap(),
        )
        .unwrap();
        let bob = BinaryCurveKey::from_scalar(
            CurveId::Ec2n155,
            &hex::decode("025cb8b0832c1c8a468f4f80d27528278222f6dc").unwrap(),
        )
        .unwrap();
        let a = alice.public_point().unwrap();
        let b = bob.public_point().unwrap();
        assert_eq!(
            encode(&a),
            "01eb776ed6bc8631316982f7b1e8cfb3120b5f3b05394746edd879139eb70038b443227c89adbfc4"
        );
        assert_eq!(
            encode(&b),
            "056ef0cee191d5a70f9f9dc2cfad555aeae256940464981b3487615fb0c799c8324f3a51760ae62b"
        );
        assert_eq!(
            encode(&alice.agree(&b).unwrap()),
            "02a112ff6db0f615546852c089d3cf08793f4d0204eaa9e0d1b2596c6349919df61c6ab5e6f66874"
        );
        assert_eq!(alice.agree(&b).unwrap(), bob.agree(&a).unwrap());
    }

    #[test]
    fn test_ec2n185_known_answer() {
        let alice = BinaryCurveKey::from_scalar(
            CurveId::Ec2n185,
            &hex::decode("468acf3c5c31711b07a4895b8787ec31955e923c50c922").unwrap(),
        )
        .unwrap();
        let b = point(
            "0058237d2b7ab5e53f3f227a7300f3cae615375438a025c200f367fd5789a880b60c145e09386348d393aeb0a424e904",
        );
        assert_eq!(
            encode(&alice.public_point().unwrap()),
            "008ce3bc2b42afc25ff7994f7a4214dd18746cf932870d9000619ac980c5e6e0bd57207fbd3c7d357287ecec9a2f00f8"
        );
        assert_eq!(
            encode(&alice.agree(&b).unwrap()),
            "002332c8abd3e32f8584b9212ce045006215120d8121dcbc018fd21c2e5849caa09efa49c1ad1693ce5af3fd5d12be68"
        );
    }

    #[test]
    fn test_scalar_must_be_cofactor_multiple() {
        // 0x23 is odd
        assert!(BinaryCurveKey::from_scalar(
            CurveId::Ec2n155,
            &hex::decode("025e63a16955d0d6099f6fda022323427e1c1323").unwrap(),
        )
        .is_err());
        assert!(BinaryCurveKey::from_scalar(CurveId::Ec2n155, &[0x06]).is_err());
        assert!(BinaryCurveKey::from_scalar(CurveId::Ec2n155, &[0x08]).is_ok());
        assert!(BinaryCurveKey::from_scalar(CurveId::Ec2n185, &[0x07]).is_err());
        assert!(BinaryCurveKey::from_scalar(CurveId::Ec2n185, &[0x06]).is_ok());

        for id in [CurveId::Ec2n155, CurveId::Ec2n185] {
            for _ in 0..8 {
                let key = BinaryCurveKey::generate(id).unwrap();
                assert!(key.secret.expose().is_multiple_of(&key.curve.cofactor));
            }
        }
    }

    #[test]
    fn test_rejects_order_two_point() {
        for id in [CurveId::Ec2n155, CurveId::Ec2n185] {
            let key = BinaryCurveKey::generate(id).unwrap();
            let t = order_two_point(&key.curve);
            let (x, y) = t.0.as_ref().unwrap();
            assert!(key.curve.contains(x, y));
            assert!(key.curve.double(&t).is_infinity());

            let width = key.curve.field_len;
            let peer = AffineCoordinates::new(
                Octets::zeroed(width),
                SecretUint::new(y.clone()).to_octets(width).unwrap(),
            );
            assert!(
                matches!(key.agree(&peer), Err(Error::InvalidPeerValue(_))),
                "{:?}",
                id
            );
        }
    }

    #[test]
    fn test_rejects_order_four_point() {
        let key = BinaryCurveKey::generate(CurveId::Ec2n155).unwrap();
        let peer = point(
            "00311000000223a000c4474000088e8000111d1d0024a000002943a00092874000a50e80014a1e4e",
        );
        let (x, y) = coordinates(&peer);
        let p = Point::new(x.clone(), y.clone());
        assert!(key.curve.contains(&x, &y));
        assert!(!key.curve.double(&p).is_infinity());
        assert!(key.curve.ladder(&BigUint::from(4u8), &p).is_infinity());
        assert!(matches!(key.agree(&peer), Err(Error::InvalidPeerValue(_))));
    }

    #[test]
    fn test_small_order_component_drops_out() {
        for id in [CurveId::Ec2n155, CurveId::Ec2n185] {
            let alice = BinaryCurveKey::generate(id).unwrap();
            let bob = BinaryCurveKey::generate(id).unwrap();
            let curve = &alice.curve;
            let b = bob.public_point().unwrap();
            let (bx, by) = coordinates(&b);

            // B + T has order 2q and passes validation
            let shifted = curve.add(&Point::new(bx, by), &order_two_point(curve));
            let (x, y) = shifted.0.as_ref().unwrap();
            assert!(curve.validate(x, y));
            let width = curve.field_len;
            let peer = AffineCoordinates::new(
                SecretUint::new(x.clone()).to_octets(width).unwrap(),
                SecretUint::new(y.clone()).to_octets(width).unwrap(),
            );
            assert_eq!(alice.agree(&peer).unwrap(), alice.agree(&b).unwrap());
        }
    }

    #[test]
    fn test_rejects_point_outside_subgroup() {
        // On EC2N-155 but not killed by the generator's order
        let key = BinaryCurveKey::generate(CurveId::Ec2n155).unwrap();
        let outside = point(
            "03931316fb3ee10a8a153c8380b0b8af94b4f6c70014d14c3e11ad571cac4c6f15b55588865359bd",
        );
        let (x, y) = coordinates(&outside);
        assert!(key.curve.contains(&x, &y));
        assert!(matches!(key.agree(&outside), Err(Error::InvalidPeerValue(_))));

        let key = BinaryCurveKey::generate(CurveId::Ec2n185).unwrap();
        let outside = point(
            "00bec7cf79e3a92c7c40c7c997af687dddaef2fa4c7b2f39016e6f96cadf413a119980d8b964323c30f7f23fe7db1bf1",
        );
        assert!(matches!(key.agree(&outside), Err(Error::InvalidPeerValue(_))));
    }

    #[test]
    fn test_rejects_off_curve_and_oversized() {
        let key = BinaryCurveKey::generate(CurveId::Ec2n155).unwrap();
        let zeros = AffineCoordinates::new(Octets::zeroed(20), Octets::zeroed(20));
        assert!(matches!(key.agree(&zeros), Err(Error::InvalidPeerValue(_))));

        let mut x = vec![0u8; 20];
        x[0] = 0x08; // bit 155
        let wide = AffineCoordinates::new(Octets::new(x), Octets::zeroed(20));
        assert!(matches!(key.agree(&wide), Err(Error::MalformedPoint(_))));
    }

    #[test]
    fn test_point_drop_wipes_coordinates() {
        let curve = BinaryCurve::oakley(CurveId::Ec2n185).unwrap();
        let digits =
            (curve.gx.bits() as usize).div_ceil(32) + (curve.gy.bits() as usize).div_ceil(32);
        let before = drop_observer::wiped_digits();
        drop(Point::new(curve.gx.clone(), curve.gy.clone()));
        assert_eq!(drop_observer::wiped_digits() - before, digits);

        // The ladder registers and the shared point go through the same path
        let before = drop_observer::wiped_digits();
        let shared = curve.multiply(&BigUint::from(0x1234u32), &curve.gx, &curve.gy);
        assert!(drop_observer::wiped_digits() > before);
        let before = drop_observer::wiped_digits();
        drop(shared);
        assert!(drop_observer::wiped_digits() > before);
    }

    #[test]
    fn test_zeroize_clears_scalar() {
        let mut key = BinaryCurveKey::generate(CurveId::Ec2n185).unwrap();
        assert!(!key.secret.is_zero());
        key.zeroize();
        assert!(key.secret.is_zero());
    }
}
