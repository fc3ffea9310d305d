// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Short Weierstrass curves `y^2 = x^3 + ax + b` over GF(p) for the
//! brainpool r1 groups, in Jacobian coordinates on `num-bigint`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::catalog::CurveId;
use crate::error::{Error, Result};
use crate::secret::{wipe, SecretUint};

use super::AffineCoordinates;

struct CurveHex {
    p: &'static str,
    a: &'static str,
    b: &'static str,
    gx: &'static str,
    gy: &'static str,
    n: &'static str,
}

// RFC 5639 section 3
const BRAINPOOL_P224R1: CurveHex = CurveHex {
    p: "D7C134AA264366862A18302575D1D787B09F075797DA89F57EC8C0FF",
    a: "68A5E62CA9CE6C1C299803A6C1530B514E182AD8B0042A59CAD29F43",
    b: "2580F63CCFE44138870713B1A92369E33E2135D266DBB372386C400B",
    gx: "0D9029AD2C7E5CF4340823B2A87DC68C9E4CE3174C1E6EFDEE12C07D",
    gy: "58AA56F772C0726F24C6B89E4ECDAC24354B9E99CAA3F6D3761402CD",
    n: "D7C134AA264366862A18302575D0FB98D116BC4B6DDEBCA3A5A7939F",
};

const BRAINPOOL_P256R1: CurveHex = CurveHex {
    p: "A9FB57DBA1EEA9BC3E660A909D838D726E3BF623D52620282013481D1F6E5377",
    a: "7D5A0975FC2C3057EEF67530417AFFE7FB8055C126DC5C6CE94A4B44F330B5D9",
    b: "26DC5C6CE94A4B44F330B5D9BBD77CBF958416295CF7E1CE6BCCDC18FF8C07B6",
    gx: "8BD2AEB9CB7E57CB2C4B482FFC81B7AFB9DE27E1E3BD23C23A4453BD9ACE3262",
    gy: "547EF835C3DAC4FD97F8461A14611DC9C27745132DED8E545C1D54C72F046997",
    n: "A9FB57DBA1EEA9BC3E660A909D838D718C397AA3B561A6F7901E0E82974856A7",
};

const BRAINPOOL_P384R1: CurveHex = CurveHex {
    p: "8CB91E82A3386D280F5D6F7E50E641DF152F7109ED5456B412B1DA197FB71123ACD3A729901D1A71874700133107EC53",
    a: "7BC382C63D8C150C3C72080ACE05AFA0C2BEA28E4FB22787139165EFBA91F90F8AA5814A503AD4EB04A8C7DD22CE2826",
    b: "04A8C7DD22CE28268B39B55416F0447C2FB77DE107DCD2A62E880EA53EEB62D57CB4390295DBC9943AB78696FA504C11",
    gx: "1D1C64F068CF45FFA2A63A81B7C13F6B8847A3E77EF14FE3DB7FCAFE0CBD10E8E826E03436D646AAEF87B2E247D4AF1E",
    gy: "8ABE1D7520F9C2A45CB1EB8E95CFD55262B70B29FEEC5864E19C054FF99129280E4646217791811142820341263C5315",
    n: "8CB91E82A3386D280F5D6F7E50E641DF152F7109ED5456B31F166E6CAC0425A7CF3AB6AF6B7FC3103B883202E9046565",
};

const BRAINPOOL_P512R1: CurveHex = CurveHex {
    p: "AADD9DB8DBE9C48B3FD4E6AE33C9FC07CB308DB3B3C9D20ED6639CCA703308717D4D9B009BC66842AECDA12AE6A380E62881FF2F2D82C68528AA6056583A48F3",
    a: "7830A3318B603B89E2327145AC234CC594CBDD8D3DF91610A83441CAEA9863BC2DED5D5AA8253AA10A2EF1C98B9AC8B57F1117A72BF2C7B9E7C1AC4D77FC94CA",
    b: "3DF91610A83441CAEA9863BC2DED5D5AA8253AA10A2EF1C98B9AC8B57F1117A72BF2C7B9E7C1AC4D77FC94CADC083E67984050B75EBAE5DD2809BD638016F723",
    gx: "81AEE4BDD82ED9645A21322E9C4C6A9385ED9F70B5D916C1B43B62EEF4D0098EFF3B1F78E2D0D48D50D1687B93B97D5F7C6D5047406A5E688B352209BCB9F822",
    gy: "7DDE385D566332ECC0EABFA9CF7822FDF209F70024A57B1AA000C55B881F8111B2DCDE494A5F485E5BCA4BD88A2763AED1CA2B2FA8F0540678CD1E0F3AD80892",
    n: "AADD9DB8DBE9C48B3FD4E6AE33C9FC07CB308DB3B3C9D20ED6639CCA70330870553E5C414CA92619418661197FAC10471DB1D381085DDADDB58796829CA90069",
};

fn parse_hex(value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidParameters(format!("bad curve constant {}", value)))
}

/// A point in Jacobian coordinates, `(X/Z^2, Y/Z^3)`. `Z = 0` is infinity.
/// Coordinates are wiped on drop.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Jacobian {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl Jacobian {
    fn infinity() -> Self {
        Jacobian {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    fn from_affine(x: &BigUint, y: &BigUint) -> Self {
        Jacobian {
            x: x.clone(),
            y: y.clone(),
            z: BigUint::one(),
        }
    }

    fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }
}

impl Drop for Jacobian {
    fn drop(&mut self) {
        wipe(&mut self.x);
        wipe(&mut self.y);
        wipe(&mut self.z);
    }
}

/// Domain parameters of a prime-field curve with a prime-order generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeCurve {
    p: BigUint,
    a: BigUint,
    b: BigUint,
    gx: BigUint,
    gy: BigUint,
    n: BigUint,
    field_len: usize,
}

impl PrimeCurve {
    pub fn brainpool(curve: CurveId) -> Result<Self> {
        let hex = match curve {
            CurveId::BrainpoolP224r1 => &BRAINPOOL_P224R1,
            CurveId::BrainpoolP256r1 => &BRAINPOOL_P256R1,
            CurveId::BrainpoolP384r1 => &BRAINPOOL_P384R1,
            CurveId::BrainpoolP512r1 => &BRAINPOOL_P512R1,
            other => {
                return Err(Error::InvalidParameters(format!(
                    "{:?} is not a brainpool curve",
                    other
                )))
            }
        };
        let p = parse_hex(hex.p)?;
        let field_len = (p.bits() as usize).div_ceil(8);
        Ok(PrimeCurve {
            a: parse_hex(hex.a)?,
            b: parse_hex(hex.b)?,
            gx: parse_hex(hex.gx)?,
            gy: parse_hex(hex.gy)?,
            n: parse_hex(hex.n)?,
            p,
            field_len,
        })
    }

    pub fn order(&self) -> &BigUint {
        &self.n
    }

    pub fn field_len(&self) -> usize {
        self.field_len
    }

    fn add_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    fn sub_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            &self.p - (b - a)
        }
    }

    fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    fn inv_mod(&self, a: &BigUint) -> BigUint {
        a.modpow(&(&self.p - 2u32), &self.p)
    }

    /// `y^2 == x^3 + ax + b`, with both coordinates reduced.
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        if x >= &self.p || y >= &self.p {
            return false;
        }
        let lhs = self.mul_mod(y, y);
        let x2 = self.mul_mod(x, x);
        let x3 = self.mul_mod(&x2, x);
        let ax = self.mul_mod(&self.a, x);
        let rhs = self.add_mod(&self.add_mod(&x3, &ax), &self.b);
        lhs == rhs
    }

    fn double(&self, pt: &Jacobian) -> Jacobian {
        if pt.is_infinity() || pt.y.is_zero() {
            return Jacobian::infinity();
        }
        // S = 4XY^2, M = 3X^2 + aZ^4
        let y2 = self.mul_mod(&pt.y, &pt.y);
        let s = self.mul_mod(&(&pt.x * 4u32), &y2);
        let x2 = self.mul_mod(&pt.x, &pt.x);
        let z2 = self.mul_mod(&pt.z, &pt.z);
        let z4 = self.mul_mod(&z2, &z2);
        let m = self.add_mod(&(&x2 * 3u32), &self.mul_mod(&self.a, &z4));

        let x3 = self.sub_mod(&self.mul_mod(&m, &m), &((&s * 2u32) % &self.p));
        let y4 = self.mul_mod(&y2, &y2);
        let y3 = self.sub_mod(
            &self.mul_mod(&m, &self.sub_mod(&s, &x3)),
            &((&y4 * 8u32) % &self.p),
        );
        let z3 = self.mul_mod(&(&pt.y * 2u32), &pt.z);
        Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    fn add(&self, a: &Jacobian, b: &Jacobian) -> Jacobian {
        if a.is_infinity() {
            return b.clone();
        }
        if b.is_infinity() {
            return a.clone();
        }
        let z1z1 = self.mul_mod(&a.z, &a.z);
        let z2z2 = self.mul_mod(&b.z, &b.z);
        let u1 = self.mul_mod(&a.x, &z2z2);
        let u2 = self.mul_mod(&b.x, &z1z1);
        let s1 = self.mul_mod(&a.y, &self.mul_mod(&z2z2, &b.z));
        let s2 = self.mul_mod(&b.y, &self.mul_mod(&z1z1, &a.z));

        let h = self.sub_mod(&u2, &u1);
        let r = self.sub_mod(&s2, &s1);
        if h.is_zero() {
            if r.is_zero() {
                return self.double(a);
            }
            return Jacobian::infinity();
        }

        let h2 = self.mul_mod(&h, &h);
        let h3 = self.mul_mod(&h2, &h);
        let u1h2 = self.mul_mod(&u1, &h2);

        // X3 = R^2 - H^3 - 2 U1 H^2
        let x3 = self.sub_mod(
            &self.sub_mod(&self.mul_mod(&r, &r), &h3),
            &self.add_mod(&u1h2, &u1h2),
        );
        // Y3 = R (U1 H^2 - X3) - S1 H^3
        let y3 = self.sub_mod(
            &self.mul_mod(&r, &self.sub_mod(&u1h2, &x3)),
            &self.mul_mod(&s1, &h3),
        );
        let z3 = self.mul_mod(&self.mul_mod(&h, &a.z), &b.z);
        Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Montgomery ladder over the bit length of the group order, so the
    /// number of steps does not depend on the scalar.
    fn mul(&self, k: &BigUint, pt: &Jacobian) -> Jacobian {
        let mut r0 = Jacobian::infinity();
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

    fn to_affine(&self, pt: &Jacobian) -> Option<(SecretUint, SecretUint)> {
        if pt.is_infinity() {
            return None;
        }
        let z_inv = SecretUint::new(self.inv_mod(&pt.z));
        let z_inv2 = SecretUint::new(self.mul_mod(z_inv.expose(), z_inv.expose()));
        let z_inv3 = SecretUint::new(self.mul_mod(z_inv2.expose(), z_inv.expose()));
        Some((
            SecretUint::new(self.mul_mod(&pt.x, z_inv2.expose())),
            SecretUint::new(self.mul_mod(&pt.y, z_inv3.expose())),
        ))
    }

    /// `k * (x, y)` in affine form, `None` for the point at infinity.
    pub fn multiply(
        &self,
        k: &BigUint,
        x: &BigUint,
        y: &BigUint,
    ) -> Option<(SecretUint, SecretUint)> {
        self.to_affine(&self.mul(k, &Jacobian::from_affine(x, y)))
    }

    /// On the curve and of order `n`. The point at infinity has no affine
    /// form and cannot reach this check.
    pub fn validate(&self, x: &BigUint, y: &BigUint) -> bool {
        self.contains(x, y) && self.multiply(&self.n, x, y).is_none()
    }

    fn generator_multiple(&self, k: &BigUint) -> Option<(SecretUint, SecretUint)> {
        self.multiply(k, &self.gx, &self.gy)
    }
}

/// Key pair on a brainpool curve.
pub struct WeierstrassKey {
    curve: PrimeCurve,
    secret: SecretUint,
    public: AffineCoordinates,
}

impl WeierstrassKey {
    pub fn generate(curve: CurveId) -> Result<Self> {
        let curve = PrimeCurve::brainpool(curve)?;
        let secret = SecretUint::random_range(&BigUint::one(), &curve.n)?;
        Self::with_secret(curve, secret)
    }

    /// Load a fixed scalar, for known-answer tests.
    #[doc(hidden)]
    pub fn from_scalar(curve: CurveId, scalar: &[u8]) -> Result<Self> {
        let curve = PrimeCurve::brainpool(curve)?;
        let secret = SecretUint::from_bytes_be(scalar);
        if secret.is_zero() || secret.expose() >= &curve.n {
            return Err(Error::KeyGenFailed("scalar out of range".into()));
        }
        Self::with_secret(curve, secret)
    }

    fn with_secret(curve: PrimeCurve, secret: SecretUint) -> Result<Self> {
        let (x, y) = curve
            .generator_multiple(secret.expose())
            .ok_or_else(|| Error::KeyGenFailed("public point is the point at infinity".into()))?;
        if !curve.validate(x.expose(), y.expose()) {
            return Err(Error::KeyGenFailed(
                "generated public point failed validation".into(),
            ));
        }
        let width = curve.field_len;
        let public = AffineCoordinates::new(x.to_octets(width)?, y.to_octets(width)?);
        Ok(WeierstrassKey {
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
        if x >= self.curve.p || y >= self.curve.p {
            return Err(Error::MalformedPoint(
                "coordinate is not a field element".into(),
            ));
        }
        if !self.curve.validate(&x, &y) {
            return Err(Error::InvalidPeerValue(
                "point is not in the curve group".into(),
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

impl Zeroize for WeierstrassKey {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl ZeroizeOnDrop for WeierstrassKey {}
