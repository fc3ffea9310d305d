// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Domain parameter catalog.
//!
//! The table of key-exchange groups this crate can negotiate, keyed by the
//! IANA IKEv2 Diffie-Hellman group number. It is plain `static` data, so any
//! number of threads may read it without locking.
//!
//! - MODP groups 1, 2, 5 (RFC 2409 / RFC 3526) and 14-18 (RFC 3526)
//! - MODP groups with prime-order subgroups 22-24 (RFC 5114)
//! - NIST prime curves 19-21, 25, 26 (RFC 5903 / RFC 5114)
//! - Brainpool curves 27-30 (RFC 6954)
//! - Oakley binary curves 3, 4 (RFC 2409)
//! - Curve25519 as private-use group 1034

use crate::error::{Error, Result};

/// The algebraic family a group belongs to. Selects the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupFamily {
    /// Multiplicative group modulo a prime.
    Modp,
    /// Elliptic curve over a prime field.
    EcPrime,
    /// Elliptic curve over a binary field GF(2^m).
    EcBinary,
    /// X25519.
    Curve25519,
}

/// Named elliptic curves known to the curve engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveId {
    /// Oakley EC2N group 3, GF(2^155).
    Ec2n155,
    /// Oakley EC2N group 4, GF(2^185).
    Ec2n185,
    /// NIST P-192 (secp192r1).
    P192,
    /// NIST P-224 (secp224r1).
    P224,
    /// NIST P-256 (secp256r1).
    P256,
    /// NIST P-384 (secp384r1).
    P384,
    /// NIST P-521 (secp521r1).
    P521,
    /// brainpoolP224r1.
    BrainpoolP224r1,
    /// brainpoolP256r1.
    BrainpoolP256r1,
    /// brainpoolP384r1.
    BrainpoolP384r1,
    /// brainpoolP512r1.
    BrainpoolP512r1,
}

/// Domain parameters of a group. Which variant is present follows the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainParams {
    /// Prime modulus and generator as big-endian hex. `subgroup_order` is set
    /// when the generator spans a prime-order subgroup smaller than `(p-1)/2`.
    Modp {
        /// Prime modulus `p`.
        prime: &'static str,
        /// Generator `g`.
        generator: &'static str,
        /// Prime order `q` of the subgroup `g` generates, if known.
        subgroup_order: Option<&'static str>,
    },
    /// A named curve.
    Curve(CurveId),
    /// Parameters fixed inside the backend (Curve25519).
    Builtin,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    /// IANA group number, as carried in negotiation payloads.
    pub id: u32,
    /// Transform name as written in iked configuration.
    pub name: &'static str,
    /// Backend family.
    pub family: GroupFamily,
    /// Bit length of the modulus or field.
    pub bits: usize,
    /// Domain parameters.
    pub params: DomainParams,
}

impl GroupSpec {
    /// Byte length of one field element or of the modulus.
    pub fn field_len(&self) -> usize {
        self.bits.div_ceil(8)
    }

    /// The named curve, for curve groups.
    pub fn curve(&self) -> Option<CurveId> {
        match self.params {
            DomainParams::Curve(curve) => Some(curve),
            _ => None,
        }
    }
}

/// Look up a group by its IANA number.
pub fn lookup(id: u32) -> Result<&'static GroupSpec> {
    GROUPS
        .iter()
        .find(|spec| spec.id == id)
        .ok_or(Error::UnknownGroup(id))
}

/// Look up a group by its transform name, e.g. `"modp2048"` or `"ecp256"`.
pub fn by_name(name: &str) -> Option<&'static GroupSpec> {
    GROUPS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Every group in the catalog, in IANA order.
pub fn groups() -> &'static [GroupSpec] {
    GROUPS
}

const fn modp(
    id: u32,
    name: &'static str,
    bits: usize,
    prime: &'static str,
    generator: &'static str,
    subgroup_order: Option<&'static str>,
) -> GroupSpec {
    GroupSpec {
        id,
        name,
        family: GroupFamily::Modp,
        bits,
        params: DomainParams::Modp {
            prime,
            generator,
            subgroup_order,
        },
    }
}

const fn curve(id: u32, name: &'static str, family: GroupFamily, bits: usize, curve: CurveId) -> GroupSpec {
    GroupSpec {
        id,
        name,
        family,
        bits,
        params: DomainParams::Curve(curve),
    }
}

static GROUPS: &[GroupSpec] = &[
    modp(1, "modp768", 768, MODP_768_P, "02", None),
    modp(2, "modp1024", 1024, MODP_1024_P, "02", None),
    curve(3, "ec2n155", GroupFamily::EcBinary, 155, CurveId::Ec2n155),
    curve(4, "ec2n185", GroupFamily::EcBinary, 185, CurveId::Ec2n185),
    modp(5, "modp1536", 1536, MODP_1536_P, "02", None),
    modp(14, "modp2048", 2048, MODP_2048_P, "02", None),
    modp(15, "modp3072", 3072, MODP_3072_P, "02", None),
    modp(16, "modp4096", 4096, MODP_4096_P, "02", None),
    modp(17, "modp6144", 6144, MODP_6144_P, "02", None),
    modp(18, "modp8192", 8192, MODP_8192_P, "02", None),
    curve(19, "ecp256", GroupFamily::EcPrime, 256, CurveId::P256),
    curve(20, "ecp384", GroupFamily::EcPrime, 384, CurveId::P384),
    curve(21, "ecp521", GroupFamily::EcPrime, 521, CurveId::P521),
    modp(22, "modp1024-160", 1024, MODP_1024_160_P, MODP_1024_160_G, Some(MODP_1024_160_Q)),
    modp(23, "modp2048-224", 2048, MODP_2048_224_P, MODP_2048_224_G, Some(MODP_2048_224_Q)),
    modp(24, "modp2048-256", 2048, MODP_2048_256_P, MODP_2048_256_G, Some(MODP_2048_256_Q)),
    curve(25, "ecp192", GroupFamily::EcPrime, 192, CurveId::P192),
    curve(26, "ecp224", GroupFamily::EcPrime, 224, CurveId::P224),
    curve(27, "brainpool224", GroupFamily::EcPrime, 224, CurveId::BrainpoolP224r1),
    curve(28, "brainpool256", GroupFamily::EcPrime, 256, CurveId::BrainpoolP256r1),
    curve(29, "brainpool384", GroupFamily::EcPrime, 384, CurveId::BrainpoolP384r1),
    curve(30, "brainpool512", GroupFamily::EcPrime, 512, CurveId::BrainpoolP512r1),
    GroupSpec {
        id: 1034,
        name: "curve25519",
        family: GroupFamily::Curve25519,
        bits: 256,
        params: DomainParams::Builtin,
    },
];

// Moduli, generators and subgroup orders, big-endian hex.

const MODP_768_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a63a3620ffffffffffffffff";

const MODP_1024_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece65381ffffffffffffffff";

const MODP_1536_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf05\
    98da48361c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552bb\
    9ed529077096966d670c354e4abc9804f1746c08ca237327ffffffffffffffff";

const MODP_2048_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf05\
    98da48361c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552bb\
    9ed529077096966d670c354e4abc9804f1746c08ca18217c32905e462e36ce3b\
    e39e772c180e86039b2783a2ec07a28fb5c55df06f4c52c9de2bcbf695581718\
    3995497cea956ae515d2261898fa051015728e5a8aacaa68ffffffffffffffff";

const MODP_3072_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf05\
    98da48361c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552bb\
    9ed529077096966d670c354e4abc9804f1746c08ca18217c32905e462e36ce3b\
    e39e772c180e86039b2783a2ec07a28fb5c55df06f4c52c9de2bcbf695581718\
    3995497cea956ae515d2261898fa051015728e5a8aaac42dad33170d04507a33\
    a85521abdf1cba64ecfb850458dbef0a8aea71575d060c7db3970f85a6e1e4c7\
    abf5ae8cdb0933d71e8c94e04a25619dcee3d2261ad2ee6bf12ffa06d98a0864\
    d87602733ec86a64521f2b18177b200cbbe117577a615d6c770988c0bad946e2\
    08e24fa074e5ab3143db5bfce0fd108e4b82d120a93ad2caffffffffffffffff";

const MODP_4096_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf05\
    98da48361c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552bb\
    9ed529077096966d670c354e4abc9804f1746c08ca18217c32905e462e36ce3b\
    e39e772c180e86039b2783a2ec07a28fb5c55df06f4c52c9de2bcbf695581718\
    3995497cea956ae515d2261898fa051015728e5a8aaac42dad33170d04507a33\
    a85521abdf1cba64ecfb850458dbef0a8aea71575d060c7db3970f85a6e1e4c7\
    abf5ae8cdb0933d71e8c94e04a25619dcee3d2261ad2ee6bf12ffa06d98a0864\
    d87602733ec86a64521f2b18177b200cbbe117577a615d6c770988c0bad946e2\
    08e24fa074e5ab3143db5bfce0fd108e4b82d120a92108011a723c12a787e6d7\
    88719a10bdba5b2699c327186af4e23c1a946834b6150bda2583e9ca2ad44ce8\
    dbbbc2db04de8ef92e8efc141fbecaa6287c59474e6bc05d99b2964fa090c3a2\
    233ba186515be7ed1f612970cee2d7afb81bdd762170481cd0069127d5b05aa9\
    93b4ea988d8fddc186ffb7dc90a6c08f4df435c934063199ffffffffffffffff";

const MODP_6144_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf05\
    98da48361c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552bb\
    9ed529077096966d670c354e4abc9804f1746c08ca18217c32905e462e36ce3b\
    e39e772c180e86039b2783a2ec07a28fb5c55df06f4c52c9de2bcbf695581718\
    3995497cea956ae515d2261898fa051015728e5a8aaac42dad33170d04507a33\
    a85521abdf1cba64ecfb850458dbef0a8aea71575d060c7db3970f85a6e1e4c7\
    abf5ae8cdb0933d71e8c94e04a25619dcee3d2261ad2ee6bf12ffa06d98a0864\
    d87602733ec86a64521f2b18177b200cbbe117577a615d6c770988c0bad946e2\
    08e24fa074e5ab3143db5bfce0fd108e4b82d120a92108011a723c12a787e6d7\
    88719a10bdba5b2699c327186af4e23c1a946834b6150bda2583e9ca2ad44ce8\
    dbbbc2db04de8ef92e8efc141fbecaa6287c59474e6bc05d99b2964fa090c3a2\
    233ba186515be7ed1f612970cee2d7afb81bdd762170481cd0069127d5b05aa9\
    93b4ea988d8fddc186ffb7dc90a6c08f4df435c93402849236c3fab4d27c7026\
    c1d4dcb2602646dec9751e763dba37bdf8ff9406ad9e530ee5db382f413001ae\
    b06a53ed9027d831179727b0865a8918da3edbebcf9b14ed44ce6cbaced4bb1b\
    db7f1447e6cc254b332051512bd7af426fb8f401378cd2bf5983ca01c64b92ec\
    f032ea15d1721d03f482d7ce6e74fef6d55e702f46980c82b5a84031900b1c9e\
    59e7c97fbec7e8f323a97a7e36cc88be0f1d45b7ff585ac54bd407b22b4154aa\
    cc8f6d7ebf48e1d814cc5ed20f8037e0a79715eef29be32806a1d58bb7c5da76\
    f550aa3d8a1fbff0eb19ccb1a313d55cda56c9ec2ef29632387fe8d76e3c0468\
    043e8f663f4860ee12bf2d5b0b7474d6e694f91e6dcc4024ffffffffffffffff";

const MODP_8192_P: &str = "ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74\
    020bbea63b139b22514a08798e3404ddef9519b3cd3a431b302b0a6df25f1437\
    4fe1356d6d51c245e485b576625e7ec6f44c42e9a637ed6b0bff5cb6f406b7ed\
    ee386bfb5a899fa5ae9f24117c4b1fe649286651ece45b3dc2007cb8a163bf05\
    98da48361c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552bb\
    9ed529077096966d670c354e4abc9804f1746c08ca18217c32905e462e36ce3b\
    e39e772c180e86039b2783a2ec07a28fb5c55df06f4c52c9de2bcbf695581718\
    3995497cea956ae515d2261898fa051015728e5a8aaac42dad33170d04507a33\
    a85521abdf1cba64ecfb850458dbef0a8aea71575d060c7db3970f85a6e1e4c7\
    abf5ae8cdb0933d71e8c94e04a25619dcee3d2261ad2ee6bf12ffa06d98a0864\
    d87602733ec86a64521f2b18177b200cbbe117577a615d6c770988c0bad946e2\
    08e24fa074e5ab3143db5bfce0fd108e4b82d120a92108011a723c12a787e6d7\
    88719a10bdba5b2699c327186af4e23c1a946834b6150bda2583e9ca2ad44ce8\
    dbbbc2db04de8ef92e8efc141fbecaa6287c59474e6bc05d99b2964fa090c3a2\
    233ba186515be7ed1f612970cee2d7afb81bdd762170481cd0069127d5b05aa9\
    93b4ea988d8fddc186ffb7dc90a6c08f4df435c93402849236c3fab4d27c7026\
    c1d4dcb2602646dec9751e763dba37bdf8ff9406ad9e530ee5db382f413001ae\
    b06a53ed9027d831179727b0865a8918da3edbebcf9b14ed44ce6cbaced4bb1b\
    db7f1447e6cc254b332051512bd7af426fb8f401378cd2bf5983ca01c64b92ec\
    f032ea15d1721d03f482d7ce6e74fef6d55e702f46980c82b5a84031900b1c9e\
    59e7c97fbec7e8f323a97a7e36cc88be0f1d45b7ff585ac54bd407b22b4154aa\
    cc8f6d7ebf48e1d814cc5ed20f8037e0a79715eef29be32806a1d58bb7c5da76\
    f550aa3d8a1fbff0eb19ccb1a313d55cda56c9ec2ef29632387fe8d76e3c0468\
    043e8f663f4860ee12bf2d5b0b7474d6e694f91e6dbe115974a3926f12fee5e4\
    38777cb6a932df8cd8bec4d073b931ba3bc832b68d9dd300741fa7bf8afc47ed\
    2576f6936ba424663aab639c5ae4f5683423b4742bf1c978238f16cbe39d652d\
    e3fdb8befc848ad922222e04a4037c0713eb57a81a23f0c73473fc646cea306b\
    4bcbc8862f8385ddfa9d4b7fa2c087e879683303ed5bdd3a062b3cf5b3a278a6\
    6d2a13f83f44f82ddf310ee074ab6a364597e899a0255dc164f31cc50846851d\
    f9ab48195ded7ea1b1d510bd7ee74d73faf36bc31ecfa268359046f4eb879f92\
    4009438b481c6cd7889a002ed5ee382bc9190da6fc026e479558e4475677e9aa\
    9e3050e2765694dfc81f56e880b96e7160c980dd98edd3dfffffffffffffffff";

const MODP_1024_160_P: &str = "b10b8f96a080e01dde92de5eae5d54ec52c99fbcfb06a3c69a6a9dca52d23b61\
    6073e28675a23d189838ef1e2ee652c013ecb4aea906112324975c3cd49b83bf\
    accbdd7d90c4bd7098488e9c219a73724effd6fae5644738faa31a4ff55bccc0\
    a151af5f0dc8b4bd45bf37df365c1a65e68cfda76d4da708df1fb2bc2e4a4371";
const MODP_1024_160_G: &str = "a4d1cbd5c3fd34126765a442efb99905f8104dd258ac507fd6406cff14266d31\
    266fea1e5c41564b777e690f5504f213160217b4b01b886a5e91547f9e2749f4\
    d7fbd7d3b9a92ee1909d0d2263f80a76a6a24c087a091f531dbf0a0169b6a28a\
    d662a4d18e73afa32d779d5918d08bc8858f4dcef97c2a24855e6eeb22b3b2e5";
const MODP_1024_160_Q: &str = "f518aa8781a8df278aba4e7d64b7cb9d49462353";

const MODP_2048_224_P: &str = "ad107e1e9123a9d0d660faa79559c51fa20d64e5683b9fd1b54b1597b61d0a75\
    e6fa141df95a56dbaf9a3c407ba1df15eb3d688a309c180e1de6b85a1274a0a6\
    6d3f8152ad6ac2129037c9edefda4df8d91e8fef55b7394b7ad5b7d0b6c12207\
    c9f98d11ed34dbf6c6ba0b2c8bbc27be6a00e0a0b9c49708b3bf8a3170918836\
    81286130bc8985db1602e714415d9330278273c7de31efdc7310f7121fd5a074\
    15987d9adc0a486dcdf93acc44328387315d75e198c641a480cd86a1b9e587e8\
    be60e69cc928b2b9c52172e413042e9b23f10b0e16e79763c9b53dcf4ba80a29\
    e3fb73c16b8e75b97ef363e2ffa31f71cf9de5384e71b81c0ac4dffe0c10e64f";
const MODP_2048_224_G: &str = "ac4032ef4f2d9ae39df30b5c8ffdac506cdebe7b89998caf74866a08cfe4ffe3\
    a6824a4e10b9a6f0dd921f01a70c4afaab739d7700c29f52c57db17c620a8652\
    be5e9001a8d66ad7c17669101999024af4d027275ac1348bb8a762d0521bc98a\
    e247150422ea1ed409939d54da7460cdb5f6c6b250717cbef180eb34118e98d1\
    19529a45d6f834566e3025e316a330efbb77a86f0c1ab15b051ae3d428c8f8ac\
    b70a8137150b8eeb10e183edd19963ddd9e263e4770589ef6aa21e7f5f2ff381\
    b539cce3409d13cd566afbb48d6c019181e1bcfe94b30269edfe72fe9b6aa4bd\
    7b5a0f1c71cfff4c19c418e1f6ec017981bc087f2a7065b384b890d3191f2bfa";
const MODP_2048_224_Q: &str = "801c0d34c58d93fe997177101f80535a4738cebcbf389a99b36371eb";

const MODP_2048_256_P: &str = "87a8e61db4b6663cffbbd19c651959998ceef608660dd0f25d2ceed4435e3b00\
    e00df8f1d61957d4faf7df4561b2aa3016c3d91134096faa3bf4296d830e9a7c\
    209e0c6497517abd5a8a9d306bcf67ed91f9e6725b4758c022e0b1ef4275bf7b\
    6c5bfc11d45f9088b941f54eb1e59bb8bc39a0bf12307f5c4fdb70c581b23f76\
    b63acae1caa6b7902d52526735488a0ef13c6d9a51bfa4ab3ad8347796524d8e\
    f6a167b5a41825d967e144e5140564251ccacb83e6b486f6b3ca3f7971506026\
    c0b857f689962856ded4010abd0be621c3a3960a54e710c375f26375d7014103\
    a4b54330c198af126116d2276e11715f693877fad7ef09cadb094ae91e1a1597";
const MODP_2048_256_G: &str = "3fb32c9b73134d0b2e77506660edbd484ca7b18f21ef205407f4793a1a0ba125\
    10dbc15077be463fff4fed4aac0bb555be3a6c1b0c6b47b1bc3773bf7e8c6f62\
    901228f8c28cbb18a55ae31341000a650196f931c77a57f2ddf463e5e9ec144b\
    777de62aaab8a8628ac376d282d6ed3864e67982428ebc831d14348f6f2f9193\
    b5045af2767164e1dfc967c1fb3f2e55a4bd1bffe83b9c80d052b985d182ea0a\
    db2a3b7313d3fe14c8484b1e052588b9b7d2bbd2df016199ecd06e1557cd0915\
    b3353bbb64e0ec377fd028370df92b52c7891428cdc67eb6184b523d1db246c3\
    2f63078490f00ef8d647d148d47954515e2327cfef98c582664b4c0f6cc41659";
const MODP_2048_256_Q: &str = "8cf83642a709a097b447997640129da299b1a47d1eb3750ba308b0fe64f5fbd3";
