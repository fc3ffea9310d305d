// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

mod common;

use common::{init_tracing, unhex};
use ike_dh::groups::ModpParams;
use ike_dh::{Error, GroupInstance};

fn assert_rejected(instance: &GroupInstance, peer: &[u8]) {
    match instance.derive_shared(peer) {
        Err(Error::InvalidPeerValue(_)) => {}
        other => panic!(
            "group {}: expected InvalidPeerValue, got {:?}",
            instance.id(),
            other
        ),
    }
}

#[test]
fn test_modp_rejects_out_of_range() {
    init_tracing();
    let instance = GroupInstance::create(2).unwrap();
    let len = instance.encoded_length();

    let zero = vec![0u8; len];
    let mut one = vec![0u8; len];
    one[len - 1] = 1;
    let all_ones = vec![0xffu8; len];
    assert_rejected(&instance, &zero);
    assert_rejected(&instance, &one);
    assert_rejected(&instance, &all_ones);

    let p = ModpParams::from_spec(instance.spec()).unwrap().modulus().clone();
    let p_minus_1 = (&p - 1u32).to_bytes_be();
    assert_rejected(&instance, &p.to_bytes_be());
    assert_rejected(&instance, &p_minus_1);

    let p_minus_2 = (&p - 2u32).to_bytes_be();
    assert_eq!(instance.derive_shared(&p_minus_2).unwrap().len(), len);
}

#[test]
fn test_modp_rejects_wrong_length() {
    let instance = GroupInstance::create(14).unwrap();
    let peer = GroupInstance::create(14)
        .unwrap()
        .produce_exchange_value()
        .unwrap();
    assert_rejected(&instance, &peer[1..]);
    let mut long = peer.to_vec();
    long.insert(0, 0);
    assert_rejected(&instance, &long);
    assert_rejected(&instance, &[]);
}

#[test]
fn test_modp_subgroup_confinement() {
    init_tracing();
    for id in [22u32, 23, 24] {
        let instance = GroupInstance::create(id).unwrap();
        let mut two = vec![0u8; instance.encoded_length()];
        *two.last_mut().unwrap() = 2;
        assert_rejected(&instance, &two);
    }
}

#[test]
fn test_ec_rejects_identity_encoding() {
    init_tracing();
    for id in [3u32, 19, 25, 28] {
        let instance = GroupInstance::create(id).unwrap();
        assert_rejected(&instance, &vec![0u8; instance.encoded_length()]);
    }
}

#[test]
fn test_ec_rejects_off_curve() {
    for id in [4u32, 20, 21, 26, 27, 29] {
        let instance = GroupInstance::create(id).unwrap();
        let mut peer = GroupInstance::create(id)
            .unwrap()
            .produce_exchange_value()
            .unwrap()
            .to_vec();
        let last = peer.len() - 1;
        peer[last] ^= 0x02;
        assert_rejected(&instance, &peer);
    }
}

#[test]
fn test_ec_rejects_coordinate_outside_field() {
    // x = 2^256 - 1 is larger than the P-256 prime
    let instance = GroupInstance::create(19).unwrap();
    let mut peer = vec![0xffu8; 32];
    peer.extend_from_slice(&[0x01; 32]);
    assert_rejected(&instance, &peer);
}

#[test]
fn test_ec2n_rejects_point_outside_subgroup() {
    init_tracing();
    // Valid curve points whose order does not divide the generator's order
    let cases = [
        (
            3u32,
            "03931316fb3ee10a8a153c8380b0b8af94b4f6c70014d14c3e11ad571cac4c6f15b55588865359bd",
        ),
        (
            4u32,
            "00bec7cf79e3a92c7c40c7c997af687dddaef2fa4c7b2f39016e6f96cadf413a119980d8b964323c30f7f23fe7db1bf1",
        ),
    ];
    for (id, point) in cases {
        let instance = GroupInstance::create(id).unwrap();
        assert_rejected(&instance, &unhex(point));
    }
}

#[test]
fn test_ec2n_rejects_small_order_points() {
    init_tracing();
    // (0, sqrt(b)) has order 2 on both curves; the third point has order 4
    let cases = [
        (
            3u32,
            "00000000000000000000000000000000000000000015b000002b60000056c00000ad8000015b0353",
        ),
        (
            4u32,
            "000000000000000000000000000000000000000000000000000000000000000000000007c0000000000001f000000069",
        ),
        (
            3u32,
            "00311000000223a000c4474000088e8000111d1d0024a000002943a00092874000a50e80014a1e4e",
        ),
    ];
    for (id, point) in cases {
        let instance = GroupInstance::create(id).unwrap();
        assert_rejected(&instance, &unhex(point));
    }
}

#[test]
fn test_ec_wrong_length() {
    let instance = GroupInstance::create(21).unwrap();
    let peer = GroupInstance::create(21)
        .unwrap()
        .produce_exchange_value()
        .unwrap();
    assert_rejected(&instance, &peer[..131]);
    assert_rejected(&instance, &peer[..66]);
}

#[test]
fn test_curve25519_accepts_arbitrary_bytes() {
    let instance = GroupInstance::create(1034).unwrap();
    let shared = instance.derive_shared(&[0x5a; 32]).unwrap();
    assert_eq!(shared.len(), 32);
    assert_rejected(&instance, &[0x5a; 31]);
}
