//! secp256k1 unit tests

use super::*;
use crate::error::Error;
use rand::rngs::OsRng;
use rand::Rng;

fn fe_from_hex(s: &str) -> FieldElement {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hex::decode(s).unwrap());
    FieldElement::from_bytes(&bytes).unwrap()
}

/// n − 1, the largest valid scalar
const N_MINUS_1: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x40,
];

#[test]
fn test_field_arithmetic() {
    let one = FieldElement::one();
    let two = FieldElement::from_u32(2);

    // 1 + 1 = 2
    assert_eq!(one.add(&one), two);

    // 2 - 1 = 1
    assert_eq!(two.sub(&one), one);

    // 2 * 1 = 2
    assert_eq!(two.mul(&one), two);

    // 1 * 1^-1 = 1
    let inv_one = one.invert().unwrap();
    assert_eq!(one.mul(&inv_one), one);
}

#[test]
fn test_field_range_check() {
    // p - 1 is valid but p is not
    let p_minus_1_bytes: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
        0xFC, 0x2E,
    ];
    assert!(FieldElement::from_bytes(&p_minus_1_bytes).is_ok());

    let p_bytes: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
        0xFC, 0x2F,
    ];
    assert_eq!(
        FieldElement::from_bytes(&p_bytes),
        Err(Error::OutOfRange {
            context: "K256 FieldElement"
        })
    );
}

#[test]
fn test_field_parity() {
    assert!(FieldElement::one().is_odd());
    assert!(!FieldElement::from_u32(256).is_odd());
}

#[test]
fn test_field_bytes_roundtrip() {
    let mut rng = OsRng;
    for _ in 0..50 {
        let mut bytes = [0u8; 32];
        rng.fill(&mut bytes);
        if let Ok(fe) = FieldElement::from_bytes(&bytes) {
            assert_eq!(fe.to_bytes(), bytes);
        }
    }
}

#[test]
fn test_field_arithmetic_properties() {
    let mut rng = OsRng;

    for _ in 0..20 {
        let mut a_bytes = [0u8; 32];
        let mut b_bytes = [0u8; 32];
        let mut c_bytes = [0u8; 32];
        rng.fill(&mut a_bytes);
        rng.fill(&mut b_bytes);
        rng.fill(&mut c_bytes);

        if let (Ok(a), Ok(b), Ok(c)) = (
            FieldElement::from_bytes(&a_bytes),
            FieldElement::from_bytes(&b_bytes),
            FieldElement::from_bytes(&c_bytes),
        ) {
            // Commutativity: a + b = b + a
            assert_eq!(a.add(&b), b.add(&a), "Addition not commutative");

            // Associativity: (a + b) + c = a + (b + c)
            assert_eq!(
                a.add(&b).add(&c),
                a.add(&b.add(&c)),
                "Addition not associative"
            );

            // Commutativity: a * b = b * a
            assert_eq!(a.mul(&b), b.mul(&a), "Multiplication not commutative");

            // Associativity: (a * b) * c = a * (b * c)
            assert_eq!(
                a.mul(&b).mul(&c),
                a.mul(&b.mul(&c)),
                "Multiplication not associative"
            );

            // Distributivity: a * (b + c) = a * b + a * c
            assert_eq!(
                a.mul(&b.add(&c)),
                a.mul(&b).add(&a.mul(&c)),
                "Multiplication not distributive"
            );

            // Identity: a + 0 = a
            assert_eq!(
                a.add(&FieldElement::zero()),
                a,
                "Zero not additive identity"
            );

            // Identity: a * 1 = a
            assert_eq!(
                a.mul(&FieldElement::one()),
                a,
                "One not multiplicative identity"
            );

            // Inverse: a + (-a) = 0
            assert_eq!(a.add(&a.negate()), FieldElement::zero(), "Negation failed");

            // Inverse: a * a^-1 = 1 (if a != 0)
            if !a.is_zero() {
                let a_inv = a.invert().unwrap();
                assert_eq!(a.mul(&a_inv), FieldElement::one(), "Inversion failed");
            }
        }
    }
}

#[test]
fn test_field_invert_zero() {
    assert_eq!(FieldElement::zero().invert(), Err(Error::NotInvertible));
}

#[test]
fn test_field_sqrt_consistency() {
    let mut rng = OsRng;

    // sqrt(x^2) = ±x for random field elements
    for _ in 0..50 {
        let mut bytes = [0u8; 32];
        rng.fill(&mut bytes);

        if let Ok(x) = FieldElement::from_bytes(&bytes) {
            let x_squared = x.square();

            let sqrt_result = x_squared.sqrt().expect("square must have a root");
            assert!(
                sqrt_result == x || sqrt_result == x.negate(),
                "sqrt(x^2) should equal ±x"
            );
            assert_eq!(sqrt_result.square(), x_squared);
        }
    }
}

#[test]
fn test_field_sqrt_non_residue() {
    // p ≡ 3 (mod 4), so -1 is never a quadratic residue
    let minus_one = FieldElement::one().negate();
    assert!(minus_one.sqrt().is_none());
}

#[test]
fn test_scalar_strict_range() {
    // Zero is rejected
    assert!(Scalar::new([0; 32]).is_err());

    // Values >= n are rejected, not reduced
    assert!(Scalar::new([0xFF; 32]).is_err());

    let mut n_bytes = N_MINUS_1;
    n_bytes[31] = 0x41; // exactly n
    assert!(Scalar::new(n_bytes).is_err());

    // n - 1 is the largest accepted value
    assert!(Scalar::new(N_MINUS_1).is_ok());
}

#[test]
fn test_scalar_reduction() {
    // from_bytes_reduced maps n to zero and n + 1 to one
    let mut n_bytes = N_MINUS_1;
    n_bytes[31] = 0x41;
    assert!(Scalar::from_bytes_reduced(&n_bytes).is_zero());

    n_bytes[31] = 0x42;
    let one = Scalar::from_bytes_reduced(&n_bytes);
    let mut expected = [0u8; 32];
    expected[31] = 1;
    assert_eq!(one.serialize(), expected);

    // Values below n pass through untouched
    let reduced = Scalar::from_bytes_reduced(&N_MINUS_1);
    assert_eq!(reduced.serialize(), N_MINUS_1);
}

#[test]
fn test_scalar_arithmetic_mod_n() {
    let mut rng = OsRng;

    for _ in 0..10 {
        let mut a_bytes = [0u8; 32];
        let mut b_bytes = [0u8; 32];
        rng.fill(&mut a_bytes);
        rng.fill(&mut b_bytes);

        if let (Ok(a), Ok(b)) = (Scalar::new(a_bytes), Scalar::new(b_bytes)) {
            // a + (-a) = 0
            assert!(a.add_mod_n(&a.negate()).is_zero());

            // a * a^-1 = 1
            let a_inv = a.inv_mod_n().unwrap();
            let mut one = [0u8; 32];
            one[31] = 1;
            assert_eq!(a.mul_mod_n(&a_inv).serialize(), one);

            // Commutativity
            assert_eq!(
                a.add_mod_n(&b).serialize(),
                b.add_mod_n(&a).serialize(),
                "Scalar addition not commutative"
            );
            assert_eq!(
                a.mul_mod_n(&b).serialize(),
                b.mul_mod_n(&a).serialize(),
                "Scalar multiplication not commutative"
            );
        }
    }
}

#[test]
fn test_scalar_invert_zero() {
    let zero = Scalar::from_bytes_reduced(&[0u8; 32]);
    assert!(matches!(zero.inv_mod_n(), Err(Error::NotInvertible)));
}

#[test]
fn test_base_point_on_curve() {
    assert!(base_point_g().is_valid());
}

#[test]
fn test_double_g_known_vector() {
    let g2 = base_point_g().double().unwrap();
    let expected_x =
        fe_from_hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5");
    let expected_y =
        fe_from_hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a");
    assert_eq!(g2.x_coordinate_bytes(), expected_x.to_bytes());
    assert_eq!(g2.y_coordinate_bytes(), expected_y.to_bytes());
}

#[test]
fn test_point_addition_matches_double() {
    let g = base_point_g();
    assert_eq!(g.add(&g).unwrap(), g.double().unwrap());
}

#[test]
fn test_inverse_points_reject_infinity() {
    let g = base_point_g();
    let neg_g = g.negate();
    assert_eq!(g.add(&neg_g), Err(Error::UnsupportedInfinity));
}

#[test]
fn test_zero_scalar_rejects_infinity() {
    let g = base_point_g();
    let zero = Scalar::from_bytes_reduced(&[0u8; 32]);
    assert_eq!(g.mul(&zero), Err(Error::UnsupportedInfinity));
}

#[test]
fn test_scalar_multiplication() {
    let g = base_point_g();

    let mut two_bytes = [0; 32];
    two_bytes[31] = 2;
    let two = Scalar::new(two_bytes).unwrap();

    let g2 = g.mul(&two).unwrap();
    assert_eq!(g2, g.double().unwrap());
}

#[test]
fn test_order_minus_one_gives_negated_g() {
    // (n-1)·G = -G since n·G would be the identity
    let g = base_point_g();
    let n_minus_1 = Scalar::new(N_MINUS_1).unwrap();
    let p = g.mul(&n_minus_1).unwrap();
    assert_eq!(p, g.negate());
}

#[test]
fn test_scalar_mult_distributes_over_add() {
    let mut rng = OsRng;
    let g = base_point_g();

    for _ in 0..10 {
        let mut a_bytes = [0u8; 32];
        let mut b_bytes = [0u8; 32];
        rng.fill(&mut a_bytes);
        rng.fill(&mut b_bytes);

        if let (Ok(a), Ok(b)) = (Scalar::new(a_bytes), Scalar::new(b_bytes)) {
            let sum = a.add_mod_n(&b);
            if sum.is_zero() {
                continue;
            }
            let lhs = g.mul(&sum).unwrap();
            let rhs = g.mul(&a).unwrap().add(&g.mul(&b).unwrap()).unwrap();
            assert_eq!(lhs, rhs, "(a+b)G should equal aG + bG");
        }
    }
}

#[test]
fn test_point_group_associativity() {
    let mut rng = OsRng;
    let g = base_point_g();

    for _ in 0..10 {
        let mut s1_bytes = [0u8; 32];
        let mut s2_bytes = [0u8; 32];
        let mut s3_bytes = [0u8; 32];
        rng.fill(&mut s1_bytes);
        rng.fill(&mut s2_bytes);
        rng.fill(&mut s3_bytes);

        if let (Ok(s1), Ok(s2), Ok(s3)) = (
            Scalar::new(s1_bytes),
            Scalar::new(s2_bytes),
            Scalar::new(s3_bytes),
        ) {
            let p = g.mul(&s1).unwrap();
            let q = g.mul(&s2).unwrap();
            let r = g.mul(&s3).unwrap();

            let lhs = p.add(&q).unwrap().add(&r).unwrap();
            let rhs = p.add(&q.add(&r).unwrap()).unwrap();

            assert_eq!(lhs, rhs, "Point addition not associative");
        }
    }
}

#[test]
fn test_point_compression_roundtrip() {
    let g = base_point_g();
    let compressed = g.serialize_compressed();
    assert_eq!(compressed[0], 0x02); // G has an even y
    let decompressed = Point::deserialize_compressed(&compressed).unwrap();
    assert_eq!(g, decompressed);

    let g2 = g.double().unwrap();
    let compressed2 = g2.serialize_compressed();
    let decompressed2 = Point::deserialize_compressed(&compressed2).unwrap();
    assert_eq!(g2, decompressed2);
}

#[test]
fn test_point_compression_property() {
    let mut rng = OsRng;

    for _ in 0..100 {
        let mut scalar_bytes = [0u8; 32];
        rng.fill(&mut scalar_bytes);

        // Skip if scalar is zero or >= order
        if let Ok(scalar) = Scalar::new(scalar_bytes) {
            let point = base_point_g().mul(&scalar).unwrap();

            let compressed = point.serialize_compressed();
            let decompressed = Point::deserialize_compressed(&compressed).unwrap();

            assert_eq!(point, decompressed, "Compression round-trip failed");
        }
    }
}

#[test]
fn test_uncompressed_roundtrip() {
    let g2 = base_point_g().double().unwrap();
    let ser = g2.serialize_uncompressed();
    assert_eq!(ser[0], 0x04);
    let de = Point::deserialize_uncompressed(&ser).unwrap();
    assert_eq!(g2, de);
}

#[test]
fn test_point_codec_rejects_garbage() {
    // Wrong lengths
    assert!(matches!(
        Point::deserialize_compressed(&[0x02; 5]),
        Err(Error::Length { .. })
    ));
    assert!(matches!(
        Point::deserialize_uncompressed(&[0x04; 64]),
        Err(Error::Length { .. })
    ));

    // Bad prefix bytes
    let g = base_point_g();
    let mut compressed = g.serialize_compressed();
    compressed[0] = 0x05;
    assert!(matches!(
        Point::deserialize_compressed(&compressed),
        Err(Error::MalformedEncoding { .. })
    ));

    let mut uncompressed = g.serialize_uncompressed();
    uncompressed[0] = 0x02;
    assert!(matches!(
        Point::deserialize_uncompressed(&uncompressed),
        Err(Error::MalformedEncoding { .. })
    ));
}

#[test]
fn test_compressed_off_curve_x() {
    // Find an x with no point on the curve; roughly half of all x fail
    let mut encoding = [0u8; 33];
    encoding[0] = 0x02;
    let mut found = false;
    for x in 1u8..=20 {
        encoding[32] = x;
        match Point::deserialize_compressed(&encoding) {
            Err(Error::NoSquareRoot) => {
                found = true;
                break;
            }
            _ => continue,
        }
    }
    assert!(found, "expected an off-curve x below 21");
}

#[test]
fn test_off_curve_coordinates_rejected() {
    let g = base_point_g();
    let x = g.x_coordinate_bytes();
    let mut y = g.y_coordinate_bytes();
    y[31] ^= 1;
    assert!(matches!(
        Point::new_uncompressed(&x, &y),
        Err(Error::MalformedEncoding { .. })
    ));
}
