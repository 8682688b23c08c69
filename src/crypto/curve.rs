use std::fmt::Debug;
use group::ff::PrimeField;
use group::Group;

/// A 32-byte big-endian unsigned integer, the unit of the ledger ABI (`uint256`).
pub type Word = [u8; 32];

/// Group arithmetic consumed by the protocol: a prime-order curve group together with the
/// canonical coordinate and scalar encodings that the Fiat-Shamir hash and the ledger rely on.
///
/// Every encoding is big-endian and exactly one word wide, so both supported curves must have
/// 256-bit base fields and 256-bit group orders.
pub trait ElectionCurve: Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    type Scalar: PrimeField;
    type Point: Group<Scalar = Self::Scalar>;

    /// Standard name of the curve, as used in configuration files.
    const NAME: &'static str;

    /// Affine (x, y) of a point, `None` for the point at infinity.
    fn coordinates(point: &Self::Point) -> Option<(Word, Word)>;

    /// Decodes affine coordinates. `(0, 0)` is the identity; anything off the curve is `None`.
    fn from_coordinates(x: &Word, y: &Word) -> Option<Self::Point>;

    fn scalar_to_word(scalar: &Self::Scalar) -> Word;

    /// Strict decoding, values `>= n` are rejected.
    fn scalar_from_word(word: &Word) -> Option<Self::Scalar>;

    /// Interprets the word as an integer and reduces it modulo the group order.
    fn reduce_word(word: &Word) -> Self::Scalar;

    /// Coordinates as they appear on the wire, identity encoded as two zero words.
    fn point_to_words(point: &Self::Point) -> [Word; 2] {
        match Self::coordinates(point) {
            Some((x, y)) => [x, y],
            None => [[0u8; 32]; 2],
        }
    }
}

fn to_word(bytes: &[u8]) -> Word {
    let mut word = [0u8; 32];
    word.copy_from_slice(bytes);
    word
}

fn is_zero_word(word: &Word) -> bool {
    word.iter().all(|b| *b == 0)
}

macro_rules! impl_election_curve {
    ($curve:ident, $krate:ident, $name:literal) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $curve;

        impl ElectionCurve for $curve {
            type Scalar = $krate::Scalar;
            type Point = $krate::ProjectivePoint;

            const NAME: &'static str = $name;

            fn coordinates(point: &Self::Point) -> Option<(Word, Word)> {
                use $krate::elliptic_curve::sec1::ToEncodedPoint;

                let encoded = group::Curve::to_affine(point).to_encoded_point(false);
                Some((to_word(encoded.x()?), to_word(encoded.y()?)))
            }

            fn from_coordinates(x: &Word, y: &Word) -> Option<Self::Point> {
                use $krate::elliptic_curve::sec1::FromEncodedPoint;

                if is_zero_word(x) && is_zero_word(y) {
                    return Some(<Self::Point as Group>::identity());
                }
                let encoded = $krate::EncodedPoint::from_affine_coordinates(
                    $krate::FieldBytes::from_slice(x),
                    $krate::FieldBytes::from_slice(y),
                    false,
                );
                Option::<$krate::AffinePoint>::from($krate::AffinePoint::from_encoded_point(&encoded))
                    .map($krate::ProjectivePoint::from)
            }

            fn scalar_to_word(scalar: &Self::Scalar) -> Word {
                to_word(&scalar.to_repr())
            }

            fn scalar_from_word(word: &Word) -> Option<Self::Scalar> {
                Option::from($krate::Scalar::from_repr(*$krate::FieldBytes::from_slice(word)))
            }

            fn reduce_word(word: &Word) -> Self::Scalar {
                use $krate::elliptic_curve::bigint::U256;
                use $krate::elliptic_curve::ops::Reduce;

                <$krate::Scalar as Reduce<U256>>::reduce_bytes($krate::FieldBytes::from_slice(word))
            }
        }
    };
}

// NIST P-256, the curve the deployed election contract verifies against.
impl_election_curve!(Secp256r1, p256, "secp256r1");
impl_election_curve!(Secp256k1, k256, "secp256k1");

#[cfg(test)]
mod test {
    use super::*;
    use rand::thread_rng;
    use group::ff::Field;

    // n - 1 for secp256r1
    const P256_ORDER_MINUS_ONE: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632550";
    const P256_ORDER: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

    fn word(hex_str: &str) -> Word {
        let mut out = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut out).unwrap();
        out
    }

    #[test]
    fn generator_has_standard_coordinates() {
        let (x, y) = Secp256r1::coordinates(&p256::ProjectivePoint::generator()).unwrap();
        assert_eq!(hex::encode(x), "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");
        assert_eq!(hex::encode(y), "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");
    }

    #[test]
    fn identity_has_no_coordinates() {
        let identity = p256::ProjectivePoint::identity();
        assert!(Secp256r1::coordinates(&identity).is_none());
        assert_eq!(Secp256r1::point_to_words(&identity), [[0u8; 32]; 2]);
        assert_eq!(Secp256r1::from_coordinates(&[0u8; 32], &[0u8; 32]), Some(identity));
    }

    #[test]
    fn coordinates_decode_to_same_point() {
        let point = p256::ProjectivePoint::random(&mut thread_rng());
        let [x, y] = Secp256r1::point_to_words(&point);
        assert_eq!(Secp256r1::from_coordinates(&x, &y), Some(point));

        let point = k256::ProjectivePoint::random(&mut thread_rng());
        let [x, y] = Secp256k1::point_to_words(&point);
        assert_eq!(Secp256k1::from_coordinates(&x, &y), Some(point));
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let [x, mut y] = Secp256r1::point_to_words(&p256::ProjectivePoint::generator());
        y[31] ^= 1;
        assert!(Secp256r1::from_coordinates(&x, &y).is_none());
    }

    #[test]
    fn scalar_decoding_is_strict_and_reduction_is_not() {
        let max = Secp256r1::scalar_from_word(&word(P256_ORDER_MINUS_ONE)).unwrap();
        assert_eq!(max, -p256::Scalar::ONE);
        assert!(Secp256r1::scalar_from_word(&word(P256_ORDER)).is_none());
        assert_eq!(Secp256r1::reduce_word(&word(P256_ORDER)), p256::Scalar::ZERO);

        let scalar = p256::Scalar::random(&mut thread_rng());
        let encoded = Secp256r1::scalar_to_word(&scalar);
        assert_eq!(Secp256r1::scalar_from_word(&encoded), Some(scalar));
        assert_eq!(Secp256r1::reduce_word(&encoded), scalar);
    }
}
