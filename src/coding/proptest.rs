//! Property-based tests for field arithmetic and Reed-Solomon coding
//!
//! 1. **Field identities**: exp/log and inverses agree for every nonzero element
//! 2. **Multiplication**: Karatsuba matches the schoolbook product
//! 3. **Interpolation**: evaluating then interpolating returns the polynomial
//! 4. **Correction**: any errata pattern within budget is repaired
//! 5. **Over budget**: too many errors never decode to the original data

#![cfg(test)]

use proptest::prelude::*;

use super::galois::GaloisField;
use super::reed_solomon::ReedSolomonCoder;

/// Block shapes over GF(256): k data symbols, nsym parity symbols
fn rs_shape_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=40, 2usize..=24)
}

fn poly_strategy(max_len: usize) -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..256, 1..max_len)
}

/// Distinct positions in 0..n, at most `count` of them
fn positions(n: usize, count: usize, seed: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(count);
    for &s in seed {
        if out.len() == count {
            break;
        }
        let mut pos = s % n;
        while out.contains(&pos) {
            pos = (pos + 1) % n;
        }
        out.push(pos);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_field_identities(m in 3u32..=12) {
        let gf = GaloisField::with_degree(m).unwrap();
        for a in 1..=gf.element_count() as u16 {
            prop_assert_eq!(gf.exp(gf.log(a).unwrap()), a);
            prop_assert_eq!(gf.mul(a, gf.inverse(a).unwrap()), 1);
            prop_assert_eq!(gf.div(a, a).unwrap(), 1);
        }
    }

    #[test]
    fn prop_karatsuba_matches_schoolbook(a in poly_strategy(60), b in poly_strategy(60)) {
        let gf = GaloisField::qr();
        prop_assert_eq!(gf.poly_mul(&a, &b), gf.poly_mul_schoolbook(&a, &b));
    }

    #[test]
    fn prop_interpolation_recovers_polynomial(
        poly in poly_strategy(16),
        start in 1u16..200,
    ) {
        let gf = GaloisField::qr();
        let points: Vec<(u16, u16)> = (0..poly.len() as u16)
            .map(|i| start + i)
            .map(|x| (x, gf.poly_eval(&poly, x)))
            .collect();
        prop_assert_eq!(gf.poly_interpolation(&points).unwrap(), poly);
    }

    #[test]
    fn prop_decode_within_budget(
        (k, nsym) in rs_shape_strategy(),
        data in prop::collection::vec(0u16..256, 40),
        seed in prop::collection::vec(0usize..1000, 24),
        values in prop::collection::vec(1u16..256, 24),
        erasure_share in 0usize..=100,
    ) {
        let rs = ReedSolomonCoder::qr(k, k + nsym).unwrap();
        let data = &data[..k];
        let codeword = rs.encode_systematic(data).unwrap();

        // erasures + 2 * errors <= nsym
        let erasure_count = nsym * erasure_share / 100;
        let error_count = (nsym - erasure_count) / 2;
        let hit = positions(rs.n(), erasure_count + error_count, &seed);
        let (erasures, errors) = hit.split_at(erasure_count.min(hit.len()));

        let mut received = codeword.clone();
        for (i, &pos) in erasures.iter().chain(errors).enumerate() {
            received[pos] ^= values[i];
        }
        let decoded = rs.decode_block(&received, erasures).unwrap();
        prop_assert_eq!(decoded, data.to_vec());
    }

    #[test]
    fn prop_over_budget_never_returns_original(
        k in 1usize..=30,
        nsym in 2usize..=16,
        data in prop::collection::vec(0u16..256, 30),
        seed in prop::collection::vec(0usize..1000, 46),
        values in prop::collection::vec(1u16..256, 46),
    ) {
        let rs = ReedSolomonCoder::qr(k, k + nsym).unwrap();
        let data = &data[..k];
        let mut received = rs.encode_systematic(data).unwrap();

        let error_count = (nsym / 2 + 1).min(rs.n());
        for (i, pos) in positions(rs.n(), error_count, &seed).into_iter().enumerate() {
            received[pos] ^= values[i];
        }
        match rs.decode_block(&received, &[]) {
            Ok(decoded) => prop_assert_ne!(decoded, data.to_vec()),
            Err(_) => {}
        }
    }
}
