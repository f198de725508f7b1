//! GF(2^m) arithmetic over log/antilog tables, plus the polynomial
//! operations used by Reed-Solomon coding.
//!
//! Field elements are `u16` values in `0..=element_count`. Polynomials are
//! coefficient slices, most significant coefficient first.

use crate::error::{Error, Result};
use std::sync::{Arc, OnceLock};

/// x^8 + x^4 + x^3 + x^2 + 1, the QR code field polynomial
pub const QR_PRIMITIVE_POLY: u32 = 285;

/// A primitive polynomial for each supported degree, indexed by degree
pub const PRIMITIVE_POLYNOMIALS: [u32; 17] = [
    0, 0, 7, 11, 19, 37, 67, 137, 285, 529, 1033, 2053, 4179, 8219, 17475, 32771, 69643,
];

/// Polynomials shorter than this on either side are multiplied schoolbook-style
const KARATSUBA_THRESHOLD: usize = 7;

/// Binary extension field GF(2^m)
#[derive(Debug, Clone)]
pub struct GaloisField {
    primitive_poly: u32,
    degree: u32,
    element_count: usize,
    exp_table: Vec<u16>,
    log_table: Vec<u16>,
}

impl GaloisField {
    /// Build the field defined by `primitive_poly`
    ///
    /// The degree is taken from the polynomial's highest set bit. Fails if the
    /// degree is outside 2..=16 or if x does not generate the whole
    /// multiplicative group.
    pub fn new(primitive_poly: u32) -> Result<Self> {
        let degree = (32 - primitive_poly.leading_zeros()).saturating_sub(1);
        if !(2..=16).contains(&degree) {
            return Err(Error::InvalidParameters(format!(
                "field polynomial {} has degree {}, expected 2..=16",
                primitive_poly, degree
            )));
        }
        let field = Self::build(primitive_poly, degree);

        let mut seen = vec![false; field.element_count + 1];
        for &e in &field.exp_table {
            if e == 0 || seen[e as usize] {
                return Err(Error::InvalidParameters(format!(
                    "polynomial {} is not primitive",
                    primitive_poly
                )));
            }
            seen[e as usize] = true;
        }
        Ok(field)
    }

    /// Field built from the default primitive polynomial of degree `m`
    pub fn with_degree(m: u32) -> Result<Self> {
        match PRIMITIVE_POLYNOMIALS.get(m as usize) {
            Some(&poly) if poly != 0 => Self::new(poly),
            _ => Err(Error::InvalidParameters(format!(
                "no default polynomial for degree {}",
                m
            ))),
        }
    }

    /// Shared GF(256) instance used by QR codes
    pub fn qr() -> Arc<GaloisField> {
        static QR_FIELD: OnceLock<Arc<GaloisField>> = OnceLock::new();
        QR_FIELD
            .get_or_init(|| Arc::new(Self::build(QR_PRIMITIVE_POLY, 8)))
            .clone()
    }

    fn build(primitive_poly: u32, degree: u32) -> Self {
        let element_count = (1usize << degree) - 1;
        let mut exp_table = vec![0u16; element_count];
        let mut log_table = vec![0u16; element_count + 1];
        let overflow = 1u32 << degree;

        let mut x = 1u32;
        for (i, slot) in exp_table.iter_mut().enumerate() {
            *slot = x as u16;
            log_table[x as usize] = i as u16;
            x <<= 1;
            if x & overflow != 0 {
                x ^= primitive_poly;
            }
        }

        Self {
            primitive_poly,
            degree,
            element_count,
            exp_table,
            log_table,
        }
    }

    /// Polynomial the field was built from
    pub fn primitive_poly(&self) -> u32 {
        self.primitive_poly
    }

    /// Extension degree m
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Size of the multiplicative group, 2^m - 1
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// True if `a` is an element of this field
    pub fn contains(&self, a: u16) -> bool {
        (a as usize) <= self.element_count
    }

    /// Domain error for the first symbol that is not a field element
    pub fn check_elements(&self, symbols: &[u16]) -> Result<()> {
        if symbols.iter().all(|&a| self.contains(a)) {
            Ok(())
        } else {
            Err(Error::Domain("symbol outside the field"))
        }
    }

    /// Field addition (XOR)
    pub fn add(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    /// Field multiplication
    ///
    /// Both operands must be field elements (see [`GaloisField::contains`]);
    /// table lookups panic otherwise. Checked entry points such as
    /// [`ReedSolomonCoder`](crate::ReedSolomonCoder) validate symbols first.
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        let power = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[power % self.element_count]
    }

    /// Field division; fails when `b` is zero
    pub fn div(&self, a: u16, b: u16) -> Result<u16> {
        if b == 0 {
            return Err(Error::Domain("division by zero"));
        }
        if !self.contains(a) || !self.contains(b) {
            return Err(Error::Domain("symbol outside the field"));
        }
        if a == 0 {
            return Ok(0);
        }
        let log_a = self.log_table[a as usize] as usize;
        let log_b = self.log_table[b as usize] as usize;
        Ok(self.exp_table[(log_a + self.element_count - log_b) % self.element_count])
    }

    /// alpha^power, reduced modulo the group order
    pub fn exp(&self, power: usize) -> u16 {
        self.exp_table[power % self.element_count]
    }

    /// Discrete logarithm base alpha; fails for zero
    pub fn log(&self, a: u16) -> Result<usize> {
        if a == 0 {
            return Err(Error::Domain("logarithm of zero"));
        }
        if !self.contains(a) {
            return Err(Error::Domain("symbol outside the field"));
        }
        Ok(self.log_table[a as usize] as usize)
    }

    /// Multiplicative inverse; fails for zero
    pub fn inverse(&self, a: u16) -> Result<u16> {
        if a == 0 {
            return Err(Error::Domain("inverse of zero"));
        }
        if !self.contains(a) {
            return Err(Error::Domain("symbol outside the field"));
        }
        let log_a = self.log_table[a as usize] as usize;
        Ok(self.exp_table[(self.element_count - log_a) % self.element_count])
    }

    /// Sum of two polynomials, shorter operand right-aligned
    pub fn poly_add(&self, a: &[u16], b: &[u16]) -> Vec<u16> {
        let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        let offset = long.len() - short.len();
        let mut res = long.to_vec();
        for (i, &coeff) in short.iter().enumerate() {
            res[offset + i] ^= coeff;
        }
        res
    }

    /// Multiply every coefficient by the scalar `x`
    pub fn poly_scale(&self, a: &[u16], x: u16) -> Vec<u16> {
        a.iter().map(|&coeff| self.mul(coeff, x)).collect()
    }

    /// Product of two polynomials
    ///
    /// Uses Karatsuba splitting once both operands reach the threshold length;
    /// the result is identical to [`GaloisField::poly_mul_schoolbook`].
    pub fn poly_mul(&self, a: &[u16], b: &[u16]) -> Vec<u16> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }
        if a.len() < KARATSUBA_THRESHOLD || b.len() < KARATSUBA_THRESHOLD {
            return self.poly_mul_schoolbook(a, b);
        }
        // Karatsuba splits on the low-order end, so work on reversed copies.
        let a_rev: Vec<u16> = a.iter().rev().copied().collect();
        let b_rev: Vec<u16> = b.iter().rev().copied().collect();
        let mut res = self.karatsuba_low_first(&a_rev, &b_rev);
        res.reverse();
        res
    }

    /// Quadratic-time product, the reference for [`GaloisField::poly_mul`]
    pub fn poly_mul_schoolbook(&self, a: &[u16], b: &[u16]) -> Vec<u16> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }
        let mut res = vec![0u16; a.len() + b.len() - 1];
        for (i, &ai) in a.iter().enumerate() {
            if ai == 0 {
                continue;
            }
            for (j, &bj) in b.iter().enumerate() {
                res[i + j] ^= self.mul(ai, bj);
            }
        }
        res
    }

    // Operands and result are least significant coefficient first.
    fn karatsuba_low_first(&self, a: &[u16], b: &[u16]) -> Vec<u16> {
        if a.len() < KARATSUBA_THRESHOLD || b.len() < KARATSUBA_THRESHOLD {
            return self.poly_mul_schoolbook(a, b);
        }
        let half = a.len().min(b.len()) / 2;
        let (a0, a1) = a.split_at(half);
        let (b0, b1) = b.split_at(half);

        let z0 = self.karatsuba_low_first(a0, b0);
        let z2 = self.karatsuba_low_first(a1, b1);
        let mut z1 = self.karatsuba_low_first(&xor_low_first(a0, a1), &xor_low_first(b0, b1));
        for (i, &c) in z0.iter().enumerate() {
            z1[i] ^= c;
        }
        for (i, &c) in z2.iter().enumerate() {
            z1[i] ^= c;
        }

        let mut res = vec![0u16; a.len() + b.len() - 1];
        for (i, &c) in z0.iter().enumerate() {
            res[i] ^= c;
        }
        for (i, &c) in z1.iter().enumerate() {
            res[half + i] ^= c;
        }
        for (i, &c) in z2.iter().enumerate() {
            res[2 * half + i] ^= c;
        }
        res
    }

    /// Remainder of `a` divided by `b`, always `b.len() - 1` coefficients
    pub fn poly_mod(&self, a: &[u16], b: &[u16]) -> Result<Vec<u16>> {
        let lead = match b.first() {
            Some(&lead) => lead,
            None => return Err(Error::Domain("division by empty polynomial")),
        };
        let lead_inv = self.inverse(lead)?;
        let rem_len = b.len() - 1;

        if a.len() < b.len() {
            let mut res = vec![0u16; rem_len - a.len()];
            res.extend_from_slice(a);
            return Ok(res);
        }

        let mut res = a.to_vec();
        for i in 0..=(a.len() - b.len()) {
            let coeff = res[i];
            if coeff == 0 {
                continue;
            }
            let factor = self.mul(coeff, lead_inv);
            for (j, &bj) in b.iter().enumerate() {
                res[i + j] ^= self.mul(factor, bj);
            }
        }
        Ok(res.split_off(a.len() - rem_len))
    }

    /// Evaluate a polynomial at `x` by Horner's scheme
    pub fn poly_eval(&self, poly: &[u16], x: u16) -> u16 {
        poly.iter().fold(0, |acc, &coeff| self.mul(acc, x) ^ coeff)
    }

    /// Lagrange interpolation through `(x, y)` points
    ///
    /// Returns a polynomial with `points.len()` coefficients. Repeated x
    /// values make the basis undefined and fail with a domain error.
    pub fn poly_interpolation(&self, points: &[(u16, u16)]) -> Result<Vec<u16>> {
        let mut interpolation = vec![0u16];
        for (i, &(xi, yi)) in points.iter().enumerate() {
            let mut part = vec![yi];
            for (j, &(xj, _)) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                part = self.poly_mul(&[1, xj], &part);
                let denom = self.inverse(xi ^ xj)?;
                part = self.poly_scale(&part, denom);
            }
            interpolation = self.poly_add(&interpolation, &part);
        }
        Ok(interpolation)
    }
}

fn xor_low_first(a: &[u16], b: &[u16]) -> Vec<u16> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut res = long.to_vec();
    for (i, &c) in short.iter().enumerate() {
        res[i] ^= c;
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf256() -> GaloisField {
        GaloisField::new(QR_PRIMITIVE_POLY).unwrap()
    }

    #[test]
    fn test_tables_match_qr_field() {
        let gf = gf256();
        assert_eq!(gf.element_count(), 255);
        assert_eq!(gf.degree(), 8);
        assert_eq!(gf.exp(0), 1);
        assert_eq!(gf.exp(8), 29);
        assert_eq!(gf.exp(255), 1);
        assert_eq!(gf.log(2).unwrap(), 1);
        assert_eq!(gf.log(29).unwrap(), 8);
    }

    #[test]
    fn test_zero_is_a_domain_error() {
        let gf = gf256();
        assert!(matches!(gf.log(0), Err(Error::Domain(_))));
        assert!(matches!(gf.inverse(0), Err(Error::Domain(_))));
        assert!(matches!(gf.div(5, 0), Err(Error::Domain(_))));
        assert_eq!(gf.div(0, 5).unwrap(), 0);
    }

    #[test]
    fn test_inverse_and_div() {
        let gf = gf256();
        for x in 1..=255u16 {
            assert_eq!(gf.mul(x, gf.inverse(x).unwrap()), 1);
            assert_eq!(gf.div(x, x).unwrap(), 1);
        }
        assert_eq!(gf.div(gf.mul(7, 9), 9).unwrap(), 7);
    }

    #[test]
    fn test_non_primitive_rejected() {
        // x^8 + 1 is reducible
        assert!(GaloisField::new(257).is_err());
        // x^4 + x^3 + x^2 + x + 1 is irreducible but x has order 5
        assert!(GaloisField::new(31).is_err());
        assert!(GaloisField::new(1).is_err());
    }

    #[test]
    fn test_default_polynomials_are_primitive() {
        for m in 2..=12 {
            let gf = GaloisField::with_degree(m).unwrap();
            assert_eq!(gf.element_count(), (1usize << m) - 1);
        }
        assert!(GaloisField::with_degree(1).is_err());
        assert!(GaloisField::with_degree(17).is_err());
    }

    #[test]
    fn test_out_of_field_symbols_rejected() {
        let gf = gf256();
        assert!(gf.contains(255));
        assert!(!gf.contains(300));
        assert!(matches!(gf.log(300), Err(Error::Domain(_))));
        assert!(matches!(gf.inverse(256), Err(Error::Domain(_))));
        assert!(matches!(gf.div(300, 3), Err(Error::Domain(_))));
        assert!(gf.check_elements(&[0, 1, 255]).is_ok());
        assert!(matches!(gf.check_elements(&[1, 300]), Err(Error::Domain(_))));

        let gf8 = GaloisField::with_degree(3).unwrap();
        assert!(gf8.contains(7));
        assert!(!gf8.contains(9));
        assert!(matches!(gf8.div(3, 9), Err(Error::Domain(_))));
        assert!(matches!(gf8.log(9), Err(Error::Domain(_))));
    }

    #[test]
    fn test_poly_add_right_aligned() {
        let gf = gf256();
        assert_eq!(gf.poly_add(&[1, 2, 3], &[4, 5]), vec![1, 6, 6]);
        assert_eq!(gf.poly_add(&[4], &[1, 2, 3]), vec![1, 2, 7]);
    }

    #[test]
    fn test_poly_mul_small() {
        let gf = gf256();
        // (x + 1)(x + 1) = x^2 + 1 in characteristic 2
        assert_eq!(gf.poly_mul(&[1, 1], &[1, 1]), vec![1, 0, 1]);
        assert_eq!(gf.poly_mul(&[], &[1, 2]), Vec::<u16>::new());
    }

    #[test]
    fn test_karatsuba_matches_schoolbook() {
        let gf = gf256();
        let a: Vec<u16> = (1..=23).map(|i| (i * 37 % 256) as u16).collect();
        let b: Vec<u16> = (1..=16).map(|i| (i * 91 % 256) as u16).collect();
        assert_eq!(gf.poly_mul(&a, &b), gf.poly_mul_schoolbook(&a, &b));
        assert_eq!(gf.poly_mul(&b, &a), gf.poly_mul_schoolbook(&b, &a));
    }

    #[test]
    fn test_poly_mod() {
        let gf = gf256();
        // x^2 + 1 = (x + 1)^2, so remainder is zero
        assert_eq!(gf.poly_mod(&[1, 0, 1], &[1, 1]).unwrap(), vec![0]);
        // x^2 mod (x + 1) = 1
        assert_eq!(gf.poly_mod(&[1, 0, 0], &[1, 1]).unwrap(), vec![1]);
        // dividend shorter than divisor is returned left-padded
        assert_eq!(gf.poly_mod(&[5], &[1, 2, 3]).unwrap(), vec![0, 5]);
        assert!(gf.poly_mod(&[1, 2], &[]).is_err());
        assert!(gf.poly_mod(&[1, 2], &[0, 1]).is_err());
    }

    #[test]
    fn test_poly_mod_non_monic() {
        let gf = gf256();
        let divisor = [3, 7, 11];
        let quotient = [9, 4, 1, 200];
        let remainder = [17, 42];
        let dividend = gf.poly_add(&gf.poly_mul(&divisor, &quotient), &remainder);
        assert_eq!(gf.poly_mod(&dividend, &divisor).unwrap(), remainder.to_vec());
    }

    #[test]
    fn test_poly_eval() {
        let gf = gf256();
        assert_eq!(gf.poly_eval(&[1, 0, 1], 1), 0);
        assert_eq!(gf.poly_eval(&[7], 99), 7);
        assert_eq!(gf.poly_eval(&[], 3), 0);
        // x^2 + 2x + 3 at x = 2: 4 ^ 4 ^ 3
        assert_eq!(gf.poly_eval(&[1, 2, 3], 2), 3);
    }

    #[test]
    fn test_interpolation_recovers_polynomial() {
        let gf = gf256();
        let poly = [12u16, 0, 77, 5];
        let points: Vec<(u16, u16)> = [1u16, 2, 3, 200]
            .iter()
            .map(|&x| (x, gf.poly_eval(&poly, x)))
            .collect();
        assert_eq!(gf.poly_interpolation(&points).unwrap(), poly.to_vec());
    }

    #[test]
    fn test_interpolation_duplicate_x_fails() {
        let gf = gf256();
        let res = gf.poly_interpolation(&[(3, 1), (3, 2)]);
        assert!(matches!(res, Err(Error::Domain(_))));
    }

    #[test]
    fn test_shared_qr_field() {
        let a = GaloisField::qr();
        let b = GaloisField::qr();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.primitive_poly(), QR_PRIMITIVE_POLY);
    }
}
