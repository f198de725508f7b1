//! Reed-Solomon coding over GF(2^m)
//!
//! Systematic RS(n, k): a block is `k` data symbols followed by `n - k`
//! parity symbols. Position `p` of a block is the coefficient of
//! x^(n-1-p), so its error locator is alpha^(n-1-p). The generator has
//! roots alpha^0 .. alpha^(n-k-1), which is the convention QR codes use.

use crate::coding::galois::{GaloisField, QR_PRIMITIVE_POLY};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// Reed-Solomon encoder/decoder for one `(k, n)` block shape
#[derive(Debug, Clone)]
pub struct ReedSolomonCoder {
    k: usize,
    n: usize,
    field: Arc<GaloisField>,
    generator: Vec<u16>,
}

impl ReedSolomonCoder {
    /// Coder over the field defined by `primitive_poly`
    pub fn new(k: usize, n: usize, primitive_poly: u32) -> Result<Self> {
        let field = if primitive_poly == QR_PRIMITIVE_POLY {
            GaloisField::qr()
        } else {
            Arc::new(GaloisField::new(primitive_poly)?)
        };
        Self::with_field(k, n, field)
    }

    /// Coder over GF(256) with the QR field polynomial
    pub fn qr(k: usize, n: usize) -> Result<Self> {
        Self::with_field(k, n, GaloisField::qr())
    }

    /// Coder over an already constructed field
    pub fn with_field(k: usize, n: usize, field: Arc<GaloisField>) -> Result<Self> {
        if k == 0 || k >= n {
            return Err(Error::InvalidParameters(format!(
                "need 0 < k < n, got k={} n={}",
                k, n
            )));
        }
        if n > field.element_count() {
            return Err(Error::InvalidParameters(format!(
                "block length {} exceeds field size {}",
                n,
                field.element_count()
            )));
        }
        let generator = Self::build_generator(&field, n - k);
        Ok(Self {
            k,
            n,
            field,
            generator,
        })
    }

    // prod_{i < degree} (x + alpha^i), most significant coefficient first
    fn build_generator(field: &GaloisField, degree: usize) -> Vec<u16> {
        let mut poly = vec![0u16; degree + 1];
        poly[0] = 1;
        for i in 1..=degree {
            let root = field.exp(i - 1);
            for j in (1..=i).rev() {
                poly[j] ^= field.mul(poly[j - 1], root);
            }
        }
        poly
    }

    /// Data symbols per block
    pub fn k(&self) -> usize {
        self.k
    }

    /// Total symbols per block
    pub fn n(&self) -> usize {
        self.n
    }

    /// Parity symbols per block
    pub fn parity_len(&self) -> usize {
        self.n - self.k
    }

    /// Field the coder works in
    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    /// Monic generator polynomial of degree `n - k`
    pub fn generator(&self) -> &[u16] {
        &self.generator
    }

    /// Generator computed as a product of linear factors with `poly_mul`
    pub fn generator_slow(&self) -> Vec<u16> {
        (0..self.parity_len()).fold(vec![1u16], |g, i| {
            self.field.poly_mul(&g, &[1, self.field.exp(i)])
        })
    }

    /// Parity symbols for one block of exactly `k` data symbols
    pub fn encode_block(&self, data: &[u16]) -> Result<Vec<u16>> {
        if data.len() != self.k {
            return Err(Error::BlockLength {
                expected: self.k,
                actual: data.len(),
            });
        }
        self.field.check_elements(data)?;
        let mut padded = Vec::with_capacity(self.n);
        padded.extend_from_slice(data);
        padded.resize(self.n, 0);
        self.field.poly_mod(&padded, &self.generator)
    }

    /// Full codeword: data followed by parity
    pub fn encode_systematic(&self, data: &[u16]) -> Result<Vec<u16>> {
        let parity = self.encode_block(data)?;
        let mut codeword = data.to_vec();
        codeword.extend_from_slice(&parity);
        Ok(codeword)
    }

    /// Syndromes S_i = r(alpha^i) for i in 0..n-k; all zero for a codeword
    pub fn syndromes(&self, received: &[u16]) -> Result<Vec<u16>> {
        if received.len() != self.n {
            return Err(Error::BlockLength {
                expected: self.n,
                actual: received.len(),
            });
        }
        self.field.check_elements(received)?;
        Ok(self.syndromes_unchecked(received))
    }

    fn syndromes_unchecked(&self, received: &[u16]) -> Vec<u16> {
        (0..self.parity_len())
            .map(|i| self.field.poly_eval(received, self.field.exp(i)))
            .collect()
    }

    /// Syndromes with the contribution of known erasure positions removed
    ///
    /// Returns `syndromes.len() - erasures.len()` values.
    pub fn forney_syndromes(&self, syndromes: &[u16], erasures: &[usize]) -> Vec<u16> {
        let mut fsynd = syndromes.to_vec();
        for &pos in erasures {
            if fsynd.is_empty() {
                break;
            }
            let x = self.locator(pos);
            for j in 0..fsynd.len() - 1 {
                fsynd[j] = self.field.mul(fsynd[j], x) ^ fsynd[j + 1];
            }
            fsynd.pop();
        }
        fsynd
    }

    /// Locate errors from (Forney) syndromes
    ///
    /// Runs Berlekamp-Massey to build the error locator, then a Chien search
    /// over every block position. `erasure_count` erasures have already been
    /// folded out of the syndromes and still consume correction budget.
    pub fn find_errors(&self, syndromes: &[u16], erasure_count: usize) -> Result<Vec<usize>> {
        let (locator, errors) = self.error_locator(syndromes)?;
        if 2 * errors + erasure_count > self.parity_len() {
            return Err(Error::Uncorrectable("too many errors"));
        }

        let positions: Vec<usize> = (0..self.n)
            .filter(|&pos| {
                let x_inv = self.locator_inverse(pos);
                eval_low_first(&self.field, &locator, x_inv) == 0
            })
            .collect();

        if positions.len() != errors {
            trace!(
                found = positions.len(),
                expected = errors,
                "chien search root count mismatch"
            );
            return Err(Error::Uncorrectable("error locator roots do not match degree"));
        }
        Ok(positions)
    }

    // Berlekamp-Massey; locator is least significant coefficient first
    fn error_locator(&self, syndromes: &[u16]) -> Result<(Vec<u16>, usize)> {
        let gf = &self.field;
        let mut lambda = vec![1u16];
        let mut prev = vec![1u16];
        let mut len = 0usize;

        for r in 0..syndromes.len() {
            let mut delta = 0u16;
            for (j, &coeff) in lambda.iter().enumerate().take(r + 1) {
                delta ^= gf.mul(coeff, syndromes[r - j]);
            }
            prev.insert(0, 0);
            if delta == 0 {
                continue;
            }
            let mut next = lambda.clone();
            if next.len() < prev.len() {
                next.resize(prev.len(), 0);
            }
            for (j, &coeff) in prev.iter().enumerate() {
                next[j] ^= gf.mul(delta, coeff);
            }
            if 2 * len <= r {
                let delta_inv = gf.inverse(delta)?;
                prev = lambda.iter().map(|&c| gf.mul(c, delta_inv)).collect();
                len = r + 1 - len;
            }
            lambda = next;
        }

        if lambda.iter().skip(len + 1).any(|&c| c != 0) {
            return Err(Error::Uncorrectable("error locator degree exceeds its length"));
        }
        lambda.truncate(len + 1);
        Ok((lambda, len))
    }

    /// Correct a block and return its `k` data symbols
    ///
    /// `erasures` lists positions known to be unreliable; their received
    /// values are ignored. Fails rather than returning an unverified result
    /// when the errata exceed the correction budget.
    pub fn decode_block(&self, received: &[u16], erasures: &[usize]) -> Result<Vec<u16>> {
        if received.len() != self.n {
            return Err(Error::BlockLength {
                expected: self.n,
                actual: received.len(),
            });
        }
        let mut erasures = erasures.to_vec();
        erasures.sort_unstable();
        erasures.dedup();
        if let Some(&pos) = erasures.iter().find(|&&pos| pos >= self.n) {
            return Err(Error::InvalidParameters(format!(
                "erasure position {} outside block of {}",
                pos, self.n
            )));
        }
        if erasures.len() > self.parity_len() {
            return Err(Error::Uncorrectable("too many erasures"));
        }

        let mut message = received.to_vec();
        for &pos in &erasures {
            message[pos] = 0;
        }
        self.field.check_elements(&message)?;

        let syndromes = self.syndromes_unchecked(&message);
        if syndromes.iter().all(|&s| s == 0) {
            message.truncate(self.k);
            return Ok(message);
        }

        let fsynd = self.forney_syndromes(&syndromes, &erasures);
        let errors = self.find_errors(&fsynd, erasures.len())?;
        if errors.iter().any(|pos| erasures.binary_search(pos).is_ok()) {
            return Err(Error::Uncorrectable("error located on an erasure"));
        }

        let mut errata = erasures.clone();
        errata.extend_from_slice(&errors);
        self.correct_errata(&mut message, &syndromes, &errata)?;

        if self.syndromes_unchecked(&message).iter().any(|&s| s != 0) {
            return Err(Error::Uncorrectable("residual error after correction"));
        }
        debug!(
            erasures = erasures.len(),
            errors = errors.len(),
            "reed-solomon block corrected"
        );
        message.truncate(self.k);
        Ok(message)
    }

    // Forney: e_p = X_p * Omega(X_p^-1) / Lambda'(X_p^-1)
    fn correct_errata(
        &self,
        message: &mut [u16],
        syndromes: &[u16],
        positions: &[usize],
    ) -> Result<()> {
        let gf = &self.field;

        let mut locator = vec![1u16];
        for &pos in positions {
            let x = self.locator(pos);
            let mut next = locator.clone();
            next.push(0);
            for (j, &c) in locator.iter().enumerate() {
                next[j + 1] ^= gf.mul(c, x);
            }
            locator = next;
        }

        let mut evaluator = vec![0u16; syndromes.len()];
        for (i, &s) in syndromes.iter().enumerate() {
            for (j, &c) in locator.iter().enumerate() {
                if i + j < evaluator.len() {
                    evaluator[i + j] ^= gf.mul(s, c);
                }
            }
        }

        for &pos in positions {
            let x = self.locator(pos);
            let x_inv = gf.inverse(x)?;
            let omega = eval_low_first(gf, &evaluator, x_inv);

            let mut derivative = 0u16;
            let mut power = 1u16;
            for (i, &c) in locator.iter().enumerate().skip(1) {
                if i % 2 == 1 {
                    derivative ^= gf.mul(c, power);
                }
                power = gf.mul(power, x_inv);
            }
            if derivative == 0 {
                return Err(Error::Uncorrectable("error locator derivative is zero"));
            }
            message[pos] ^= gf.mul(x, gf.div(omega, derivative)?);
        }
        Ok(())
    }

    /// Encode a stream of any length as consecutive blocks
    ///
    /// A trailing partial block is shortened: it is encoded as if padded with
    /// zeros to `k` symbols, but only its real data and its parity are emitted.
    pub fn encode_stream(&self, data: &[u16]) -> Result<Vec<u16>> {
        let mut out = Vec::with_capacity(data.len().div_ceil(self.k) * self.n);
        for chunk in data.chunks(self.k) {
            let mut block = chunk.to_vec();
            block.resize(self.k, 0);
            let parity = self.encode_block(&block)?;
            out.extend_from_slice(chunk);
            out.extend_from_slice(&parity);
        }
        Ok(out)
    }

    /// Inverse of [`ReedSolomonCoder::encode_stream`]
    pub fn decode_stream(&self, encoded: &[u16]) -> Result<Vec<u16>> {
        let parity = self.parity_len();
        let mut out = Vec::with_capacity(encoded.len() / self.n * self.k);
        for chunk in encoded.chunks(self.n) {
            if chunk.len() <= parity {
                return Err(Error::BlockLength {
                    expected: parity + 1,
                    actual: chunk.len(),
                });
            }
            let data_len = chunk.len() - parity;
            let mut block = chunk[..data_len].to_vec();
            block.resize(self.k, 0);
            block.extend_from_slice(&chunk[data_len..]);
            let decoded = self.decode_block(&block, &[])?;
            out.extend_from_slice(&decoded[..data_len]);
        }
        Ok(out)
    }

    fn locator(&self, pos: usize) -> u16 {
        self.field.exp(self.n - 1 - pos)
    }

    fn locator_inverse(&self, pos: usize) -> u16 {
        let order = self.field.element_count();
        self.field.exp(order - (self.n - 1 - pos) % order)
    }
}

fn eval_low_first(field: &GaloisField, poly: &[u16], x: u16) -> u16 {
    poly.iter()
        .rev()
        .fold(0, |acc, &coeff| field.mul(acc, x) ^ coeff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(data: &[u8]) -> Vec<u16> {
        data.iter().map(|&b| b as u16).collect()
    }

    #[test]
    fn test_generator_matches_product() {
        for parity in [1usize, 2, 7, 10, 18, 30] {
            let rs = ReedSolomonCoder::qr(10, 10 + parity).unwrap();
            assert_eq!(rs.generator().len(), parity + 1);
            assert_eq!(rs.generator()[0], 1);
            assert_eq!(rs.generator(), rs.generator_slow().as_slice());
        }
    }

    #[test]
    fn test_qr_generator_degree_7() {
        // Exponents of the QR generator for 7 ECC codewords: 0, 87, 229, 146, 149, 238, 102, 21
        let rs = ReedSolomonCoder::qr(19, 26).unwrap();
        let gf = rs.field();
        let logs: Vec<usize> = rs.generator().iter().map(|&c| gf.log(c).unwrap()).collect();
        assert_eq!(logs, vec![0, 87, 229, 146, 149, 238, 102, 21]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ReedSolomonCoder::qr(10, 10).is_err());
        assert!(ReedSolomonCoder::qr(0, 10).is_err());
        assert!(ReedSolomonCoder::qr(10, 256).is_err());
        assert!(ReedSolomonCoder::new(3, 7, 11).is_ok());
        assert!(ReedSolomonCoder::new(3, 8, 11).is_err());
        assert!(ReedSolomonCoder::new(3, 7, 257).is_err());
    }

    #[test]
    fn test_encode_block_qr_vector() {
        let rs = ReedSolomonCoder::qr(15, 33).unwrap();
        let data = bytes(&[67, 85, 70, 134, 87, 38, 85, 194, 119, 50, 6, 18, 6, 103, 38]);
        let expected = bytes(&[
            213, 199, 11, 45, 115, 247, 241, 223, 229, 248, 154, 117, 154, 111, 86, 161, 111, 39,
        ]);
        assert_eq!(rs.encode_block(&data).unwrap(), expected);
    }

    #[test]
    fn test_encode_block_wrong_length() {
        let rs = ReedSolomonCoder::qr(15, 33).unwrap();
        let err = rs.encode_block(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BlockLength {
                expected: 15,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_codeword_has_zero_syndromes() {
        let rs = ReedSolomonCoder::qr(16, 26).unwrap();
        let data: Vec<u16> = (0..16).map(|i| (i * 17 + 3) as u16).collect();
        let codeword = rs.encode_systematic(&data).unwrap();
        assert!(rs.syndromes(&codeword).unwrap().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_decode_clean_block() {
        let rs = ReedSolomonCoder::qr(6, 16).unwrap();
        let data = bytes(&[0x10, 0x20, 0x30, 0x40, 0x50, 0x60]);
        let codeword = rs.encode_systematic(&data).unwrap();
        assert_eq!(rs.decode_block(&codeword, &[]).unwrap(), data);
    }

    #[test]
    fn test_decode_corrects_errors_up_to_budget() {
        let rs = ReedSolomonCoder::qr(8, 18).unwrap();
        let data = bytes(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
        let mut codeword = rs.encode_systematic(&data).unwrap();
        codeword[0] ^= 0xFF;
        codeword[4] ^= 0x42;
        codeword[7] ^= 0x13;
        codeword[12] ^= 0x01;
        codeword[17] ^= 0x99;
        assert_eq!(rs.decode_block(&codeword, &[]).unwrap(), data);
    }

    #[test]
    fn test_decode_erasures_only() {
        let rs = ReedSolomonCoder::qr(5, 13).unwrap();
        let data = bytes(&[1, 2, 3, 4, 5]);
        let mut codeword = rs.encode_systematic(&data).unwrap();
        let erased = [0usize, 2, 3, 6, 9, 10, 11, 12];
        for &pos in &erased {
            codeword[pos] = 0xAA;
        }
        assert_eq!(rs.decode_block(&codeword, &erased).unwrap(), data);
    }

    #[test]
    fn test_decode_erasures_and_errors() {
        let rs = ReedSolomonCoder::qr(10, 20).unwrap();
        let data: Vec<u16> = (0..10).map(|i| (i * 29 + 7) as u16).collect();
        let mut codeword = rs.encode_systematic(&data).unwrap();
        // 4 erasures + 3 errors: 4 + 2*3 = 10 parity symbols
        let erased = [1usize, 5, 11, 19];
        for &pos in &erased {
            codeword[pos] ^= 0x5A;
        }
        codeword[3] ^= 0x01;
        codeword[8] ^= 0xF0;
        codeword[15] ^= 0x3C;
        assert_eq!(rs.decode_block(&codeword, &erased).unwrap(), data);
    }

    #[test]
    fn test_too_many_erasures() {
        let rs = ReedSolomonCoder::qr(5, 9).unwrap();
        let codeword = rs.encode_systematic(&[1, 2, 3, 4, 5]).unwrap();
        let err = rs.decode_block(&codeword, &[0, 1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, Error::Uncorrectable(_)));
    }

    #[test]
    fn test_too_many_errors_is_reported() {
        let rs = ReedSolomonCoder::qr(20, 36).unwrap();
        let data: Vec<u16> = (0..20).map(|i| (i * 13 + 1) as u16).collect();
        let mut codeword = rs.encode_systematic(&data).unwrap();
        for pos in [0usize, 3, 6, 9, 12, 15, 18, 21, 24] {
            codeword[pos] ^= 0x6D;
        }
        let err = rs.decode_block(&codeword, &[]).unwrap_err();
        assert!(matches!(err, Error::Uncorrectable(_)));
    }

    #[test]
    fn test_erasure_out_of_range() {
        let rs = ReedSolomonCoder::qr(5, 9).unwrap();
        let codeword = rs.encode_systematic(&[1, 2, 3, 4, 5]).unwrap();
        assert!(matches!(
            rs.decode_block(&codeword, &[9]),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_symbols_outside_field_rejected() {
        let rs = ReedSolomonCoder::qr(4, 10).unwrap();
        assert!(matches!(
            rs.encode_block(&[1, 2, 300, 4]),
            Err(Error::Domain(_))
        ));

        let mut block = rs.encode_systematic(&[1, 2, 3, 4]).unwrap();
        block[5] = 999;
        assert!(matches!(rs.syndromes(&block), Err(Error::Domain(_))));
        assert!(matches!(rs.decode_block(&block, &[]), Err(Error::Domain(_))));
        // an erased position is ignored, whatever it holds
        assert_eq!(rs.decode_block(&block, &[5]).unwrap(), vec![1, 2, 3, 4]);

        let gf8 = Arc::new(GaloisField::with_degree(3).unwrap());
        let rs8 = ReedSolomonCoder::with_field(3, 7, gf8).unwrap();
        assert!(matches!(rs8.encode_block(&[1, 9, 2]), Err(Error::Domain(_))));
        assert!(matches!(
            rs8.encode_stream(&[1, 2, 3, 4, 9]),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn test_small_field() {
        // GF(8), RS(7, 3) corrects two errors
        let rs = ReedSolomonCoder::new(3, 7, 11).unwrap();
        let data = vec![5u16, 0, 3];
        let mut codeword = rs.encode_systematic(&data).unwrap();
        codeword[1] ^= 6;
        codeword[5] ^= 1;
        assert_eq!(rs.decode_block(&codeword, &[]).unwrap(), data);
    }

    #[test]
    fn test_stream_roundtrip_with_short_tail() {
        let rs = ReedSolomonCoder::qr(8, 12).unwrap();
        let data: Vec<u16> = (0..21).map(|i| i as u16 * 11).collect();
        let mut encoded = rs.encode_stream(&data).unwrap();
        assert_eq!(encoded.len(), 12 + 12 + 5 + 4);
        encoded[2] ^= 0x80;
        encoded[26] ^= 0x01;
        assert_eq!(rs.decode_stream(&encoded).unwrap(), data);
    }
}
