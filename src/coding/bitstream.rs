/// Append-only, MSB-first bit buffer used to assemble QR data codewords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
    len: usize,
}

impl BitStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no bits have been written
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a single bit
    pub fn push_bit(&mut self, bit: bool) {
        let bit_index = self.len % 8;
        if bit_index == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> bit_index;
        }
        self.len += 1;
    }

    /// Append the low `width` bits of `value`, most significant first
    ///
    /// Bits of `value` above `width` are ignored.
    pub fn push(&mut self, value: u32, width: usize) {
        debug_assert!(width <= 32, "bit width {} too large", width);
        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    /// Append whole bytes
    pub fn push_bytes(&mut self, data: &[u8]) {
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(data);
            self.len += data.len() * 8;
            return;
        }
        for &byte in data {
            self.push(byte as u32, 8);
        }
    }

    /// Append every bit of another stream
    pub fn append(&mut self, other: &BitStream) {
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    /// Bit at `index`, or None past the end
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Iterate over bits in write order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Export as bytes; the final partial byte is padded with zero bits
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Consume the stream and return its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&[u8]> for BitStream {
    fn from(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
            len: data.len() * 8,
        }
    }
}
