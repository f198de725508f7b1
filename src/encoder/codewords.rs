//! Codeword assembly: version selection, bit packing and padding, block
//! splitting, Reed-Solomon parity and interleaving.

use crate::coding::{BitStream, ReedSolomonCoder};
use crate::encoder::modes::Segment;
use crate::encoder::tables::{EcBlockInfo, data_capacity_bits, ec_block_info};
use crate::error::{Error, Result};
use crate::models::{ECLevel, Version};
use tracing::debug;

/// Alternating pad codewords that fill unused data capacity
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Smallest version whose data capacity holds the segment
pub fn select_version(segment: &Segment, ec_level: ECLevel) -> Result<Version> {
    for version in Version::all() {
        let count_bits = segment.mode().count_bits(version);
        if segment.char_count() >> count_bits != 0 {
            continue;
        }
        if segment.total_bits(version) <= data_capacity_bits(version, ec_level) {
            return Ok(version);
        }
    }
    Err(Error::DataTooLong {
        bits: segment.total_bits(Version::MAX),
        capacity: data_capacity_bits(Version::MAX, ec_level),
        ec_level,
    })
}

/// Data codewords for `segment` at a fixed version: header, payload,
/// terminator, bit padding and pad bytes
pub fn encode_data_codewords(
    segment: &Segment,
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>> {
    let capacity = data_capacity_bits(version, ec_level);
    let used = segment.total_bits(version);
    if used > capacity {
        return Err(Error::DataTooLong {
            bits: used,
            capacity,
            ec_level,
        });
    }

    let mut bits = BitStream::with_capacity(capacity);
    bits.push(segment.mode().indicator(), 4);
    bits.push(segment.char_count() as u32, segment.mode().count_bits(version));
    bits.append(segment.data());
    bits.push(0, (capacity - used).min(4));

    let mut codewords = bits.into_bytes();
    let mut pad = PAD_BYTES.iter().cycle();
    while codewords.len() < capacity / 8 {
        if let Some(&byte) = pad.next() {
            codewords.push(byte);
        }
    }
    Ok(codewords)
}

/// Split data codewords into blocks, short blocks first
pub fn split_into_blocks(data: &[u8], info: &EcBlockInfo) -> Vec<Vec<u8>> {
    let short_len = info.short_block_data_len();
    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = if i < info.short_blocks() {
            short_len
        } else {
            short_len + 1
        };
        let end = (offset + len).min(data.len());
        blocks.push(data[offset..end].to_vec());
        offset = end;
    }
    blocks
}

/// Reed-Solomon parity for each block
pub fn add_error_correction(blocks: &[Vec<u8>], ecc_per_block: usize) -> Result<Vec<Vec<u8>>> {
    let mut coder: Option<ReedSolomonCoder> = None;
    let mut parity = Vec::with_capacity(blocks.len());
    for block in blocks {
        let rs = match coder.take() {
            Some(rs) if rs.k() == block.len() => rs,
            _ => ReedSolomonCoder::qr(block.len(), block.len() + ecc_per_block)?,
        };
        let symbols: Vec<u16> = block.iter().map(|&b| b as u16).collect();
        let ecc = rs.encode_block(&symbols)?;
        parity.push(ecc.into_iter().map(|s| s as u8).collect());
        coder = Some(rs);
    }
    Ok(parity)
}

/// Column-major interleave: first codeword of every block, then the second, ...
///
/// Blocks that run out are skipped.
pub fn interleave(blocks: &[Vec<u8>]) -> Vec<u8> {
    let longest = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = Vec::with_capacity(blocks.iter().map(Vec::len).sum());
    for i in 0..longest {
        for block in blocks {
            if let Some(&byte) = block.get(i) {
                out.push(byte);
            }
        }
    }
    out
}

/// Final codeword sequence for a symbol: interleaved data then interleaved parity
pub fn build_codewords(data: &[u8], version: Version, ec_level: ECLevel) -> Result<Vec<u8>> {
    let info = ec_block_info(version, ec_level);
    let blocks = split_into_blocks(data, &info);
    let parity = add_error_correction(&blocks, info.ecc_per_block)?;
    debug!(
        version = version.number(),
        blocks = info.num_blocks,
        short_blocks = info.short_blocks(),
        ecc_per_block = info.ecc_per_block,
        "error correction blocks built"
    );
    let mut out = interleave(&blocks);
    out.extend(interleave(&parity));
    Ok(out)
}
