//! The archive wrapper that makes a compressed file self describing.
//!
//! A bare container cannot be decoded without the code table it was packed with. Files carry
//! the frequency table in front of the container instead; the tree builder is deterministic,
//! so rebuilding it from the same counts gives back the same codes. All integers are big
//! endian.
//!
//! ```text
//! "HZh" '1'            magic and format version
//! u16                  number of distinct symbols (0..=256)
//! (u8 symbol, u64 count) * n, ascending by symbol, counts > 0
//! container            padding header + packed bits
//! ```

use log::{debug, error, info};

use super::compress::compress;
use super::decompress::decompress;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::freq_count::FreqTable;

pub const MAGIC: [u8; 3] = *b"HZh";
pub const VERSION: u8 = b'1';
const EOF_MESSAGE: &str = "unexpected end of archive header";

/// A frequency table and the container packed with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub freqs: FreqTable,
    pub container: Vec<u8>,
}

impl Archive {
    /// Serialize the header and container.
    pub fn to_bytes(&self) -> Vec<u8> {
        let pairs = self.freqs.sorted();
        let mut out = Vec::with_capacity(6 + pairs.len() * 9 + self.container.len());
        out.extend_from_slice(&MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&(pairs.len() as u16).to_be_bytes());
        for (sym, count) in pairs {
            out.push(sym);
            out.extend_from_slice(&count.to_be_bytes());
        }
        out.extend_from_slice(&self.container);
        out
    }

    /// Parse an archive. Only the header is validated here; the container is checked when it
    /// is decoded.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut br = BitReader::new(data);
        let eof = || HuffError::BadArchive(EOF_MESSAGE.to_string());

        // Look for a valid signature.
        let mut magic = [0_u8; 4];
        for byte in magic.iter_mut() {
            *byte = br.byte().ok_or_else(eof)?;
        }
        if magic[..3] != MAGIC {
            error!("Not a huffzip archive.");
            return Err(HuffError::BadArchive("missing HZh signature".to_string()));
        }
        if magic[3] != VERSION {
            return Err(HuffError::BadArchive(format!(
                "unsupported format version {:?}",
                magic[3] as char
            )));
        }

        let symbols = br.bint(16).ok_or_else(eof)?;
        if symbols > 256 {
            return Err(HuffError::BadArchive(format!(
                "{} symbols listed, at most 256 exist",
                symbols
            )));
        }

        let mut freqs = FreqTable::new();
        let mut total = 0_u64;
        let mut last: Option<u8> = None;
        for _ in 0..symbols {
            let sym = br.byte().ok_or_else(eof)?;
            let count = (br.bint(32).ok_or_else(eof)? as u64) << 32
                | br.bint(32).ok_or_else(eof)? as u64;
            if last.map_or(false, |l| sym <= l) {
                return Err(HuffError::BadArchive(format!(
                    "symbol {:#04x} is out of order",
                    sym
                )));
            }
            if count == 0 {
                return Err(HuffError::BadArchive(format!(
                    "symbol {:#04x} has a zero count",
                    sym
                )));
            }
            total = total.checked_add(count).ok_or_else(|| {
                HuffError::BadArchive("symbol counts overflow".to_string())
            })?;
            freqs.insert(sym, count);
            last = Some(sym);
        }
        debug!("Archive lists {} symbols, {} bytes in all", symbols, total);

        let container = br.tail().ok_or_else(eof)?.to_vec();
        Ok(Archive { freqs, container })
    }

    /// Rebuild the code table and decode the container, checking the length on the way out.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let codes = CodeTable::from_freqs(&self.freqs)?;
        let data = decompress(&self.container, &codes)?;
        let expected = self.freqs.total();
        if data.len() as u64 != expected {
            return Err(HuffError::LengthMismatch {
                expected,
                actual: data.len() as u64,
            });
        }
        Ok(data)
    }
}

/// Compress `data` into a self describing archive.
pub fn pack(data: &[u8]) -> Result<Vec<u8>> {
    let compressed = compress(data)?;
    let archive = Archive {
        freqs: compressed.freqs,
        container: compressed.container,
    };
    let bytes = archive.to_bytes();
    info!(
        "Packed {} bytes into {} ({} header, {} container)",
        data.len(),
        bytes.len(),
        bytes.len() - archive.container.len(),
        archive.container.len()
    );
    Ok(bytes)
}

/// Recover the original data from an archive.
pub fn unpack(bytes: &[u8]) -> Result<Vec<u8>> {
    Archive::from_bytes(bytes)?.decode()
}
