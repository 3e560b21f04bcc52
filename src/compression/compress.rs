use std::fs;

use log::{debug, info, warn};

use super::archive;
use super::write_output;
use crate::bitstream::bitpacker::BitPacker;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::cli::{HzOpts, Output};
use crate::tools::freq_count::{freqs, FreqTable};

/// Suffix added to compressed files.
pub const SUFFIX: &str = ".hz";

/// Everything one compression run produces. The container is all that needs storing when the
/// code table travels some other way; the frequency table is what the archive format stores.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub container: Vec<u8>,
    pub codes: CodeTable,
    pub freqs: FreqTable,
    /// Encoded bits, padding and header excluded.
    pub bit_count: usize,
}

/// Count, build the tree, generate codes and pack `data` into a container.
pub fn compress(data: &[u8]) -> Result<Compressed> {
    let freqs = freqs(data);
    debug!("Found {} distinct symbols in {} bytes", freqs.len(), data.len());
    let codes = CodeTable::from_freqs(&freqs)?;
    let (container, bit_count) = encode(data, &codes)?;
    Ok(Compressed {
        container,
        codes,
        freqs,
        bit_count,
    })
}

/// Pack `data` with an existing code table. Returns the container and the number of code
/// bits in it. Stops at the first symbol the table does not cover.
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<(Vec<u8>, usize)> {
    let mut bp = BitPacker::new(data.len() / 2);
    for &sym in data {
        let code = codes.code(sym).ok_or(HuffError::MissingSymbol(sym))?;
        bp.out_code(code);
    }
    let bit_count = bp.bit_count();
    debug!("Packed {} bits, ending at {}", bit_count, bp.loc());
    Ok((bp.finish(), bit_count))
}

/// Compress the file at `path` into `<path>.hz` (or stdout), then remove the input unless
/// asked to keep it.
pub fn compress_file(path: &str, opts: &HzOpts) -> Result<()> {
    if path.ends_with(SUFFIX) {
        warn!("{} already has the {} suffix, compressing anyway", path, SUFFIX);
    }
    let data = fs::read(path)?;
    let packed = archive::pack(&data)?;

    let ratio = if data.is_empty() {
        0.0
    } else {
        packed.len() as f64 / data.len() as f64
    };
    info!(
        "{}: {} -> {} bytes ({:.3} ratio, {:.2}% saved)",
        path,
        data.len(),
        packed.len(),
        ratio,
        (1.0 - ratio) * 100.0
    );

    let out_name = format!("{}{}", path, SUFFIX);
    write_output(&out_name, &packed, opts)?;

    if !opts.keep_input_files && matches!(opts.output, Output::File) {
        fs::remove_file(path)?;
        debug!("Removed {}", path);
    }
    Ok(())
}
