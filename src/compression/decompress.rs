use std::fs;

use log::{debug, info, trace, warn};

use super::archive;
use super::compress::SUFFIX;
use super::write_output;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::tools::cli::{HzOpts, Output};

/// Decode a container against the code table it was packed with.
///
/// Bits are collected one at a time until they spell a known code; the symbol is emitted and
/// collection starts over. The stream has to run out exactly on a code boundary.
pub fn decompress(container: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut br = BitReader::new(container);

    // Validate the padding header against what is actually there.
    let padding = br
        .byte()
        .ok_or_else(|| HuffError::MalformedContainer("empty container".to_string()))?
        as usize;
    if !(1..=8).contains(&padding) {
        return Err(HuffError::MalformedContainer(format!(
            "padding header {} is outside 1..=8",
            padding
        )));
    }
    let payload_bits = br.remaining();
    if padding > payload_bits {
        return Err(HuffError::MalformedContainer(format!(
            "padding of {} bits but only {} bits of payload",
            padding, payload_bits
        )));
    }
    let data_bits = payload_bits - padding;
    trace!("Container: {} data bits, {} padding", data_bits, padding);

    // Rough guess: codes average a bit over four bits.
    let mut out = Vec::with_capacity(data_bits / 4);
    let mut code = Code::default();
    for position in 0..data_bits {
        let bit = br.bool_bit().ok_or_else(|| {
            HuffError::MalformedContainer(format!("ran out of bits at {}", position))
        })?;
        code = code.push(bit);
        if let Some(sym) = codes.symbol(&code) {
            out.push(sym);
            code = Code::default();
        } else if code.len >= codes.max_len() {
            return Err(HuffError::UnknownCode {
                code: code.bits,
                len: code.len,
                position,
            });
        }
    }
    if !code.is_empty() {
        return Err(HuffError::UndecodableTail { len: code.len });
    }

    // The padding has to be zeros, otherwise the header is lying about where the data ends.
    match br.bint(padding) {
        Some(0) => {}
        _ => {
            return Err(HuffError::MalformedContainer(
                "non-zero padding bits".to_string(),
            ))
        }
    }

    debug!(
        "Decoded {} symbols from {} bits, ending at {}",
        out.len(),
        data_bits,
        br.loc()
    );
    Ok(out)
}

/// Same as decompress(), for data that is known to be UTF-8 text.
pub fn decompress_text(container: &[u8], codes: &CodeTable) -> Result<String> {
    Ok(String::from_utf8(decompress(container, codes)?)?)
}

/// Output name for a compressed file: strip `.hz`, or append `.out` if it is not there.
pub fn output_name(path: &str) -> String {
    match path.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => {
            warn!("{} does not end in {}, writing to {}.out", path, SUFFIX, path);
            format!("{}.out", path)
        }
    }
}

/// Decompress the archive at `path`, then remove it unless asked to keep it.
pub fn decompress_file(path: &str, opts: &HzOpts) -> Result<()> {
    let packed = fs::read(path)?;
    let data = archive::unpack(&packed)?;
    info!("{}: {} -> {} bytes", path, packed.len(), data.len());

    write_output(&output_name(path), &data, opts)?;

    if !opts.keep_input_files && matches!(opts.output, Output::File) {
        fs::remove_file(path)?;
        debug!("Removed {}", path);
    }
    Ok(())
}

/// Decode the archive at `path` in memory and report whether it is intact.
pub fn test_file(path: &str) -> Result<()> {
    let packed = fs::read(path)?;
    let data = archive::unpack(&packed)?;
    info!("{}: ok ({} bytes)", path, data.len());
    Ok(())
}
