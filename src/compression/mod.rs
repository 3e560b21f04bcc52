//! The compression module drives both directions of huffzip.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each byte occurs.
//! - Tree build: repeatedly merge the two lightest nodes into one.
//! - Code generation: the path from the root to each leaf is that symbol's code.
//! - Bit packing: concatenate the codes, pad to a byte boundary and prepend the padding count.
//!
//! Decompression reads the padding count, strips the padding and matches bits against the
//! reverse code table until the stream runs out.
//!
//! `compress` and `decompress` work on a bare container and need the code table on the side.
//! `archive` wraps a container together with its frequency table so files can be decoded on
//! their own.
//!

pub mod archive;
pub mod compress;
pub mod decompress;

use std::fs::OpenOptions;
use std::io::{self, Write};

use log::debug;

use crate::error::Result;
use crate::tools::cli::{HzOpts, Output};

/// Write `data` to `name`, or to stdout if that is where output goes. Existing files are only
/// replaced when overwriting was forced.
pub(crate) fn write_output(name: &str, data: &[u8], opts: &HzOpts) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(data)?;
            lock.flush()?;
        }
        Output::File => {
            let mut f_out = if opts.force_overwrite {
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(name)?
            } else {
                OpenOptions::new().write(true).create_new(true).open(name)?
            };
            f_out.write_all(data)?;
            debug!("Wrote {} bytes to {}", data.len(), name);
        }
    }
    Ok(())
}
