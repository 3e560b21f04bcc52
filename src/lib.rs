//! Huffman coding compressor.
//!
//! Provides lossless compression and decompression of text (or any bytes) with a Huffman
//! code built from the data's own byte frequencies.
//!
//! The codec works on a container: one header byte holding the number of padding bits
//! (1 to 8), followed by the packed codes, most significant bit first. A container needs the
//! code table it was packed with; files written by the command line tool wrap the container
//! in an archive that also stores the frequency table.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip -z notes.txt`
//!
//! This will compress the file and create the file notes.txt.hz.
//! The original file will be deleted unless `-k` is given.
//!
//! From code:
//!
//! ```
//! use huffzip::{compress, decompress};
//!
//! let text = "abracadabra";
//! let packed = compress(text.as_bytes())?;
//! assert_eq!(decompress(&packed.container, &packed.codes)?, text.as_bytes());
//! # Ok::<(), huffzip::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::archive::{pack, unpack, Archive};
pub use compression::compress::{compress, encode, Compressed};
pub use compression::decompress::{decompress, decompress_text};
pub use error::{HuffError, Result};
pub use huffman_coding::code_table::{Code, CodeTable};
pub use huffman_coding::huffman::HuffmanTree;
pub use tools::freq_count::{freqs, FreqTable};
