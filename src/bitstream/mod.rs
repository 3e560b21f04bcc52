//! The bitstream module is the bit level I/O subsystem of huffzip.
//!
//! A container is a single header byte holding the number of zero bits used to pad the
//! stream out to a whole byte, followed by the packed codes, most significant bit first.
//! The padding is always between 1 and 8 bits: a stream that is already byte aligned still
//! gets a full byte of padding, so a header of 0 never appears in a valid container.
//!
//! BitPacker writes containers and BitReader reads them back. Both are tuned to the
//! needs of the codec and are not meant as general purpose bit I/O.
//!
pub mod bitpacker;
pub mod bitreader;

/// Number of padding bits needed after `bit_count` data bits.
pub fn padding_for(bit_count: usize) -> u8 {
    8 - (bit_count % 8) as u8
}
