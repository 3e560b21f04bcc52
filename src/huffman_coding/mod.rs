//! The huffman module builds the code for one run of huffzip.
//!
//! `huffman` turns a frequency table into a tree by repeatedly merging the two lightest nodes.
//! Ties are broken by creation order, so one table always produces one tree; this is what lets
//! an archive store only the counts and still decode.
//!
//! `code_table` walks that tree into the forward table used for packing and the reverse table
//! used for decoding.
//!
//! Everything here is per call: nothing is cached or shared between runs.
//!

pub mod code_table;
pub mod huffman;
