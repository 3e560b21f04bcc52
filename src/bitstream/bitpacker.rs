use log::error;

use crate::huffman_coding::code_table::Code;

/// Creates the container bitstream: one padding header byte followed by the packed codes.
pub struct BitPacker {
    output: Vec<u8>,
    queue: u64,
    q_bits: u8,
    bit_count: usize,
}

impl BitPacker {
    /// Create a new BitPacker with room for `size` bytes of packed data. The header byte is
    /// reserved up front and filled in by finish().
    pub fn new(size: usize) -> Self {
        let mut output = Vec::with_capacity(size + 1);
        output.push(0);
        Self {
            output,
            queue: 0,
            q_bits: 0,
            bit_count: 0,
        }
    }

    /// Internal bitstream write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts the low `len` bits of `data` on the stream, most significant first. At most 32
    /// bits at a time so the queue can never overflow.
    fn out_bits(&mut self, data: u64, len: u8) {
        debug_assert!(len <= 32);
        let mask = (1_u64 << len) - 1;
        self.queue <<= len;
        self.queue |= data & mask;
        self.q_bits += len;
        self.bit_count += len as usize;
        self.write_stream();
    }

    /// Puts one code on the stream.
    pub fn out_code(&mut self, code: Code) {
        if code.len > 32 {
            self.out_bits(code.bits >> 32, code.len - 32);
            self.out_bits(code.bits, 32);
        } else {
            self.out_bits(code.bits, code.len);
        }
    }

    /// Number of code bits written so far, padding excluded.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Pads with 1 to 8 zero bits, never 0, so the stream ends on a byte boundary, records
    /// the padding in the header byte and returns the container.
    pub fn finish(mut self) -> Vec<u8> {
        let padding = super::padding_for(self.bit_count);
        self.out_bits(0, padding);
        if self.q_bits > 0 {
            error!("Stuff left in the BitPacker queue.");
        }
        self.output[0] = padding;
        self.output
    }

    /// Debugging function to return the number of bytes.bits output so far (header included)
    pub fn loc(&self) -> String {
        let bits = (self.output.len() * 8) + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;
    use crate::huffman_coding::code_table::Code;

    #[test]
    fn aligned_input_gets_full_byte_of_padding_test() {
        let mut bp = BitPacker::new(2);
        bp.out_code(Code::new(0b00100001, 8));
        let out = bp.finish();
        assert_eq!(out, [8, b'!', 0]);
    }

    #[test]
    fn partial_byte_test() {
        let mut bp = BitPacker::new(1);
        bp.out_code(Code::new(0b101, 3));
        assert_eq!(bp.bit_count(), 3);
        assert_eq!(bp.loc(), "[1.3]");
        let out = bp.finish();
        assert_eq!(out, [5, 0b1010_0000]);
    }

    #[test]
    fn empty_stream_test() {
        let out = BitPacker::new(0).finish();
        assert_eq!(out, [8, 0]);
    }

    #[test]
    fn codes_span_bytes_test() {
        let mut bp = BitPacker::new(4);
        bp.out_code(Code::new(0b11, 2));
        bp.out_code(Code::new(0b0000_0000_01, 10));
        bp.out_code(Code::new(0b1, 1));
        let out = bp.finish();
        // 11000000 0001 1 + 000 padding
        assert_eq!(out, [3, 0b1100_0000, 0b0001_1000]);
    }

    #[test]
    fn long_code_test() {
        let mut bp = BitPacker::new(8);
        let code = Code::new((1_u64 << 39) | 1, 40);
        bp.out_code(code);
        assert_eq!(bp.bit_count(), 40);
        let out = bp.finish();
        assert_eq!(out, [8, 0b1000_0000, 0, 0, 0, 1, 0]);
    }
}
