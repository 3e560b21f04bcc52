//! BitReader: reads a container bitstream, most significant bit of each byte first.
//!
//! The container is read completely into memory before decoding starts, so the reader works
//! over a borrowed slice rather than a stream.

const BIT_MASK: u8 = 0xff;

/// Reads bits out of a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Bits not read yet.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() - self.cursor) * 8 - self.bit_index
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.cursor == self.buffer.len() {
            return None;
        }
        let bit =
            (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<usize> of the next n bits (n <= 64), or None if fewer than n are left.
    /// Nothing is consumed when None comes back.
    pub fn bint(&mut self, mut n: usize) -> Option<usize> {
        if n > self.remaining() {
            return None;
        }
        let mut result = 0_usize;

        // Finish off a partial byte first.
        if self.bit_index > 0 && n > 0 {
            let needed = n.min(8 - self.bit_index);
            let byte = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index);
            result = (byte >> (8 - self.bit_index - needed)) as usize;
            self.bit_index += needed;
            if self.bit_index == 8 {
                self.cursor += 1;
                self.bit_index = 0;
            }
            n -= needed;
        }
        // Then whole bytes.
        while n >= 8 {
            result = result << 8 | self.buffer[self.cursor] as usize;
            self.cursor += 1;
            n -= 8;
        }
        // Then the leading bits of the last byte.
        if n > 0 {
            result = result << n | (self.buffer[self.cursor] >> (8 - n)) as usize;
            self.bit_index = n;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// The unread bytes, or None if we stopped partway through a byte.
    pub fn tail(&self) -> Option<&'a [u8]> {
        if self.bit_index == 0 {
            Some(&self.buffer[self.cursor..])
        } else {
            None
        }
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
