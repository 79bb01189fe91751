pub const CONSOLE_LINE_MAX: usize = 64;

#[derive(Debug, Eq, PartialEq)]
pub enum LineReadEvent<'a> {
    None,
    Complete(&'a [u8]),
    Overflow,
}

/// Accumulates CR/LF terminated lines from a byte stream.
pub struct ConsoleLineReader {
    line_buf: [u8; CONSOLE_LINE_MAX],
    line_len: usize,
    overflowed: bool,
}

impl Default for ConsoleLineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLineReader {
    pub const fn new() -> Self {
        Self {
            line_buf: [0; CONSOLE_LINE_MAX],
            line_len: 0,
            overflowed: false,
        }
    }

    /// Feeds one byte. Bytes after an overflow are discarded up to the next terminator.
    pub fn push_byte(&mut self, byte: u8) -> LineReadEvent<'_> {
        match byte {
            b'\r' | b'\n' => {
                let len = core::mem::take(&mut self.line_len);
                if core::mem::take(&mut self.overflowed) || len == 0 {
                    LineReadEvent::None
                } else {
                    LineReadEvent::Complete(&self.line_buf[..len])
                }
            }
            _ if self.overflowed => LineReadEvent::None,
            _ if self.line_len == CONSOLE_LINE_MAX => {
                self.line_len = 0;
                self.overflowed = true;
                LineReadEvent::Overflow
            }
            _ => {
                self.line_buf[self.line_len] = byte;
                self.line_len += 1;
                LineReadEvent::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_yields_one_line() {
        let mut reader = ConsoleLineReader::new();
        for byte in b"PING" {
            assert_eq!(reader.push_byte(*byte), LineReadEvent::None);
        }
        assert_eq!(reader.push_byte(b'\r'), LineReadEvent::Complete(b"PING"));
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::None);
    }

    #[test]
    fn overflow_is_reported_once_and_line_dropped() {
        let mut reader = ConsoleLineReader::new();
        for _ in 0..CONSOLE_LINE_MAX {
            assert_eq!(reader.push_byte(b'x'), LineReadEvent::None);
        }
        assert_eq!(reader.push_byte(b'y'), LineReadEvent::Overflow);
        assert_eq!(reader.push_byte(b'z'), LineReadEvent::None);
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::None);
        assert_eq!(reader.push_byte(b'S'), LineReadEvent::None);
        assert_eq!(reader.push_byte(b'\r'), LineReadEvent::Complete(b"S"));
    }

    #[test]
    fn bare_terminators_and_line_after_overflow_recover() {
        let mut reader = ConsoleLineReader::new();
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::None);
        for _ in 0..=CONSOLE_LINE_MAX {
            let _ = reader.push_byte(b'a');
        }
        assert_eq!(reader.push_byte(b'\r'), LineReadEvent::None);
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::None);
        for byte in b"SENS +5" {
            assert_eq!(reader.push_byte(*byte), LineReadEvent::None);
        }
        assert_eq!(reader.push_byte(b'\n'), LineReadEvent::Complete(b"SENS +5"));
    }
}
