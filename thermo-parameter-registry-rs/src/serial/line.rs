use heapless::{String, Vec};

use super::error::CommandError;

/// Accumulates received bytes into newline-terminated lines.
///
/// `\r` is dropped so both `\n` and `\r\n` endings work. A line longer
/// than `N` bytes is discarded up to its newline and reported once as
/// [`CommandError::LineTooLong`]; the next line is received normally.
/// After [`discard`](Self::discard) the rest of the current line is dropped
/// silently.
pub struct LineBuffer<const N: usize> {
    buf: Vec<u8, N>,
    overflowed: bool,
    discarding: bool,
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineBuffer<N> {
    /// Empty buffer, ready for the first byte.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
            discarding: false,
        }
    }

    /// Drop the partial line and ignore bytes up to the next newline.
    ///
    /// Call this when the transport loses a byte, so the tail of a damaged
    /// line is never spliced onto its head.
    pub fn discard(&mut self) {
        self.clear();
        self.discarding = true;
    }

    /// Feed one byte. Returns `Some` when a non-empty line completes.
    pub fn push(&mut self, byte: u8) -> Option<Result<String<N>, CommandError>> {
        match byte {
            b'\r' => None,
            b'\n' => self.finish(),
            _ if self.discarding => None,
            _ => {
                if !self.overflowed && self.buf.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Option<Result<String<N>, CommandError>> {
        if self.discarding {
            self.clear();
            return None;
        }
        if self.overflowed {
            self.clear();
            return Some(Err(CommandError::LineTooLong));
        }
        if self.buf.is_empty() {
            return None;
        }

        let result = match core::str::from_utf8(&self.buf) {
            Ok(text) => {
                let mut line = String::new();
                // Same capacity as `buf`, cannot overflow.
                let _ = line.push_str(text);
                Ok(line)
            }
            Err(_) => Err(CommandError::Malformed),
        };
        self.clear();
        Some(result)
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.overflowed = false;
        self.discarding = false;
    }
}
