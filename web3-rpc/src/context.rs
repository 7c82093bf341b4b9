//! Bounded output buffer for request building.
//!
//! A [`Web3Context`] borrows a caller-allocated byte buffer and appends text
//! to it through a cursor. Every append is checked against the remaining
//! capacity: an append that would not fit fails as a whole, leaves the cursor
//! where it was, and wipes whatever the formatter had already placed in the
//! tail. One byte is always kept free so the content stays NUL-terminated.
//!
//! The buffer is zeroed when the context is created and again at the start
//! of every request, so `buf[used..]` is all zeros between calls.

use core::fmt::{self, Write};

use common::Error;

/// Request-building context over a caller-owned buffer.
pub struct Web3Context<'a> {
    buf: &'a mut [u8],
    used: usize,
    req_id: u32,
}

/// `fmt::Write` adapter that refuses to fill the last byte of its slice.
struct Cursor<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos + s.len();
        if end >= self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}

impl<'a> Web3Context<'a> {
    /// Creates a context over `buf` and zeroes it.
    ///
    /// The usable capacity is `buf.len() - 1`; the last byte is reserved for
    /// the NUL terminator.
    pub fn new(buf: &'a mut [u8]) -> Self {
        let mut ctx = Self {
            buf,
            used: 0,
            req_id: 0,
        };
        ctx.reset();
        ctx
    }

    /// Zeroes the whole buffer and rewinds the cursor.
    pub fn reset(&mut self) {
        self.buf.fill(0);
        self.used = 0;
    }

    /// Total size of the underlying buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Bytes left in the buffer, including the reserved NUL slot.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.used
    }

    /// Id that the next request will carry.
    #[inline]
    pub fn request_id(&self) -> u32 {
        self.req_id
    }

    /// Sets the id carried by subsequent requests.
    pub fn set_request_id(&mut self, id: u32) {
        self.req_id = id;
    }

    /// Advances the request id by one (wrapping) and returns the new value.
    pub fn next_request_id(&mut self) -> u32 {
        self.req_id = self.req_id.wrapping_add(1);
        self.req_id
    }

    /// The content written so far, without the NUL terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.used]
    }

    /// The content written so far as text.
    pub fn as_str(&self) -> &str {
        // everything appended is ASCII
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Appends formatted text.
    ///
    /// Fails with [`Error::BufferOverflow`] if the formatted text is not
    /// strictly shorter than [`remaining`](Self::remaining). On failure
    /// nothing is committed and the tail is left zeroed.
    pub fn append(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        let start = self.used;
        let mut cursor = Cursor {
            buf: &mut self.buf[start..],
            pos: 0,
        };
        if cursor.write_fmt(args).is_err() {
            let written = cursor.pos;
            self.buf[start..start + written].fill(0);
            log::trace!(
                "web3: append overflow ({} of {} bytes used)",
                self.used,
                self.capacity()
            );
            return Err(Error::BufferOverflow);
        }
        self.used += cursor.pos;
        Ok(())
    }

    /// Appends a string literal. Same contract as [`append`](Self::append).
    pub fn append_str(&mut self, s: &str) -> Result<(), Error> {
        if s.len() >= self.remaining() {
            log::trace!(
                "web3: append overflow ({} of {} bytes used)",
                self.used,
                self.capacity()
            );
            return Err(Error::BufferOverflow);
        }
        let end = self.used + s.len();
        self.buf[self.used..end].copy_from_slice(s.as_bytes());
        self.used = end;
        Ok(())
    }

    /// Writable space after the cursor, excluding the NUL slot.
    pub(crate) fn tail_mut(&mut self) -> &mut [u8] {
        let end = self.buf.len().saturating_sub(1).max(self.used);
        &mut self.buf[self.used..end]
    }

    /// Commits `len` bytes written directly through [`tail_mut`](Self::tail_mut).
    pub(crate) fn commit(&mut self, len: usize) {
        debug_assert!(self.used + len < self.buf.len());
        self.used += len;
    }

    /// Zeroes `len` bytes written through [`tail_mut`](Self::tail_mut) without
    /// committing them.
    pub(crate) fn discard(&mut self, len: usize) {
        let start = self.used;
        self.buf[start..start + len].fill(0);
    }
}

impl fmt::Debug for Web3Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Web3Context")
            .field("capacity", &self.capacity())
            .field("used", &self.used)
            .field("req_id", &self.req_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroes_buffer() {
        let mut buf = [0xAAu8; 16];
        let ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.used(), 0);
        assert_eq!(ctx.capacity(), 16);
        assert_eq!(ctx.request_id(), 0);
        drop(ctx);
        assert_eq!(buf, [0u8; 16]);
    }

    #[test]
    fn test_append() {
        let mut buf = [0u8; 32];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.append(format_args!("{{\"id\":{}", 7)).unwrap();
        ctx.append_str("}").unwrap();
        assert_eq!(ctx.as_str(), "{\"id\":7}");
        assert_eq!(ctx.used(), 8);
    }

    #[test]
    fn test_append_keeps_nul_slot() {
        let mut buf = [0u8; 6];
        let mut ctx = Web3Context::new(&mut buf);
        // 5 bytes fit in a 6-byte buffer
        ctx.append_str("abcde").unwrap();
        assert_eq!(ctx.remaining(), 1);
        assert_eq!(ctx.append_str("f"), Err(Error::BufferOverflow));

        let mut buf = [0u8; 5];
        let mut ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.append_str("abcde"), Err(Error::BufferOverflow));
        assert_eq!(ctx.used(), 0);
    }

    #[test]
    fn test_failed_append_leaves_tail_zeroed() {
        let mut buf = [0u8; 12];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.append_str("ab").unwrap();
        // the first pieces fit, the last does not
        let res = ctx.append(format_args!("{}{}{}", "cdef", "ghij", "klmn"));
        assert_eq!(res, Err(Error::BufferOverflow));
        assert_eq!(ctx.used(), 2);
        assert_eq!(ctx.as_str(), "ab");
        drop(ctx);
        assert!(buf[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reset() {
        let mut buf = [0u8; 16];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.append_str("hello").unwrap();
        ctx.reset();
        assert_eq!(ctx.used(), 0);
        assert_eq!(ctx.as_bytes(), b"");
        drop(ctx);
        assert_eq!(buf, [0u8; 16]);
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf = [0u8; 0];
        let mut ctx = Web3Context::new(&mut buf);
        assert_eq!(ctx.append_str(""), Err(Error::BufferOverflow));
        assert_eq!(ctx.tail_mut().len(), 0);
    }

    #[test]
    fn test_request_id() {
        let mut buf = [0u8; 4];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.set_request_id(41);
        assert_eq!(ctx.next_request_id(), 42);
        assert_eq!(ctx.request_id(), 42);
        ctx.set_request_id(u32::MAX);
        assert_eq!(ctx.next_request_id(), 0);
    }

    #[test]
    fn test_tail_and_commit() {
        let mut buf = [0u8; 8];
        let mut ctx = Web3Context::new(&mut buf);
        ctx.append_str("ab").unwrap();
        let tail = ctx.tail_mut();
        assert_eq!(tail.len(), 5);
        tail[..3].copy_from_slice(b"cde");
        ctx.commit(3);
        assert_eq!(ctx.as_str(), "abcde");
    }
}
