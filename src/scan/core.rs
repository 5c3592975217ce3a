use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use memchr::memchr_iter;

use crate::partition::FileRegion;

/// Whitespace lookup table for branchless token boundary detection.
/// C locale `isspace()`: space, tab, newline, CR, form feed, vertical tab.
const fn make_ws_table() -> [u8; 256] {
    let mut t = [0u8; 256];
    t[0x09] = 1; // \t  horizontal tab
    t[0x0A] = 1; // \n  newline
    t[0x0B] = 1; // \v  vertical tab
    t[0x0C] = 1; // \f  form feed
    t[0x0D] = 1; // \r  carriage return
    t[0x20] = 1; //     space
    t
}

/// Precomputed whitespace lookup: `WS_TABLE[byte] == 1` if whitespace.
const WS_TABLE: [u8; 256] = make_ws_table();

/// True if `b` is an ASCII whitespace byte (token delimiter).
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    WS_TABLE[b as usize] != 0
}

/// Reads the whitespace-delimited tokens *owned* by one file region.
///
/// Ownership rule: a token belongs to the region containing its first
/// byte. Two consequences fall out of that single rule:
///
/// - A region whose start lands inside a token must skip the token's tail
///   fragment (the previous region owns it). `new` detects this by peeking
///   the byte at `start - 1`: only when that byte is non-whitespace does a
///   token actually straddle the boundary. A region starting exactly on a
///   token's first byte keeps the token.
/// - The last token owned by a region may extend past `end`; it is read to
///   completion here, and the next region's hand-off skips its tail.
///
/// Reading past `end` to finish an owned token is the only overrun; no
/// token starting at or after `end` is ever claimed.
pub struct TokenScanner<R> {
    reader: BufReader<R>,
    /// Absolute file offset of the next unread byte.
    pos: u64,
    /// Region end: tokens starting at or after this offset are not ours.
    end: u64,
}

impl<R: Read + Seek> TokenScanner<R> {
    /// Position `inner` for `region` and resolve the boundary hand-off.
    pub fn new(mut inner: R, region: FileRegion) -> io::Result<Self> {
        let handoff = region.start > 0;
        let seek_to = if handoff { region.start - 1 } else { 0 };
        inner.seek(SeekFrom::Start(seek_to))?;
        let mut scanner = TokenScanner {
            reader: BufReader::new(inner),
            pos: seek_to,
            end: region.end,
        };
        if handoff {
            // If the byte before our region is mid-token, the run of
            // non-whitespace reaching into our region is the tail of a
            // token whose first byte lies in the previous region.
            if let Some(b) = scanner.next_byte()? {
                if !is_whitespace(b) {
                    scanner.skip_token_tail()?;
                }
            }
        }
        Ok(scanner)
    }

    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.reader.consume(1);
                    self.pos += 1;
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Consume bytes up to and including the next whitespace byte or EOF.
    fn skip_token_tail(&mut self) -> io::Result<()> {
        while let Some(b) = self.next_byte()? {
            if is_whitespace(b) {
                break;
            }
        }
        Ok(())
    }

    /// Read the next owned token into `buf`. Returns `false` once no token
    /// starting inside `[start, end)` remains (region exhausted or EOF).
    pub fn next_token(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        // Skip the delimiter run. `self.pos` is the offset of the byte we
        // are about to read, so the check runs against each candidate
        // token-start offset before the byte is consumed.
        loop {
            if self.pos >= self.end {
                return Ok(false);
            }
            match self.next_byte()? {
                None => return Ok(false),
                Some(b) if is_whitespace(b) => continue,
                Some(b) => {
                    buf.push(b);
                    break;
                }
            }
        }
        // First byte is inside the region: the token is ours in full, even
        // where it runs past `end`.
        while let Some(b) = self.next_byte()? {
            if is_whitespace(b) {
                break;
            }
            buf.push(b);
        }
        Ok(true)
    }
}

/// Count the tokens owned by `region`, reading from this worker's own
/// handle. Boundary attribution follows [`TokenScanner`].
pub fn count_region_words<R: Read + Seek>(inner: R, region: FileRegion) -> io::Result<u64> {
    let mut scanner = TokenScanner::new(inner, region)?;
    let mut words = 0u64;
    let mut buf = Vec::with_capacity(64);
    while scanner.next_token(&mut buf)? {
        words += 1;
    }
    Ok(words)
}

/// Count `\n` bytes in `[region.start, region.end)` using SIMD memchr.
///
/// No hand-off logic: a newline is a single byte, so the half-open bounds
/// alone guarantee each newline is owned by exactly one region.
pub fn count_region_lines<R: Read + Seek>(mut inner: R, region: FileRegion) -> io::Result<u64> {
    if region.is_empty() {
        return Ok(0);
    }
    inner.seek(SeekFrom::Start(region.start))?;

    let mut lines = 0u64;
    let mut remaining = region.len();
    let mut buf = vec![0u8; 64 * 1024];
    while remaining > 0 {
        let want = buf.len().min(remaining.min(usize::MAX as u64) as usize);
        let n = match inner.read(&mut buf[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        lines += memchr_iter(b'\n', &buf[..n]).count() as u64;
        remaining -= n as u64;
    }
    Ok(lines)
}
