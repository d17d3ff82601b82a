use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ephem_core::EphemerisError;
use ephem_core::Result;
use std::io::{Cursor, Read, Seek, SeekFrom};

/// On-disk byte order of the fixed-width fields in the constant area.
/// Determined once, during header parsing, from the endianness sentinel,
/// then threaded into every subsequent read. A `BigEndian` read of the raw
/// bytes is equivalent to a `LittleEndian` read of the byte-reversed
/// bytes, so one enum covers both "this file is big-endian" and "this
/// file's bytes are swapped" without a separate reorder flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// A cursor-based reader over one SE1 file image. Endianness is
/// negotiated once (by the header parser) and then threaded in
/// explicitly on every call, rather than mutated behind the reader's
/// back — concurrent `position()` calls against one handle at least
/// don't trip over a shared, silently-reinterpreting cursor.
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
    size: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    /// Create a reader assuming little-endian data. Callers doing header
    /// parsing use this to bootstrap, then call
    /// [`ByteReader::set_byte_order`] once the sentinel has been checked.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            size: data.len(),
            cursor: Cursor::new(data),
            endian: Endian::Little,
        }
    }

    pub fn with_byte_order(data: &'a [u8], endian: Endian) -> Self {
        Self {
            size: data.len(),
            cursor: Cursor::new(data),
            endian,
        }
    }

    pub fn set_byte_order(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn pos(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.size.saturating_sub(self.pos())
    }

    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.size {
            return Err(EphemerisError::ShortRead {
                requested: pos,
                available: self.size,
            });
        }
        self.cursor.seek(SeekFrom::Start(pos as u64))?;
        Ok(())
    }

    /// Read `size * count` bytes and return the span, advancing the cursor.
    pub fn read_raw(&mut self, size: usize, count: usize) -> Result<Vec<u8>> {
        let n = size * count;
        if self.remaining() < n {
            return Err(EphemerisError::ShortRead {
                requested: n,
                available: self.remaining(),
            });
        }
        let mut buf = vec![0u8; n];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Consume bytes up to the next CR LF and return the preceding span as
    /// text. Used only by the header's three banner lines.
    pub fn read_line(&mut self) -> Result<String> {
        let start = self.pos();
        let data = *self.cursor.get_ref();
        let rest = &data[start..];
        let crlf = rest
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or_else(|| EphemerisError::InvalidHeader {
                reason: "missing CRLF terminator in banner line".to_string(),
            })?;
        let line = String::from_utf8_lossy(&rest[..crlf]).into_owned();
        self.seek(start + crlf + 2)?;
        Ok(line)
    }

    /// Read a fixed-width signed integer stored on disk as `on_disk_size`
    /// bytes, zero-extended into a 4-byte target. `on_disk_size` must be
    /// 1..=4. When `on_disk_size < 4` the raw bytes are placed into the
    /// low bytes of a little-endian target (little-endian files) or the
    /// high bytes of a big-endian target (big-endian files) — see the
    /// header parser for the 3-byte segment offset case.
    pub fn read_int(&mut self, on_disk_size: usize) -> Result<i32> {
        let raw = self.read_raw(on_disk_size, 1)?;
        let mut buf = [0u8; 4];
        match self.endian {
            Endian::Little => {
                buf[..on_disk_size].copy_from_slice(&raw);
                Ok(LittleEndian::read_i32(&buf))
            }
            Endian::Big => {
                buf[4 - on_disk_size..].copy_from_slice(&raw);
                Ok(BigEndian::read_i32(&buf))
            }
        }
    }

    /// As [`ByteReader::read_int`], but for a 2-byte target (used for
    /// `nplan` and small body-id entries).
    pub fn read_short(&mut self, on_disk_size: usize) -> Result<i16> {
        let raw = self.read_raw(on_disk_size, 1)?;
        let mut buf = [0u8; 2];
        match self.endian {
            Endian::Little => {
                buf[..on_disk_size].copy_from_slice(&raw);
                Ok(LittleEndian::read_i16(&buf))
            }
            Endian::Big => {
                buf[2 - on_disk_size..].copy_from_slice(&raw);
                Ok(BigEndian::read_i16(&buf))
            }
        }
    }

    pub fn read_double(&mut self) -> Result<f64> {
        let raw = self.read_raw(8, 1)?;
        Ok(match self.endian {
            Endian::Little => LittleEndian::read_f64(&raw),
            Endian::Big => BigEndian::read_f64(&raw),
        })
    }

    pub fn read_double_array(&mut self, count: usize) -> Result<Vec<f64>> {
        (0..count).map(|_| self.read_double()).collect()
    }

    /// Read a single byte, unsigned. No endianness to negotiate.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_raw(1, 1)?[0])
    }

    /// Read a single byte, signed.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_raw(1, 1)?[0] as i8)
    }
}
