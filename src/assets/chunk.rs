//! Chunked binary container reader
//!
//! A blob is a sequence of chunks, each an 8-byte header followed by its
//! payload:
//!
//! ```text
//! magic: [u8; 4]   e.g. b"str0"
//! size:  u32 (LE)  payload length in bytes
//! data:  [u8; size]
//! ```
//!
//! Chunks are read in order; each read names the magic it expects.

use bytemuck::Pod;

use crate::error::FormatError;

const HEADER_LEN: usize = 8;

/// Cursor over the chunks of an in-memory blob
pub struct ChunkReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Reads the next chunk's raw payload, checking its magic
    pub fn read_bytes(&mut self, magic: &[u8; 4]) -> Result<&'a [u8], FormatError> {
        let data: &'a [u8] = self.data;
        let remaining = &data[self.offset..];
        if remaining.len() < HEADER_LEN {
            return Err(FormatError::Truncated {
                what: format!("'{}' chunk header", display_magic(magic)),
                needed: HEADER_LEN,
                available: remaining.len(),
            });
        }

        let (header, rest) = remaining.split_at(HEADER_LEN);
        if &header[..4] != magic {
            return Err(FormatError::ChunkMagic {
                expected: display_magic(magic),
                found: display_magic(&header[..4]),
            });
        }

        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        if rest.len() < size {
            return Err(FormatError::Truncated {
                what: format!("'{}' chunk", display_magic(magic)),
                needed: size,
                available: rest.len(),
            });
        }

        self.offset += HEADER_LEN + size;
        Ok(&rest[..size])
    }

    /// Reads the next chunk as an array of fixed-size records
    ///
    /// # Errors
    /// [`FormatError::ChunkSize`] if the payload is not a whole number of
    /// records, plus everything [`read_bytes`](Self::read_bytes) reports.
    pub fn read_records<T: Pod>(&mut self, magic: &[u8; 4]) -> Result<Vec<T>, FormatError> {
        let bytes = self.read_bytes(magic)?;
        let record_size = std::mem::size_of::<T>();
        if bytes.len() % record_size != 0 {
            return Err(FormatError::ChunkSize {
                magic: display_magic(magic),
                size: bytes.len(),
                record_size,
            });
        }

        // Payloads carry no alignment guarantee, so copy record by record
        Ok(bytes
            .chunks_exact(record_size)
            .map(bytemuck::pod_read_unaligned)
            .collect())
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }
}

/// Serializes one chunk; the inverse of [`ChunkReader::read_bytes`]
pub fn write_chunk(out: &mut Vec<u8>, magic: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(magic);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
}

/// Checks a `[begin, end)` name range against the string table and slices it
pub(crate) fn name_slice(
    strings: &[u8],
    index: usize,
    begin: u32,
    end: u32,
) -> Result<String, FormatError> {
    if !(begin <= end && end as usize <= strings.len()) {
        return Err(FormatError::NameRange {
            index,
            begin,
            end,
            len: strings.len(),
        });
    }

    String::from_utf8(strings[begin as usize..end as usize].to_vec())
        .map_err(|_| FormatError::NameEncoding { index })
}

fn display_magic(magic: &[u8]) -> String {
    String::from_utf8_lossy(magic).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_chunks_in_order() {
        let mut blob = Vec::new();
        write_chunk(&mut blob, b"str0", b"hello");
        write_chunk(&mut blob, b"num0", bytemuck::cast_slice(&[1u32, 2, 3]));

        let mut reader = ChunkReader::new(&blob);
        assert_eq!(reader.read_bytes(b"str0").unwrap(), b"hello");
        assert_eq!(reader.read_records::<u32>(b"num0").unwrap(), vec![1, 2, 3]);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut blob = Vec::new();
        write_chunk(&mut blob, b"abcd", b"");

        let err = ChunkReader::new(&blob).read_bytes(b"str0").unwrap_err();
        assert!(matches!(err, FormatError::ChunkMagic { .. }));
    }

    #[test]
    fn test_partial_record_rejected() {
        let mut blob = Vec::new();
        write_chunk(&mut blob, b"num0", &[0u8; 10]);

        let err = ChunkReader::new(&blob).read_records::<u32>(b"num0").unwrap_err();
        assert!(matches!(
            err,
            FormatError::ChunkSize {
                size: 10,
                record_size: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let mut blob = Vec::new();
        write_chunk(&mut blob, b"str0", b"hello");
        blob.truncate(blob.len() - 2);

        let err = ChunkReader::new(&blob).read_bytes(b"str0").unwrap_err();
        assert!(matches!(
            err,
            FormatError::Truncated {
                needed: 5,
                available: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_name_range_checks() {
        let strings = b"BaseLink1";
        assert_eq!(name_slice(strings, 0, 4, 9).unwrap(), "Link1");
        assert_eq!(name_slice(strings, 0, 9, 9).unwrap(), "");
        assert!(matches!(
            name_slice(strings, 3, 5, 4),
            Err(FormatError::NameRange { index: 3, .. })
        ));
        assert!(matches!(
            name_slice(strings, 1, 0, 10),
            Err(FormatError::NameRange { len: 9, .. })
        ));
    }
}
