//! Binary snapshot framing.
//!
//! All integers are little-endian. No padding, no compression.
//!
//! ```text
//! u32 magic "TFLD" | u16 version | u32 width | u32 height | f64 ambient | u32 count | count × f64
//! ```

use crate::error::ThermalError;

use super::snapshot::Snapshot;

pub const SNAPSHOT_MAGIC: u32 = u32::from_le_bytes(*b"TFLD");
pub const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = 4 + 2 + 4 + 4 + 8 + 4;

impl Snapshot {
    /// Encode as a binary blob. Rows must be complete: a ragged snapshot
    /// cannot be framed as a flat `width * height` array.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ThermalError> {
        let dims = self.dims()?;
        if self.cells.len() != dims.height() as usize
            || self.cells.iter().any(|row| row.len() != dims.width() as usize)
        {
            return Err(ThermalError::malformed("ragged rows cannot be encoded"));
        }
        let count = u32::try_from(dims.cell_count())
            .map_err(|_| ThermalError::malformed("too many cells for u32 count"))?;

        let mut out = Vec::with_capacity(HEADER_LEN + dims.cell_count() * 8);
        out.extend_from_slice(&SNAPSHOT_MAGIC.to_le_bytes());
        out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.ambient_temperature.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        for row in &self.cells {
            for t in row {
                out.extend_from_slice(&t.to_le_bytes());
            }
        }
        Ok(out)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ThermalError> {
        let mut r = ByteReader::new(data);

        if r.read_u32()? != SNAPSHOT_MAGIC {
            return Err(ThermalError::malformed("bad magic"));
        }
        let version = r.read_u16()?;
        if version > SNAPSHOT_VERSION {
            return Err(ThermalError::malformed(format!(
                "unsupported version {version} (max {SNAPSHOT_VERSION})"
            )));
        }

        let width = r.read_u32()?;
        let height = r.read_u32()?;
        let ambient_temperature = r.read_f64()?;
        let count = r.read_u32()? as usize;

        let expected = (width as usize).checked_mul(height as usize);
        if width == 0 || height == 0 || expected != Some(count) {
            return Err(ThermalError::malformed(format!(
                "cell count {count} does not match {width}x{height}"
            )));
        }
        if count.checked_mul(8).map_or(true, |n| r.remaining() < n) {
            return Err(ThermalError::malformed("truncated cell data"));
        }

        let mut cells = Vec::with_capacity(height as usize);
        for _ in 0..height {
            let mut row = Vec::with_capacity(width as usize);
            for _ in 0..width {
                row.push(r.read_f64()?);
            }
            cells.push(row);
        }

        Ok(Snapshot {
            width,
            height,
            ambient_temperature,
            cells,
        })
    }
}

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ThermalError> {
        let end = self.pos + N;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| ThermalError::malformed("read past end of buffer"))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    fn read_u16(&mut self) -> Result<u16, ThermalError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    fn read_u32(&mut self) -> Result<u32, ThermalError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn read_f64(&mut self) -> Result<f64, ThermalError> {
        Ok(f64::from_le_bytes(self.take()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            width: 3,
            height: 2,
            ambient_temperature: 18.25,
            cells: vec![vec![1.0, -2.5, 3.0], vec![1000.0, -273.15, 0.0]],
        }
    }

    #[test]
    fn header_layout() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"TFLD");
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), SNAPSHOT_VERSION);
        assert_eq!(bytes.len(), HEADER_LEN + 6 * 8);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let snapshot = sample();
        let decoded = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn rejects_bad_magic_and_newer_version() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes[0] = b'X';
        assert!(Snapshot::from_bytes(&bytes).is_err());

        let mut bytes = sample().to_bytes().unwrap();
        bytes[4..6].copy_from_slice(&(SNAPSHOT_VERSION + 1).to_le_bytes());
        assert!(Snapshot::from_bytes(&bytes).is_err());
    }

    #[test]
    fn rejects_truncated_buffer() {
        let bytes = sample().to_bytes().unwrap();
        for len in [0, 3, HEADER_LEN - 1, bytes.len() - 1] {
            assert!(
                matches!(
                    Snapshot::from_bytes(&bytes[..len]),
                    Err(ThermalError::MalformedSnapshot { .. })
                ),
                "len {len}"
            );
        }
    }

    #[test]
    fn rejects_count_mismatch() {
        let mut bytes = sample().to_bytes().unwrap();
        let count_at = HEADER_LEN - 4;
        bytes[count_at..HEADER_LEN].copy_from_slice(&5u32.to_le_bytes());
        assert!(Snapshot::from_bytes(&bytes).is_err());
    }

    #[test]
    fn ragged_snapshot_cannot_be_encoded() {
        let mut snapshot = sample();
        snapshot.cells[1].pop();
        assert!(snapshot.to_bytes().is_err());
    }
}
