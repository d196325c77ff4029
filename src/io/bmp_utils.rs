// Copyright @yucwang 2026

use byteorder::{LittleEndian, WriteBytesExt};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
const BMP_SIGNATURE: u16 = 0x4d42;

/// Writes an uncompressed 32-bit BMP. `bgra` holds `width * height` pixels in
/// B, G, R, A order with the bottom row first.
pub fn write_bmp<W: Write>(writer: &mut W, width: usize, height: usize, bgra: &[u8]) -> io::Result<()> {
    let image_size = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(4))
        .filter(|v| *v == bgra.len())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput,
            format!("expected {}x{} BGRA pixels, got {} bytes", width, height, bgra.len())))?;
    let too_large = || io::Error::new(io::ErrorKind::InvalidInput, "image too large for BMP");
    let image_size = u32::try_from(image_size).map_err(|_| too_large())?;
    let offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
    let file_size = offset.checked_add(image_size).ok_or_else(too_large)?;
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;

    // File header.
    writer.write_u16::<LittleEndian>(BMP_SIGNATURE)?;
    writer.write_u32::<LittleEndian>(file_size)?;
    writer.write_u16::<LittleEndian>(0)?;
    writer.write_u16::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(offset)?;

    // Info header.
    writer.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    writer.write_u32::<LittleEndian>(width)?;
    writer.write_u32::<LittleEndian>(height)?;
    writer.write_u16::<LittleEndian>(1)?;
    writer.write_u16::<LittleEndian>(32)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(image_size)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(0)?;

    writer.write_all(bgra)?;
    Ok(())
}

pub fn write_bmp_to_file<P: AsRef<Path>>(path: P, width: usize, height: usize, bgra: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_bmp(&mut writer, width, height, bgra)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn test_header_layout() {
        let pixels: Vec<u8> = (0..(3 * 2 * 4)).map(|v| v as u8).collect();
        let mut out = Vec::new();
        write_bmp(&mut out, 3, 2, &pixels).expect("write bmp");

        assert_eq!(out.len(), 54 + 24);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(u32_at(&out, 2), 78);
        assert_eq!(u16_at(&out, 6), 0);
        assert_eq!(u16_at(&out, 8), 0);
        assert_eq!(u32_at(&out, 10), 54);

        assert_eq!(u32_at(&out, 14), 40);
        assert_eq!(u32_at(&out, 18), 3);
        assert_eq!(u32_at(&out, 22), 2);
        assert_eq!(u16_at(&out, 26), 1);
        assert_eq!(u16_at(&out, 28), 32);
        assert_eq!(u32_at(&out, 30), 0);
        assert_eq!(u32_at(&out, 34), 24);
        for at in [38usize, 42, 46, 50].iter() {
            assert_eq!(u32_at(&out, *at), 0);
        }
        assert_eq!(&out[54..], pixels.as_slice());
    }

    #[test]
    fn test_rejects_wrong_buffer_size() {
        let mut out = Vec::new();
        let err = write_bmp(&mut out, 2, 2, &[0u8; 15]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join("volpath_bmp_test.bmp");
        write_bmp_to_file(&path, 1, 1, &[1, 2, 3, 255]).expect("write file");
        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(bytes.len(), 58);
        assert_eq!(&bytes[54..], &[1, 2, 3, 255]);
        let _ = std::fs::remove_file(&path);
    }
}
