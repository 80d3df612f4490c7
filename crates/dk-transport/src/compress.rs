use crate::error::TransportError;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use byteorder::BE;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Read;
use std::io::Write;

/// Compress `data`, prefixing the deflate stream with the uncompressed
/// length as a big-endian u32, matching the original transport's
/// `qCompress` wire shape so the compression flag alone disambiguates the
/// body on receipt.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 2 + 4);
    out.write_u32::<BE>(data.len() as u32).expect("write to Vec cannot fail");
    let mut encoder = ZlibEncoder::new(out, Compression::best());
    encoder.write_all(data).expect("write to Vec cannot fail");
    encoder.finish().expect("write to Vec cannot fail")
}

/// Inverse of `compress`. Fails if the stream is malformed or the
/// decompressed length disagrees with the declared prefix.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut cursor = data;
    let declared_len = cursor
        .read_u32::<BE>()
        .map_err(|_| TransportError::DecompressionFailed)? as usize;
    let mut decoder = ZlibDecoder::new(cursor);
    let mut out = Vec::with_capacity(declared_len);
    decoder
        .read_to_end(&mut out)
        .map_err(|_| TransportError::DecompressionFailed)?;
    if out.len() != declared_len {
        return Err(TransportError::DecompressionFailed);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
        let compressed = compress(&data);
        let restored = decompress(&compressed).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn corrupt_stream_fails() {
        let data = b"hello world".to_vec();
        let mut compressed = compress(&data);
        let last = compressed.len() - 1;
        compressed[last] ^= 0xFF;
        assert!(decompress(&compressed).is_err());
    }
}
