//! Whole-buffer compression for NBT documents and region chunk payloads.
//!
//! Minecraft stores standalone NBT files gzipped, and chunks inside region
//! files either gzipped or zlib-wrapped. Both are DEFLATE underneath, with
//! different framing.
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::{Decompress, FlushDecompress, Status};
use log::trace;

use crate::error::{Error, Result};

/// Output buffers grow by this much whenever inflation fills them.
const OUTPUT_INCREMENT: usize = 64 * 1024;

/// Compression framing applied to a whole buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Bytes are used as is.
    #[default]
    Uncompressed,
    /// DEFLATE with a zlib header and Adler-32 trailer.
    Zlib,
    /// DEFLATE with a gzip header and CRC-32 trailer.
    Gzip,
}

/// Inflate a whole buffer. The stream must reach its end marker: a stream
/// cut short is a [`CompressionFailure`](crate::ErrorKind::CompressionFailure),
/// not a short result.
pub fn decompress(input: &[u8], scheme: Compression) -> Result<Vec<u8>> {
    let out = match scheme {
        Compression::Uncompressed => input.to_vec(),
        Compression::Zlib => inflate_zlib(input)?,
        Compression::Gzip => inflate_gzip(input)?,
    };
    trace!(
        "decompressed {} bytes into {} ({:?})",
        input.len(),
        out.len(),
        scheme
    );
    Ok(out)
}

/// Deflate a whole buffer at the default level.
pub fn compress(input: &[u8], scheme: Compression) -> Result<Vec<u8>> {
    compress_with_level(input, scheme, flate2::Compression::default())
}

pub fn compress_with_level(
    input: &[u8],
    scheme: Compression,
    level: flate2::Compression,
) -> Result<Vec<u8>> {
    match scheme {
        Compression::Uncompressed => Ok(input.to_vec()),
        Compression::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::with_capacity(input.len() / 2), level);
            encoder.write_all(input).map_err(Error::compression)?;
            encoder.finish().map_err(Error::compression)
        }
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::with_capacity(input.len() / 2), level);
            encoder.write_all(input).map_err(Error::compression)?;
            encoder.finish().map_err(Error::compression)
        }
    }
}

fn inflate_zlib(input: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(OUTPUT_INCREMENT);

    loop {
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&input[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(Error::compression)?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError if out.len() == out.capacity() => {
                out.reserve(OUTPUT_INCREMENT);
            }
            // Room left in the output but no progress: the input ran out
            // before the end of the stream.
            Status::Ok | Status::BufError => {
                return Err(Error::compression("zlib stream ended early"));
            }
        }
    }
}

fn inflate_gzip(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(input);
    let mut out = Vec::new();
    let mut filled = 0;

    loop {
        if filled == out.len() {
            out.resize(out.len() + OUTPUT_INCREMENT, 0);
        }

        let n = decoder
            .read(&mut out[filled..])
            .map_err(Error::compression)?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    out.truncate(filled);
    Ok(out)
}
