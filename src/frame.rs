//! Transport framing in front of an NBT payload.
//!
//! Documents arrive raw, gzip-wrapped (RFC 1952) or zlib-wrapped
//! (RFC 1950). Classification needs at most the first two bytes; the
//! peeked bytes are chained back in front of the unconsumed stream, so
//! the parser always sees the plain payload and never learns which
//! framing carried it.

use std::io::{Cursor, Read};

use flate2::read::{GzDecoder, ZlibDecoder};
use log::debug;

use crate::error::Result;

/// Framing detected on an input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Framing {
    Raw,
    Gzip,
    Zlib,
}

type Rewound<R> = std::io::Chain<Cursor<Vec<u8>>, R>;

pub(crate) enum FramedReader<R: Read> {
    Raw(Rewound<R>),
    Gzip(GzDecoder<Rewound<R>>),
    Zlib(ZlibDecoder<Rewound<R>>),
}

impl<R: Read> FramedReader<R> {
    #[cfg(test)]
    pub(crate) fn framing(&self) -> Framing {
        match self {
            FramedReader::Raw(_) => Framing::Raw,
            FramedReader::Gzip(_) => Framing::Gzip,
            FramedReader::Zlib(_) => Framing::Zlib,
        }
    }
}

impl<R: Read> Read for FramedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            FramedReader::Raw(r) => r.read(buf),
            FramedReader::Gzip(r) => r.read(buf),
            FramedReader::Zlib(r) => r.read(buf),
        }
    }
}

/// Classify the stream's framing and wrap it in the matching decoder.
///
/// Raw NBT starts with a tag byte in `0x00..=0x0C`, which collides with
/// neither the gzip magic `1F 8B` nor a zlib header `78 xx`, so two bytes
/// decide. Inputs shorter than two bytes are necessarily raw (and will
/// fail in the parser with a truncation error if non-empty).
pub(crate) fn detect<R: Read>(mut reader: R) -> Result<FramedReader<R>> {
    let mut magic = [0u8; 2];
    let got = read_up_to(&mut reader, &mut magic)?;

    let framing = match &magic[..got] {
        [0x1F, 0x8B] => Framing::Gzip,
        [0x78, level] if matches!(level, 0x01 | 0x9C | 0xDA) => Framing::Zlib,
        _ => Framing::Raw,
    };
    debug!("detected {framing:?} framing");

    let rewound = Cursor::new(magic[..got].to_vec()).chain(reader);
    Ok(match framing {
        Framing::Raw => FramedReader::Raw(rewound),
        Framing::Gzip => FramedReader::Gzip(GzDecoder::new(rewound)),
        Framing::Zlib => FramedReader::Zlib(ZlibDecoder::new(rewound)),
    })
}

/// Fill as much of `buf` as the stream has, stopping early at EOF.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
