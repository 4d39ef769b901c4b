//! nbtree reads NBT data from *Minecraft: Java Edition* into an owned tree
//! of typed [`Node`] values. The game uses this format for world data,
//! player inventories and most other things it stores on disk.
//!
//! * For the parse entry points see [`parse`], [`parse_auto`],
//!   [`parse_bytes`] and [`parse_file`].
//! * For navigating a parsed tree see [`Node`] and the view types
//!   [`ListView`], [`ListOf`] and [`CompoundView`].
//! * For error classification see [`error::ErrorKind`].
//!
//! ```toml
//! [dependencies]
//! nbtree = "0.3"
//! ```
//!
//! # Parsing and navigating
//!
//! Parsing produces a single root [`Node`] that owns the whole tree.
//! Typed accessors extract primitives, and the container views present
//! lists and compounds as ordinary read-only sequences and maps:
//!
//! ```
//! use nbtree::{parse_bytes, error::Result};
//!
//! fn main() -> Result<()> {
//!     // A document with one entry: "answer" -> Short(42).
//!     let doc = [
//!         0x02, 0x00, 0x06, b'a', b'n', b's', b'w', b'e', b'r', // tag, name
//!         0x00, 0x2A, // payload
//!         0x00, // end of the root compound
//!     ];
//!
//!     let root = parse_bytes(&doc)?;
//!     let root = root.as_compound()?;
//!     assert_eq!(root.at("answer")?.as_short()?, 42);
//!     Ok(())
//! }
//! ```
//!
//! # Compression
//!
//! Files written by the game are usually gzip- or zlib-compressed.
//! [`parse_auto`] (and the conveniences built on it) sniffs the first two
//! bytes of the input and decompresses transparently, so callers hand it
//! raw and compressed data alike. [`parse`] and [`parse_explicit`] expect
//! an uncompressed stream.
//!
//! # Root policies
//!
//! The on-disk convention wraps a document in an outer named compound.
//! [`parse`] uses the *implicit root* policy: it assumes that wrapper has
//! already been peeled and reads a compound body directly. [`parse_explicit`]
//! reads the outer wrapper itself, and also accepts documents whose root is
//! a bare scalar or array rather than a compound.

pub mod error;
pub mod views;

mod codec;
mod frame;
mod input;
mod node;
mod parser;

pub use node::{Compound, List, Node};
pub use parser::{parse, parse_auto, parse_bytes, parse_explicit, parse_file};
pub use views::{CompoundView, ListOf, ListView};

#[cfg(test)]
mod test;

/// An NBT tag, the 1-byte discriminant that precedes every value on the
/// wire. Carries neither the value nor its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Terminates a Compound body. Never materialised as a node.
    End = 0,
    /// Signed 8-bit integer.
    Byte = 1,
    /// Signed 16-bit integer.
    Short = 2,
    /// Signed 32-bit integer.
    Int = 3,
    /// Signed 64-bit integer.
    Long = 4,
    /// IEEE-754 binary32.
    Float = 5,
    /// IEEE-754 binary64.
    Double = 6,
    /// Length-prefixed run of signed bytes.
    ByteArray = 7,
    /// Length-prefixed modified-UTF-8 text.
    String = 8,
    /// Homogeneous sequence of unnamed values.
    List = 9,
    /// String-keyed map of named values.
    Compound = 10,
    /// Length-prefixed run of 32-bit integers.
    IntArray = 11,
    /// Length-prefixed run of 64-bit integers.
    LongArray = 12,
}

// Written out by hand; the tag set has been stable for over a decade and a
// derive crate would only add compile time.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
