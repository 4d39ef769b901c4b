//! The parser: a pushdown machine that turns a byte stream into an owned
//! [`Node`] tree.
//!
//! The machine keeps a stack of control states and a deque of partially
//! built nodes. Each turn of the loop pops one state and either reads a
//! payload, moves a completed child into its parent container, or both.
//! Containers push continuation states for their children, which is what
//! lets lists of lists and compounds of compounds nest to any depth
//! without recursion in the call stack. Input is consumed strictly left
//! to right; nothing is ever read twice and nothing is read ahead beyond
//! the tag byte that drives dispatch.
//!
//! Two entry policies exist. The *implicit root* policy ([`parse`])
//! treats the whole input as the body of a compound whose outer tag and
//! name a tool has already peeled off, which is the common on-disk
//! convention. The *explicit* policy ([`parse_explicit`]) starts at a tag
//! byte and reads the outer wrapper itself, including the root name when
//! the document is a compound.
//!
//! Malformed input fails the parse on the first fault with a classified
//! [`Error`](crate::error::Error); there is no partial tree and no
//! resynchronisation, and the position of the stream afterwards is
//! unspecified.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::frame;
use crate::input::Input;
use crate::node::{Compound, List, Node};
use crate::Tag;

/// How the outermost value of a document is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    ImplicitRoot,
    Explicit,
}

/// One control state of the machine. Data a state needs to resume after
/// its children complete rides in the variant itself.
#[derive(Debug)]
enum State {
    /// Read one tag byte and dispatch to the matching payload.
    Dispatch,
    /// Read the payload of a value whose tag is already known.
    Payload(Tag),
    /// A list element just completed: move it into the open list and
    /// keep going until the declared count is exhausted.
    ListElements { element_tag: Tag, remaining: usize },
    /// Read `tag | name | value` entries until an end tag closes the
    /// open compound. The implicit root also accepts a clean EOF here.
    CompoundEntries { accept_eof: bool },
    /// An entry's value just completed: insert it into the open
    /// compound under `name`.
    Insert { name: String },
}

struct Parser<R> {
    input: Input<R>,
    stack: Vec<State>,
    partial: VecDeque<Node>,
}

impl<R: Read> Parser<R> {
    fn new(input: Input<R>) -> Self {
        Self {
            input,
            stack: Vec::new(),
            partial: VecDeque::new(),
        }
    }

    fn run(mut self, policy: Policy) -> Result<Node> {
        match policy {
            Policy::ImplicitRoot => {
                self.partial.push_front(Node::Compound(Compound::new()));
                self.stack.push(State::CompoundEntries { accept_eof: true });
            }
            Policy::Explicit => self.stack.push(State::Dispatch),
        }

        while let Some(state) = self.stack.pop() {
            self.step(state)?;
        }

        match self.partial.pop_front() {
            Some(root) => Ok(root),
            None => unreachable!("machine accepted without producing a root"),
        }
    }

    fn step(&mut self, state: State) -> Result<()> {
        match state {
            State::Dispatch => {
                let tag = self.input.read_tag("document root")?;
                if tag == Tag::End {
                    return Err(Error::unexpected_end("document begins with an end tag"));
                }
                if tag == Tag::Compound {
                    // A full document names its root compound; the name
                    // is not part of the tree.
                    self.input.read_string()?;
                }
                self.stack.push(State::Payload(tag));
            }

            State::Payload(tag) => self.payload(tag)?,

            State::ListElements {
                element_tag,
                remaining,
            } => {
                let element = self.take_partial();
                match self.partial.front_mut() {
                    Some(Node::List(list)) => list.push(element),
                    _ => unreachable!("list element completed without an open list"),
                }
                if remaining > 1 {
                    self.stack.push(State::ListElements {
                        element_tag,
                        remaining: remaining - 1,
                    });
                    self.stack.push(State::Payload(element_tag));
                }
            }

            State::CompoundEntries { accept_eof } => {
                let tag = if accept_eof {
                    match self.input.try_read_tag("compound entry")? {
                        Some(tag) => tag,
                        // Input drained cleanly at an entry boundary: the
                        // implicit root is complete without its end tag.
                        None => return Ok(()),
                    }
                } else {
                    self.input.read_tag("compound entry")?
                };

                if tag == Tag::End {
                    // The open compound stays at the front of the deque
                    // for whoever is waiting on it.
                    return Ok(());
                }

                let name = self.input.read_string()?;
                self.stack.push(State::CompoundEntries { accept_eof });
                self.stack.push(State::Insert { name });
                self.stack.push(State::Payload(tag));
            }

            State::Insert { name } => {
                let value = self.take_partial();
                match self.partial.front_mut() {
                    Some(Node::Compound(map)) => {
                        // Wire duplicates resolve first-write-wins; the
                        // repeat was parsed to advance the stream and is
                        // dropped here.
                        map.entry(name).or_insert(value);
                    }
                    _ => unreachable!("compound entry completed without an open compound"),
                }
            }
        }

        Ok(())
    }

    /// Read one payload, pushing the finished node (or, for containers,
    /// the open node plus its continuation states).
    fn payload(&mut self, tag: Tag) -> Result<()> {
        let node = match tag {
            Tag::End => {
                // Dispatch and the compound/list headers reject End
                // before a payload is ever requested for it.
                unreachable!("end tag has no payload")
            }
            Tag::Byte => Node::Byte(self.input.read_i8()?),
            Tag::Short => Node::Short(self.input.read_i16()?),
            Tag::Int => Node::Int(self.input.read_i32()?),
            Tag::Long => Node::Long(self.input.read_i64()?),
            Tag::Float => Node::Float(self.input.read_f32()?),
            Tag::Double => Node::Double(self.input.read_f64()?),
            Tag::ByteArray => Node::ByteArray(self.input.read_byte_array()?),
            Tag::String => Node::String(self.input.read_string()?),
            Tag::IntArray => Node::IntArray(self.input.read_int_array()?),
            Tag::LongArray => Node::LongArray(self.input.read_long_array()?),

            Tag::List => {
                let element_tag = self.input.read_tag("list element type")?;
                let declared = self.input.read_i32()?;
                if element_tag == Tag::End && declared > 0 {
                    return Err(Error::unexpected_end(
                        "list declares elements but no element type",
                    ));
                }

                // Negative counts mean empty, same as the arrays.
                let count = declared.max(0) as usize;
                self.partial
                    .push_front(Node::List(List::with_capacity(element_tag, count)));
                if count > 0 {
                    self.stack.push(State::ListElements {
                        element_tag,
                        remaining: count,
                    });
                    self.stack.push(State::Payload(element_tag));
                }
                return Ok(());
            }

            Tag::Compound => {
                self.partial.push_front(Node::Compound(Compound::new()));
                self.stack.push(State::CompoundEntries { accept_eof: false });
                return Ok(());
            }
        };

        self.partial.push_front(node);
        Ok(())
    }

    fn take_partial(&mut self) -> Node {
        match self.partial.pop_front() {
            Some(node) => node,
            None => unreachable!("no completed node on the partial deque"),
        }
    }
}

/// Parse uncompressed NBT under the implicit-root policy: the input is
/// the body of a compound whose outer tag byte and name have already
/// been stripped. Returns that compound.
///
/// ```
/// use nbtree::parse;
///
/// // Body with one entry: "pi" -> Float.
/// let doc = [
///     0x05, 0x00, 0x02, b'p', b'i', 0x40, 0x49, 0x0F, 0xDB, // entry
///     0x00, // end of body
/// ];
///
/// let root = parse(&doc[..]).unwrap();
/// let pi = root.as_compound().unwrap().at("pi").unwrap().as_float().unwrap();
/// assert!((pi - 3.14159274).abs() < f32::EPSILON);
/// ```
pub fn parse<R: Read>(reader: R) -> Result<Node> {
    Parser::new(Input::new(reader)).run(Policy::ImplicitRoot)
}

/// Parse uncompressed NBT under the explicit policy: the first input
/// byte is the root's tag. A compound root carries its name, which is
/// read and discarded; any other tag is a bare value.
///
/// ```
/// use nbtree::parse_explicit;
///
/// let root = parse_explicit(&[0x01, 0x2A][..]).unwrap();
/// assert_eq!(root.as_byte().unwrap(), 42);
/// ```
pub fn parse_explicit<R: Read>(reader: R) -> Result<Node> {
    Parser::new(Input::new(reader)).run(Policy::Explicit)
}

/// Detect the transport framing (raw, gzip or zlib) from the first
/// bytes of the stream, decompress if needed, and parse under the
/// implicit-root policy.
///
/// ```
/// use flate2::{write::GzEncoder, Compression};
/// use nbtree::parse_auto;
/// use std::io::Write;
///
/// let doc = [0x01, 0x00, 0x01, b'b', 0x07, 0x00];
/// let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
/// encoder.write_all(&doc).unwrap();
/// let compressed = encoder.finish().unwrap();
///
/// let root = parse_auto(compressed.as_slice()).unwrap();
/// assert_eq!(root.as_compound().unwrap().at("b").unwrap().as_byte().unwrap(), 7);
/// ```
pub fn parse_auto<R: Read>(reader: R) -> Result<Node> {
    parse(frame::detect(reader)?)
}

/// [`parse_auto`] over an in-memory buffer.
pub fn parse_bytes(bytes: &[u8]) -> Result<Node> {
    parse_auto(bytes)
}

/// [`parse_auto`] over a file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let file = File::open(path)?;
    parse_auto(BufReader::new(file))
}
