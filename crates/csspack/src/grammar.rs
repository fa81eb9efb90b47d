//! Wire-level pieces of the block grammar.

use csspack_core::{Error, Result};
use csspack_huffman::{BitReader, BitStream, ESCAPE};

/// Terminator of every string field.
pub const STRING_END: u8 = 0x00;

/// Two-bit block tag.
///
/// The first bit set means end of stream and the second bit is ignored;
/// otherwise the second bit picks media (1) or raw (0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Media,
    Raw,
    End,
}

impl BlockType {
    pub fn write(self, out: &mut BitStream) {
        let (first, second) = match self {
            BlockType::End => (true, false),
            BlockType::Media => (false, true),
            BlockType::Raw => (false, false),
        };
        out.push_bit(first);
        out.push_bit(second);
    }

    pub fn read(input: &mut BitReader<'_>) -> Result<Self> {
        if input.read_bit()? {
            if input.has_more() {
                input.read_bit()?;
            }
            return Ok(BlockType::End);
        }
        Ok(if input.read_bit()? {
            BlockType::Media
        } else {
            BlockType::Raw
        })
    }
}

/// Write a NUL-terminated string.
pub fn write_str(out: &mut BitStream, s: &str) {
    out.write_string(s);
    out.write_octet(STRING_END);
}

/// Read a NUL-terminated string.
pub fn read_str(input: &mut BitReader<'_>) -> Result<String> {
    input.read_string(STRING_END)
}

/// Close a selector list.
pub fn write_selector_end(out: &mut BitStream) {
    write_str(out, ESCAPE);
}

/// Read one selector, `None` at the end of the list.
pub fn read_selector(input: &mut BitReader<'_>) -> Result<Option<String>> {
    let selector = read_str(input)?;
    Ok((selector != ESCAPE).then_some(selector))
}

/// Reject strings that would end their field early.
pub fn check_str(context: &'static str, s: &str) -> Result<()> {
    if s.as_bytes().contains(&STRING_END) {
        return Err(Error::reserved(context, s));
    }
    Ok(())
}

/// Reject selectors that read back as the end of a selector list.
pub fn check_selector(s: &str) -> Result<()> {
    if s == ESCAPE {
        return Err(Error::reserved("selector", s));
    }
    check_str("selector", s)
}
