//! One-pass block decoder.

use csspack_core::{Block, Declaration, Error, MediaRule, Result, Rule};
use csspack_huffman::{BitReader, HuffmanCoder, Token};
use tracing::{debug, trace};

use crate::grammar::{read_selector, read_str, BlockType};

/// Blocks decoded before the stream ended or failed.
///
/// Every block in `blocks` is complete; a block that failed midway is not
/// included.
#[derive(Debug)]
pub struct PartialDecode {
    pub blocks: Vec<Block>,
    pub error: Option<Error>,
}

impl PartialDecode {
    /// All blocks, or the error that stopped decoding.
    pub fn into_result(self) -> Result<Vec<Block>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.blocks),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Decode a packed stream.
///
/// Stops at the end marker. Running out of bits at a block boundary is
/// accepted as an implicit end.
pub fn decode_blocks(input: &[u8]) -> PartialDecode {
    let mut reader = BitReader::new(input, input.len() * 8);
    let mut blocks = Vec::new();

    let error = read_blocks(&mut reader, &mut blocks).err();
    debug!(
        blocks = blocks.len(),
        bits_read = reader.position(),
        failed = error.is_some(),
        "decoded stylesheet"
    );
    PartialDecode { blocks, error }
}

fn read_blocks(reader: &mut BitReader<'_>, blocks: &mut Vec<Block>) -> Result<()> {
    let coder = HuffmanCoder::deserialize(reader)?;

    while reader.has_more() {
        let block = match BlockType::read(reader)? {
            BlockType::End => return Ok(()),
            BlockType::Media => Block::Media(read_media(reader, &coder)?),
            BlockType::Raw => Block::Raw(read_str(reader)?),
        };
        trace!(position = reader.position(), "decoded block");
        blocks.push(block);
    }
    Ok(())
}

fn read_media(reader: &mut BitReader<'_>, coder: &HuffmanCoder) -> Result<MediaRule> {
    let query = read_str(reader)?;
    let mut rules = Vec::new();

    loop {
        let mut selectors = Vec::new();
        while let Some(selector) = read_selector(reader)? {
            selectors.push(selector);
        }
        // A selector list that is empty from the start closes the block.
        if selectors.is_empty() {
            break;
        }

        let mut declarations = Vec::new();
        loop {
            match coder.decode(reader)? {
                Token::Escape => break,
                Token::Property(property) => {
                    let property = property.clone();
                    let value = read_str(reader)?;
                    declarations.push(Declaration { property, value });
                }
            }
        }
        rules.push(Rule {
            selectors,
            declarations,
        });
    }

    Ok(MediaRule { query, rules })
}
