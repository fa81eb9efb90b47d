//! Two-pass block encoder.
//!
//! Pass one validates every string and counts property tokens. Pass two
//! builds the Huffman coder from those counts, writes it as the preamble and
//! emits the blocks. The passes share nothing but the frequency table.

use csspack_core::{Block, CodecConfig, Error, MediaRule, Result, Rule};
use csspack_huffman::{BitStream, FrequencyTable, HuffmanCoder, Token};
use tracing::{debug, trace};

use crate::grammar::{check_selector, check_str, write_selector_end, write_str, BlockType};

/// Output of [`encode_blocks`].
#[derive(Debug, Clone)]
pub struct Encoded {
    pub stream: BitStream,
    /// Bits spent on the serialized tree.
    pub preamble_bits: usize,
    /// Distinct tokens in the Huffman alphabet, escape included.
    pub distinct_tokens: usize,
}

/// Pass one: validate `blocks` and count property tokens.
///
/// The escape token is counted once per rule, so a rule without
/// declarations still has a code to terminate with.
pub fn scan_blocks(blocks: &[Block]) -> Result<FrequencyTable> {
    let mut freq = FrequencyTable::new();
    for block in blocks {
        match block {
            Block::Media(media) => {
                check_str("media query", &media.query)?;
                for rule in &media.rules {
                    scan_rule(rule, &mut freq)?;
                }
            }
            Block::Raw(text) => check_str("raw block", text)?,
        }
    }
    Ok(freq)
}

fn scan_rule(rule: &Rule, freq: &mut FrequencyTable) -> Result<()> {
    if rule.selectors.is_empty() {
        return Err(Error::EmptySelectorList);
    }
    for selector in &rule.selectors {
        check_selector(selector)?;
    }
    for decl in &rule.declarations {
        check_str("value", &decl.value)?;
        freq.observe(Token::property(decl.property.as_str())?);
    }
    freq.observe(Token::Escape);
    Ok(())
}

/// Encode blocks into a complete stream: preamble, blocks, end marker.
pub fn encode_blocks(blocks: &[Block], config: &CodecConfig) -> Result<Encoded> {
    let freq = scan_blocks(blocks)?;
    let coder = HuffmanCoder::from_frequencies(&freq);

    let mut out = BitStream::with_block_bits(config.block_bits);
    coder.serialize(&mut out);
    let preamble_bits = out.len();

    for block in blocks {
        match block {
            Block::Media(media) => {
                BlockType::Media.write(&mut out);
                write_media(&mut out, media, &coder)?;
            }
            Block::Raw(text) => {
                BlockType::Raw.write(&mut out);
                write_str(&mut out, text);
            }
        }
        trace!(bits = out.len(), "emitted block");
    }
    BlockType::End.write(&mut out);

    debug!(
        blocks = blocks.len(),
        tokens = freq.len(),
        preamble_bits,
        total_bits = out.len(),
        "encoded stylesheet"
    );

    Ok(Encoded {
        stream: out,
        preamble_bits,
        distinct_tokens: freq.len(),
    })
}

fn write_media(out: &mut BitStream, media: &MediaRule, coder: &HuffmanCoder) -> Result<()> {
    write_str(out, &media.query);
    for rule in &media.rules {
        for selector in &rule.selectors {
            write_str(out, selector);
        }
        write_selector_end(out);

        for decl in &rule.declarations {
            coder.write(&Token::property(decl.property.as_str())?, out)?;
            write_str(out, &decl.value);
        }
        coder.write(&Token::Escape, out)?;
    }
    // An empty selector list closes the rule loop.
    write_selector_end(out);
    Ok(())
}
