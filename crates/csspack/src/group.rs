//! Grouping of top-level stylesheet nodes into blocks.

use csspack_core::{Block, CodecConfig, MediaRule, Minifier, Node, Result, Stylesheet};
use tracing::trace;

/// Turn a stylesheet into the block sequence the encoder emits.
///
/// Runs of consecutive top-level rules share one media block with an empty
/// query. Media rules pass through as their own block. Any other node is
/// handed to `minifier` and becomes a raw block, dropped when the minified
/// text is empty and `config.skip_empty_raw` is set.
pub fn group_blocks(
    sheet: &Stylesheet,
    minifier: &dyn Minifier,
    config: &CodecConfig,
) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut pending: Option<MediaRule> = None;

    for node in &sheet.nodes {
        match node {
            Node::Rule(rule) => {
                pending
                    .get_or_insert_with(|| MediaRule::new(""))
                    .rules
                    .push(rule.clone());
            }
            Node::Media(media) => {
                blocks.extend(pending.take().map(Block::Media));
                blocks.push(Block::Media(media.clone()));
            }
            Node::Other(source) => {
                blocks.extend(pending.take().map(Block::Media));
                let text = minifier.minify(source)?;
                if text.is_empty() && config.skip_empty_raw {
                    trace!("dropping empty raw block");
                    continue;
                }
                blocks.push(Block::Raw(text));
            }
        }
    }
    blocks.extend(pending.take().map(Block::Media));

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csspack_core::{Error, Rule};

    fn identity(s: &str) -> Result<String> {
        Ok(s.trim().to_string())
    }

    #[test]
    fn test_consecutive_rules_share_a_block() {
        let sheet = Stylesheet::new()
            .rule(Rule::new(["a"]))
            .rule(Rule::new(["b"]))
            .media(MediaRule::new("print").rule(Rule::new(["c"])))
            .rule(Rule::new(["d"]));

        let blocks = group_blocks(&sheet, &identity, &CodecConfig::default()).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], Block::Media(m) if m.query.is_empty() && m.rules.len() == 2));
        assert!(matches!(&blocks[1], Block::Media(m) if m.query == "print"));
        assert!(matches!(&blocks[2], Block::Media(m) if m.query.is_empty() && m.rules.len() == 1));
    }

    #[test]
    fn test_other_nodes_become_raw() {
        let sheet = Stylesheet::new()
            .other("  @import url(a.css);  ")
            .rule(Rule::new(["a"]))
            .other("   ")
            .rule(Rule::new(["b"]));

        let blocks = group_blocks(&sheet, &identity, &CodecConfig::default()).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Raw("@import url(a.css);".to_string()));
        // The dropped raw block still splits the rule run.
        assert_eq!(blocks[1].rule_count(), 1);
        assert_eq!(blocks[2].rule_count(), 1);
    }

    #[test]
    fn test_keep_empty_raw_when_configured() {
        let config = CodecConfig {
            skip_empty_raw: false,
            ..CodecConfig::default()
        };
        let sheet = Stylesheet::new().other("");
        let blocks = group_blocks(&sheet, &identity, &config).unwrap();
        assert_eq!(blocks, vec![Block::Raw(String::new())]);
    }

    #[test]
    fn test_minifier_error_propagates() {
        let failing = |_: &str| -> Result<String> { Err(Error::minifier("unbalanced braces")) };
        let sheet = Stylesheet::new().other("@font-face {");
        let err = group_blocks(&sheet, &failing, &CodecConfig::default()).unwrap_err();
        assert_eq!(err.category(), "minifier");
    }

    #[test]
    fn test_empty_stylesheet() {
        let blocks = group_blocks(&Stylesheet::new(), &identity, &CodecConfig::default()).unwrap();
        assert!(blocks.is_empty());
    }
}
