//! Splitting a markdown body into slide blocks.

use crate::{Error, Result};

/// Separator line between slides (after trimming).
const SLIDE_SEPARATOR: &str = "---";

/// Split a document body into trimmed, non-empty slide blocks.
///
/// Any line that is exactly `---` once trimmed ends the current block.
/// Blank blocks (leading or doubled separators) are dropped; a body without
/// any content fails with [`Error::EmptyDeckError`].
pub fn split_slides(body: &str) -> Result<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.lines() {
        if line.trim() == SLIDE_SEPARATOR {
            push_block(&mut blocks, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, &current);

    if blocks.is_empty() {
        return Err(Error::EmptyDeckError);
    }

    log::debug!("Split document into {} slide blocks", blocks.len());
    Ok(blocks)
}

fn push_block(blocks: &mut Vec<String>, lines: &[&str]) {
    let block = lines.join("\n");
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let blocks = split_slides("# Only slide\n\ntext").unwrap();
        assert_eq!(blocks, vec!["# Only slide\n\ntext"]);
    }

    #[test]
    fn test_k_separators_give_k_plus_one_blocks() {
        let body = "# One\n---\n# Two\n---\n# Three";
        let blocks = split_slides(body).unwrap();
        assert_eq!(blocks, vec!["# One", "# Two", "# Three"]);
    }

    #[test]
    fn test_separator_with_surrounding_whitespace() {
        let blocks = split_slides("A\n   ---   \nB\r\n\t---\r\nC").unwrap();
        assert_eq!(blocks, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_segments_dropped() {
        let body = "---\n\n# One\n---\n\n---\n   \n---\n# Two\n---\n";
        let blocks = split_slides(body).unwrap();
        assert_eq!(blocks, vec!["# One", "# Two"]);
    }

    #[test]
    fn test_longer_rules_are_content() {
        let blocks = split_slides("A\n----\nB").unwrap();
        assert_eq!(blocks, vec!["A\n----\nB"]);
    }

    #[test]
    fn test_blocks_are_trimmed() {
        let blocks = split_slides("\n\n  # Title  \n\n---\n\n body \n").unwrap();
        assert_eq!(blocks, vec!["# Title", "body"]);
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(split_slides(""), Err(Error::EmptyDeckError)));
        assert!(matches!(split_slides("  \n\n\t\n"), Err(Error::EmptyDeckError)));
        assert!(matches!(split_slides("---\n---\n  \n---"), Err(Error::EmptyDeckError)));
    }
}
