//! Groups a document's blocks under the heading that precedes them.

use mdindex_parser::{BlockKind, BlockToken};

use crate::filter::{ContentFilter, Record};

/// Records collected under one heading text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingGroup {
    /// Normalized heading text.
    pub heading: String,
    /// Retained blocks in document order.
    pub records: Vec<Record>,
}

/// Walk a document's blocks and group retained ones by heading.
///
/// Groups keep first-seen order; a heading text that repeats continues its
/// existing group. Blocks before the first heading or after an ignored
/// heading are dropped.
pub fn group_blocks(blocks: &[BlockToken], filter: &ContentFilter) -> Vec<HeadingGroup> {
    let mut groups: Vec<HeadingGroup> = Vec::new();
    let mut cursor: Option<usize> = None;

    for block in blocks {
        if let BlockKind::Heading { .. } = block.kind {
            let heading = filter.heading_text(block);

            if filter.ignores_heading(&heading) {
                cursor = None;
                continue;
            }

            let position = match groups.iter().position(|g| g.heading == heading) {
                Some(position) => position,
                None => {
                    groups.push(HeadingGroup {
                        heading,
                        records: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            cursor = Some(position);
            continue;
        }

        let Some(position) = cursor else {
            continue;
        };

        if let Some(record) = filter.record(block) {
            groups[position].records.push(record);
        }
    }

    groups
}
