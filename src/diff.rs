//! Word-level diff between an original text and its simplification
//!
//! Texts are split on whitespace and aligned with the longest-matching-block
//! (Ratcliff/Obershelp) algorithm. No junk heuristics are applied, so the same
//! inputs always produce the same segments.

use std::collections::HashMap;

const DELETE_OPEN: &str = "<del class='bg-red-100 line-through'>";
const DELETE_CLOSE: &str = "</del>";
const INSERT_OPEN: &str = "<ins class='bg-green-100'>";
const INSERT_CLOSE: &str = "</ins>";

/// One aligned span of the diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSegment {
    /// Words present in both texts
    Equal(Vec<String>),
    /// Words only in the original
    Delete(Vec<String>),
    /// Words only in the simplified text
    Insert(Vec<String>),
    /// Original words replaced by simplified words
    Replace {
        deleted: Vec<String>,
        inserted: Vec<String>,
    },
}

impl DiffSegment {
    /// Words this segment contributes to the original text
    pub fn original_words(&self) -> &[String] {
        match self {
            DiffSegment::Equal(words) | DiffSegment::Delete(words) => words,
            DiffSegment::Replace { deleted, .. } => deleted,
            DiffSegment::Insert(_) => &[],
        }
    }

    /// Words this segment contributes to the simplified text
    pub fn simplified_words(&self) -> &[String] {
        match self {
            DiffSegment::Equal(words) | DiffSegment::Insert(words) => words,
            DiffSegment::Replace { inserted, .. } => inserted,
            DiffSegment::Delete(_) => &[],
        }
    }

    fn render(&self) -> String {
        match self {
            DiffSegment::Equal(words) => join_escaped(words),
            DiffSegment::Delete(words) => wrap(DELETE_OPEN, words, DELETE_CLOSE),
            DiffSegment::Insert(words) => wrap(INSERT_OPEN, words, INSERT_CLOSE),
            DiffSegment::Replace { deleted, inserted } => format!(
                "{} {}",
                wrap(DELETE_OPEN, deleted, DELETE_CLOSE),
                wrap(INSERT_OPEN, inserted, INSERT_CLOSE)
            ),
        }
    }
}

/// Compute the aligned segments between two texts
pub fn diff_segments(original: &str, simplified: &str) -> Vec<DiffSegment> {
    let a: Vec<&str> = original.split_whitespace().collect();
    let b: Vec<&str> = simplified.split_whitespace().collect();

    let to_owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();

    opcodes(&a, &b)
        .into_iter()
        .map(|op| match op.tag {
            Tag::Equal => DiffSegment::Equal(to_owned(&a[op.a_start..op.a_end])),
            Tag::Delete => DiffSegment::Delete(to_owned(&a[op.a_start..op.a_end])),
            Tag::Insert => DiffSegment::Insert(to_owned(&b[op.b_start..op.b_end])),
            Tag::Replace => DiffSegment::Replace {
                deleted: to_owned(&a[op.a_start..op.a_end]),
                inserted: to_owned(&b[op.b_start..op.b_end]),
            },
        })
        .collect()
}

/// Render the diff as inline HTML with `<del>`/`<ins>` markers
pub fn diff_markup(original: &str, simplified: &str) -> String {
    diff_segments(original, simplified)
        .iter()
        .map(DiffSegment::render)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_escaped(words: &[String]) -> String {
    words
        .iter()
        .map(|w| html_escape::encode_text(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn wrap(open: &str, words: &[String], close: &str) -> String {
    format!("{}{}{}", open, join_escaped(words), close)
}

// ============================================================================
// Sequence alignment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Delete,
    Insert,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Opcode {
    tag: Tag,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

/// A run of `len` equal items starting at `a[a_start]` and `b[b_start]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a_start: usize,
    b_start: usize,
    len: usize,
}

/// Longest block in `a[alo..ahi]` x `b[blo..bhi]`; ties go to the earliest in `a`, then `b`.
fn longest_match(
    a: &[&str],
    b_index: &HashMap<&str, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Block {
    let mut best = Block {
        a_start: alo,
        b_start: blo,
        len: 0,
    };
    // run length of matches ending at b[j] for the previous row
    let mut run_len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next_run_len = HashMap::new();
        if let Some(positions) = b_index.get(a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run_len.insert(j, k);
                if k > best.len {
                    best = Block {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        len: k,
                    };
                }
            }
        }
        run_len = next_run_len;
    }

    best
}

fn matching_blocks(a: &[&str], b: &[&str]) -> Vec<Block> {
    let mut b_index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (j, &word) in b.iter().enumerate() {
        b_index.entry(word).or_default().push(j);
    }

    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if block.len == 0 {
            continue;
        }
        blocks.push(block);
        let (i, j, k) = (block.a_start, block.b_start, block.len);
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    blocks.sort_by_key(|block| (block.a_start, block.b_start));

    // Merge blocks that touch in both sequences
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len() + 1);
    for block in blocks {
        if let Some(last) = merged.last_mut() {
            if last.a_start + last.len == block.a_start && last.b_start + last.len == block.b_start
            {
                last.len += block.len;
                continue;
            }
        }
        merged.push(block);
    }

    merged.push(Block {
        a_start: a.len(),
        b_start: b.len(),
        len: 0,
    });
    merged
}

fn opcodes(a: &[&str], b: &[&str]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);

    for block in matching_blocks(a, b) {
        let tag = match (i < block.a_start, j < block.b_start) {
            (true, true) => Some(Tag::Replace),
            (true, false) => Some(Tag::Delete),
            (false, true) => Some(Tag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            ops.push(Opcode {
                tag,
                a_start: i,
                a_end: block.a_start,
                b_start: j,
                b_end: block.b_start,
            });
        }

        i = block.a_start + block.len;
        j = block.b_start + block.len;
        if block.len > 0 {
            ops.push(Opcode {
                tag: Tag::Equal,
                a_start: block.a_start,
                a_end: i,
                b_start: block.b_start,
                b_end: j,
            });
        }
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn original_side(segments: &[DiffSegment]) -> Vec<String> {
        segments
            .iter()
            .flat_map(|s| s.original_words().to_vec())
            .collect()
    }

    fn simplified_side(segments: &[DiffSegment]) -> Vec<String> {
        segments
            .iter()
            .flat_map(|s| s.simplified_words().to_vec())
            .collect()
    }

    #[test]
    fn test_single_word_substitution() {
        let segments = diff_segments("the cat sat", "the dog sat");
        assert_eq!(
            segments,
            vec![
                DiffSegment::Equal(words("the")),
                DiffSegment::Replace {
                    deleted: words("cat"),
                    inserted: words("dog"),
                },
                DiffSegment::Equal(words("sat")),
            ]
        );

        assert_eq!(
            diff_markup("the cat sat", "the dog sat"),
            "the <del class='bg-red-100 line-through'>cat</del> <ins class='bg-green-100'>dog</ins> sat"
        );
    }

    #[test]
    fn test_pure_delete_and_insert() {
        assert_eq!(
            diff_segments("a very big dog", "a dog"),
            vec![
                DiffSegment::Equal(words("a")),
                DiffSegment::Delete(words("very big")),
                DiffSegment::Equal(words("dog")),
            ]
        );
        assert_eq!(
            diff_markup("a dog", "a small dog"),
            "a <ins class='bg-green-100'>small</ins> dog"
        );
    }

    #[test]
    fn test_identical_and_empty_inputs() {
        assert_eq!(diff_markup("same words here", "same  words\nhere"), "same words here");
        assert!(diff_segments("", "").is_empty());
        assert_eq!(diff_markup("", ""), "");
        assert_eq!(
            diff_markup("", "new text"),
            "<ins class='bg-green-100'>new text</ins>"
        );
        assert_eq!(
            diff_markup("old text", ""),
            "<del class='bg-red-100 line-through'>old text</del>"
        );
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let segments = diff_segments("Hello, world.", "Hello world.");
        assert_eq!(
            segments,
            vec![
                DiffSegment::Replace {
                    deleted: words("Hello,"),
                    inserted: words("Hello"),
                },
                DiffSegment::Equal(words("world.")),
            ]
        );
    }

    #[test]
    fn test_markup_escapes_words() {
        assert_eq!(
            diff_markup("x < y", "x <b>"),
            "x <del class='bg-red-100 line-through'>&lt; y</del> <ins class='bg-green-100'>&lt;b&gt;</ins>"
        );
    }

    #[test]
    fn test_segments_reconstruct_both_texts() {
        let cases = [
            ("the quick brown fox jumps over the lazy dog", "the fast fox jumped over a dog"),
            ("In conclusion, the results were inconclusive.", "The results were not clear."),
            ("a b a b a b", "b a b a"),
            ("", "only new"),
            ("only old", ""),
        ];
        for (original, simplified) in cases {
            let segments = diff_segments(original, simplified);
            assert_eq!(original_side(&segments), words(original));
            assert_eq!(simplified_side(&segments), words(simplified));
        }
    }

    #[test]
    fn test_longest_block_is_preferred() {
        // "b c d" is the longest common run and anchors the alignment
        let segments = diff_segments("a b c d e", "x b c d y");
        assert_eq!(
            segments,
            vec![
                DiffSegment::Replace {
                    deleted: words("a"),
                    inserted: words("x"),
                },
                DiffSegment::Equal(words("b c d")),
                DiffSegment::Replace {
                    deleted: words("e"),
                    inserted: words("y"),
                },
            ]
        );
    }

    #[test]
    fn test_deterministic_output() {
        let original = "the the the cat the the dog the";
        let simplified = "the cat the dog the the";
        let first = diff_markup(original, simplified);
        for _ in 0..10 {
            assert_eq!(diff_markup(original, simplified), first);
        }
    }
}
