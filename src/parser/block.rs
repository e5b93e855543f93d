//! BEGIN/END block matching for procedural bodies

use super::scanner::{QuotePolicy, QuoteState};
use crate::util::is_word_byte;

/// True when `keyword` sits at `i` as a whole word (ASCII case-insensitive)
fn keyword_at(bytes: &[u8], i: usize, keyword: &[u8]) -> bool {
    let end = i + keyword.len();
    if end > bytes.len() || !bytes[i..end].eq_ignore_ascii_case(keyword) {
        return false;
    }
    let bounded_before = i == 0 || !is_word_byte(bytes[i - 1]);
    let bounded_after = end == bytes.len() || !is_word_byte(bytes[end]);
    bounded_before && bounded_after
}

/// Keywords that, on the same line after END, close a construct that never
/// opened a block (`END IF;`, `END LOOP;`)
const NON_BLOCK_CLOSERS: [&[u8]; 4] = [b"IF", b"LOOP", b"WHILE", b"REPEAT"];

/// Keywords that, on the same line after BEGIN, start a transaction rather
/// than a block (`BEGIN TRAN`)
const NON_BLOCK_OPENERS: [&[u8]; 3] = [b"TRAN", b"TRANSACTION", b"DISTRIBUTED"];

/// Whether the closer keyword ending at `i` finishes its statement: an
/// optional label, then `;` or the end of the line. `END IF @b = 2` in
/// compact T-SQL is an END followed by a new IF, not a closer.
fn closer_terminates(bytes: &[u8], i: usize) -> bool {
    let mut j = skip_blanks(bytes, i);
    while bytes.get(j).is_some_and(|&b| is_word_byte(b)) {
        j += 1;
    }
    j = skip_blanks(bytes, j);
    matches!(bytes.get(j), None | Some(b';' | b'\n' | b'\r'))
}

/// Offset of the first non-blank byte at or after `i` on the same line
fn skip_blanks(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    i
}

/// Find the end of the block opened by the BEGIN at `begin_index`.
///
/// Nested BEGIN/END pairs are counted; words such as `ENDIF` or `BEGINS`
/// are not keywords, and quoted spans are skipped. Inside a block, CASE
/// opens a level closed by its END (or `END CASE`), while `END IF` and
/// `END LOOP` close nothing and `BEGIN TRAN` opens nothing. The returned
/// offset is just past the balancing END, extended over whitespace and a
/// `;` when a terminator follows. `None` when no balancing END exists.
pub fn match_block_end(text: &str, begin_index: usize, policy: QuotePolicy) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut quotes = QuoteState::default();
    let mut depth = 0usize;
    let mut i = begin_index;

    while i < bytes.len() {
        if quotes.consume(bytes, i, policy) {
            i += 1;
            continue;
        }

        if keyword_at(bytes, i, b"BEGIN") {
            i += 5;
            let next = skip_blanks(bytes, i);
            if !NON_BLOCK_OPENERS.iter().any(|kw| keyword_at(bytes, next, kw)) {
                depth += 1;
            }
            continue;
        }

        if depth > 0 && keyword_at(bytes, i, b"CASE") {
            depth += 1;
            i += 4;
            continue;
        }

        if keyword_at(bytes, i, b"END") {
            i += 3;
            let next = skip_blanks(bytes, i);
            if let Some(closer) = NON_BLOCK_CLOSERS
                .iter()
                .find(|kw| keyword_at(bytes, next, kw))
                .filter(|kw| closer_terminates(bytes, next + kw.len()))
            {
                i = next + closer.len();
                continue;
            }
            if keyword_at(bytes, next, b"CASE") {
                i = next + 4;
            }
            // An END before any BEGIN closes nothing.
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                let after_ws = i + text[i..].len() - text[i..].trim_start().len();
                if bytes.get(after_ws) == Some(&b';') {
                    return Some(after_ws + 1);
                }
                return Some(i);
            }
            continue;
        }

        i += 1;
    }

    None
}
