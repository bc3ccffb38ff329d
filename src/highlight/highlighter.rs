//! Row classification state machine and the cross-row comment cascade.

use tracing::trace;

use super::class::Highlight;
use super::syntax::{HighlightFlags, Keyword, LanguageProfile, is_separator};
use crate::text::Row;

/// Classify one row of rendered text.
///
/// `open_comment` is the block-comment state carried in from the previous
/// row. Returns one class per byte of `render` and the state at the end of
/// the row. Without a profile every byte is [`Highlight::Normal`] and no
/// comment is ever open.
#[must_use]
pub fn highlight_line(
    render: &[u8],
    profile: Option<&LanguageProfile>,
    open_comment: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(profile) = profile else {
        return (hl, false);
    };

    let line_comment = profile
        .single_line_comment
        .map(str::as_bytes)
        .filter(|marker| !marker.is_empty());
    let block_comment = profile
        .block_comment
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()))
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());
    let strings = profile.flags.contains(HighlightFlags::STRINGS);
    let numbers = profile.flags.contains(HighlightFlags::NUMBERS);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = open_comment;

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let rest = &render[i..];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(marker) = line_comment {
            if in_string.is_none() && !in_comment && rest.starts_with(marker) {
                hl[i..].fill(Highlight::Comment);
                break;
            }
        }

        if let Some((start, end)) = block_comment {
            if in_string.is_none() {
                if in_comment {
                    if rest.starts_with(end) {
                        hl[i..i + end.len()].fill(Highlight::BlockComment);
                        i += end.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        hl[i] = Highlight::BlockComment;
                        i += 1;
                    }
                    continue;
                } else if rest.starts_with(start) {
                    hl[i..i + start.len()].fill(Highlight::BlockComment);
                    i += start.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some(keyword) = match_keyword(rest, profile.keywords) {
                let len = keyword.text.len();
                hl[i..i + len].fill(keyword.class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

/// First keyword in table order that starts `rest` and is followed by a
/// separator or the end of the row.
fn match_keyword<'k>(rest: &[u8], keywords: &'k [Keyword]) -> Option<&'k Keyword> {
    keywords.iter().find(|keyword| {
        let text = keyword.text.as_bytes();
        !text.is_empty()
            && rest.starts_with(text)
            && rest.get(text.len()).is_none_or(|&next| is_separator(next))
    })
}

/// Reclassify `rows[start]`, then keep going downward for as long as a
/// row's end-of-row comment state differs from what it was before.
///
/// Returns the number of rows reclassified. The walk stops at the first row
/// whose `open_comment` did not change, or at the end of the buffer.
pub fn cascade(rows: &mut [Row], start: usize, profile: Option<&LanguageProfile>) -> usize {
    let mut at = start;
    let mut visited = 0;
    while at < rows.len() {
        let incoming = at > 0 && rows[at - 1].open_comment();
        let (classes, open) = highlight_line(rows[at].render(), profile, incoming);
        let changed = rows[at].set_highlight(classes, open);
        visited += 1;
        if !changed {
            break;
        }
        at += 1;
    }
    if visited > 1 {
        trace!(start, rows = visited, "highlight cascade");
    }
    visited
}

/// Reclassify every row from scratch, threading the comment state through.
pub fn highlight_all(rows: &mut [Row], profile: Option<&LanguageProfile>) {
    let mut open = false;
    for row in rows.iter_mut() {
        let (classes, end_state) = highlight_line(row.render(), profile, open);
        row.set_highlight(classes, end_state);
        open = end_state;
    }
}
