//! Word wrapping for generated documentation comments.

use std::borrow::Cow;

use textwrap::{Options as WrapOptions, WordSeparator, WrapAlgorithm, wrap};

/// Greedily wrap `text` into lines of at most `max_length` characters.
///
/// Runs of whitespace collapse to one space and lines break at spaces only.
/// A single word longer than `max_length` is kept intact on a line of its own.
pub fn word_wrap(text: &str, max_length: usize) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Vec::new();
    }

    let options = WrapOptions::new(max_length)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    wrap(&normalized, options)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Wrap text made of paragraphs separated by blank lines.
///
/// Line breaks inside a paragraph are treated as spaces. Paragraphs are
/// separated by a single empty string in the output.
pub fn wrap_paragraphs(text: &str, max_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut paragraph = String::new();

    let flush = |paragraph: &mut String, lines: &mut Vec<String>| {
        let wrapped = word_wrap(paragraph, max_length);
        if !wrapped.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(wrapped);
        }
        paragraph.clear();
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut paragraph, &mut lines);
        } else {
            paragraph.push(' ');
            paragraph.push_str(line);
        }
    }
    flush(&mut paragraph, &mut lines);

    lines
}
