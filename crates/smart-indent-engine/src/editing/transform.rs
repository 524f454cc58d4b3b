//! The add/remove indent transforms.
//!
//! All three functions map lines one to one: the output always has the same
//! length as the input, and only lines classified [`LineClass::Plain`] are
//! rewritten.

use crate::config::{IndentConfig, strip_leading_indent};
use crate::parsing::{LineClass, classify};

/// Prefixes every plain line with exactly one indent marker.
///
/// The existing leading whitespace is stripped first, so applying this twice
/// gives the same result as applying it once.
pub fn add_indent<S: AsRef<str>>(lines: &[S], cfg: &IndentConfig) -> Vec<String> {
    let marker = cfg.indent_marker.as_str();
    map_plain(lines, cfg, |line| {
        let body = strip_leading_indent(line);
        let mut out = String::with_capacity(marker.len() + body.len());
        out.push_str(marker);
        out.push_str(body);
        out
    })
}

/// Strips the whole leading whitespace run from every plain line.
///
/// This does not restore whatever indentation a line had before
/// [`add_indent`]; plain lines come back with no leading whitespace at all.
pub fn remove_indent<S: AsRef<str>>(lines: &[S], cfg: &IndentConfig) -> Vec<String> {
    map_plain(lines, cfg, |line| strip_leading_indent(line).to_string())
}

/// Pre-pass for whole-document indentation.
///
/// With `preserve_list_indent` only plain lines are stripped. Without it every
/// line loses its leading whitespace, nested lists and indented code included.
pub fn clean_existing_indent<S: AsRef<str>>(lines: &[S], cfg: &IndentConfig) -> Vec<String> {
    if cfg.preserve_list_indent {
        return remove_indent(lines, cfg);
    }
    lines
        .iter()
        .map(|line| strip_leading_indent(line.as_ref()).to_string())
        .collect()
}

fn map_plain<S, F>(lines: &[S], cfg: &IndentConfig, rewrite: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            match classify(line, cfg) {
                LineClass::Plain => rewrite(line),
                LineClass::Blank | LineClass::Structural(_) => line.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IndentMarker, MarkerPreset};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn cfg() -> IndentConfig {
        IndentConfig::default()
    }

    #[test]
    fn add_prefixes_plain_line_with_marker() {
        assert_eq!(
            add_indent(&["这是一个普通段落。"], &cfg()),
            vec!["\u{3000}\u{3000}这是一个普通段落。"]
        );
    }

    #[test]
    fn add_normalizes_existing_leading_whitespace() {
        assert_eq!(
            add_indent(&["  \u{3000}text", "\u{200C}\u{3000}\u{3000}text"], &cfg()),
            vec!["\u{3000}\u{3000}text", "\u{3000}\u{3000}text"]
        );
    }

    #[test]
    fn add_uses_configured_marker() {
        let tab = cfg().with_marker(IndentMarker::from(MarkerPreset::Tab));
        assert_eq!(add_indent(&["text"], &tab), vec!["\ttext"]);
    }

    #[rstest]
    #[case("# 标题")]
    #[case("  1. 子列表项")]
    #[case("> quote")]
    #[case("")]
    #[case("   ")]
    #[case("| a | b |")]
    fn non_plain_lines_are_untouched(#[case] line: &str) {
        assert_eq!(add_indent(&[line], &cfg()), vec![line]);
        assert_eq!(remove_indent(&[line], &cfg()), vec![line]);
    }

    #[rstest]
    #[case("\u{3000}\u{3000}已缩进的段落", "已缩进的段落")]
    #[case("\t\ttabbed", "tabbed")]
    #[case("  \u{3000} \u{3000}mixed", "mixed")]
    #[case("no indent", "no indent")]
    fn remove_strips_whole_leading_run(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(remove_indent(&[line], &cfg()), vec![expected]);
    }

    #[test]
    fn add_is_idempotent() {
        let lines = ["first", "  second", "", "- item", "third"];
        let once = add_indent(&lines, &cfg());
        assert_eq!(add_indent(&once, &cfg()), once);
    }

    #[test]
    fn remove_after_add_drops_original_indentation() {
        let lines = ["  spaced", "plain"];
        let round_trip = remove_indent(&add_indent(&lines, &cfg()), &cfg());
        assert_eq!(round_trip, vec!["spaced", "plain"]);
    }

    #[test]
    fn four_space_marker_reads_back_as_code() {
        let four = cfg().with_marker(IndentMarker::from(MarkerPreset::FourSpaces));
        let added = add_indent(&["text"], &four);
        assert_eq!(added, vec!["    text"]);
        // Once indented by four spaces the line is indented code and stays put.
        assert_eq!(remove_indent(&added, &four), added);
    }

    #[test]
    fn clean_preserving_lists_keeps_nested_items() {
        let lines = ["  prose", "  - nested", "    code"];
        assert_eq!(
            clean_existing_indent(&lines, &cfg()),
            vec!["prose", "  - nested", "    code"]
        );
    }

    #[test]
    fn clean_without_preserve_strips_every_line() {
        let no_preserve = IndentConfig {
            preserve_list_indent: false,
            ..cfg()
        };
        let lines = ["  prose", "  - nested", "    code", "\u{3000}x"];
        assert_eq!(
            clean_existing_indent(&lines, &no_preserve),
            vec!["prose", "- nested", "code", "x"]
        );
    }

    #[test]
    fn lengths_are_preserved() {
        let lines = ["a", "", "# b", "c"];
        assert_eq!(add_indent(&lines, &cfg()).len(), lines.len());
        assert_eq!(remove_indent(&lines, &cfg()).len(), lines.len());
        assert_eq!(clean_existing_indent(&lines, &cfg()).len(), lines.len());
    }
}
