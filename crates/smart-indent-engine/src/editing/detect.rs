use crate::config::{IndentConfig, is_indent_whitespace};

/// Guesses whether a block is already indented by looking at its first line.
///
/// True when the line starts with the configured marker, or with two or more
/// whitespace characters of any kind. Only used to pick add or remove for a
/// toggle, so false positives (a stray deep list, say) are tolerated.
pub fn has_indent(first_line: &str, cfg: &IndentConfig) -> bool {
    first_line.starts_with(cfg.indent_marker.as_str())
        || first_line
            .chars()
            .take(2)
            .filter(|c| is_indent_whitespace(*c))
            .count()
            == 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IndentMarker, MarkerPreset};
    use rstest::rstest;

    #[rstest]
    #[case("\u{3000}\u{3000}段落", true)]
    #[case("  two spaces", true)]
    #[case("\t\tTwo tabs", true)]
    #[case(" \u{3000}mixed", true)]
    #[case(" one space", false)]
    #[case("no indent", false)]
    #[case("", false)]
    fn detects_leading_whitespace(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(has_indent(line, &IndentConfig::default()), expected);
    }

    #[test]
    fn single_tab_marker_counts() {
        let cfg = IndentConfig::default().with_marker(IndentMarker::from(MarkerPreset::Tab));
        assert!(has_indent("\ttext", &cfg));
        assert!(!has_indent("\ttext", &IndentConfig::default()));
    }

    #[test]
    fn nested_list_is_a_false_positive() {
        assert!(has_indent("  - nested item", &IndentConfig::default()));
    }
}
