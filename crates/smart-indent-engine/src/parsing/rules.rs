//! Exclusion rules for structural Markdown lines.
//!
//! Each rule is a standalone predicate over a single line. The classifier
//! walks [`Rule::ALL`] in order and stops at the first active rule that
//! matches, so the order here is the precedence order.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{IndentConfig, strip_leading_indent};

/// A structural category that keeps a line out of the indent transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `#`, `##`, ... followed by whitespace.
    Heading,
    /// List marker indented 2-4 spaces.
    NestedListItem,
    /// List marker indented 0-4 spaces.
    ListItem,
    BlockQuote,
    /// `| cell | cell |`
    TableRow,
    /// ```` ``` ```` or `~~~`.
    CodeFence,
    /// Four or more leading spaces.
    IndentedCode,
    HorizontalRule,
    HtmlTag,
    Image,
    /// `[label]: target`
    LinkReference,
    /// `:::` admonition fences.
    Callout,
}

impl Rule {
    pub const ALL: [Rule; 12] = [
        Rule::Heading,
        Rule::NestedListItem,
        Rule::ListItem,
        Rule::BlockQuote,
        Rule::TableRow,
        Rule::CodeFence,
        Rule::IndentedCode,
        Rule::HorizontalRule,
        Rule::HtmlTag,
        Rule::Image,
        Rule::LinkReference,
        Rule::Callout,
    ];

    /// Whether the configuration switches this rule on.
    pub fn is_active(self, cfg: &IndentConfig) -> bool {
        match self {
            Rule::Heading => cfg.ignore_headers,
            Rule::NestedListItem => cfg.ignore_lists && cfg.preserve_list_indent,
            Rule::ListItem => cfg.ignore_lists,
            Rule::BlockQuote => cfg.ignore_quotes || cfg.ignore_lists,
            Rule::TableRow => cfg.ignore_tables,
            Rule::CodeFence | Rule::IndentedCode => cfg.ignore_code,
            Rule::HorizontalRule
            | Rule::HtmlTag
            | Rule::Image
            | Rule::LinkReference
            | Rule::Callout => true,
        }
    }

    /// Tests the line against this rule alone, ignoring configuration.
    pub fn matches(self, line: &str) -> bool {
        match self {
            Rule::Heading => is_heading(strip_leading_indent(line)),
            Rule::NestedListItem => {
                matches!(leading_spaces(line), 2..=4) && is_list_marker(line.trim_start_matches(' '))
            }
            Rule::ListItem => {
                leading_spaces(line) <= 4 && is_list_marker(line.trim_start_matches(' '))
            }
            Rule::BlockQuote => is_block_quote(strip_leading_indent(line)),
            Rule::TableRow => table_row_regex().is_match(strip_leading_indent(line)),
            Rule::CodeFence => {
                let body = strip_leading_indent(line);
                body.starts_with(CODE_FENCE_BACKTICKS) || body.starts_with(CODE_FENCE_TILDES)
            }
            Rule::IndentedCode => leading_spaces(line) >= 4,
            Rule::HorizontalRule => {
                strip_leading_indent(line)
                    .chars()
                    .take_while(|c| matches!(c, '-' | '*'))
                    .count()
                    >= 3
            }
            Rule::HtmlTag => html_tag_regex().is_match(strip_leading_indent(line)),
            Rule::Image => strip_leading_indent(line).starts_with("!["),
            Rule::LinkReference => {
                let body = strip_leading_indent(line);
                body.starts_with('[') && body[1..].contains("]:")
            }
            Rule::Callout => strip_leading_indent(line).starts_with(":::"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::Heading => "heading",
            Rule::NestedListItem => "nested list item",
            Rule::ListItem => "list item",
            Rule::BlockQuote => "block quote",
            Rule::TableRow => "table row",
            Rule::CodeFence => "code fence",
            Rule::IndentedCode => "indented code",
            Rule::HorizontalRule => "horizontal rule",
            Rule::HtmlTag => "html tag",
            Rule::Image => "image",
            Rule::LinkReference => "link reference",
            Rule::Callout => "callout",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const CODE_FENCE_BACKTICKS: &str = "```";
pub const CODE_FENCE_TILDES: &str = "~~~";

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

fn followed_by_whitespace(rest: &str) -> bool {
    rest.chars().next().is_some_and(char::is_whitespace)
}

fn is_heading(body: &str) -> bool {
    let rest = body.trim_start_matches('#');
    rest.len() < body.len() && followed_by_whitespace(rest)
}

/// `- `, `* `, `+ ` or `12. ` at the start of `body`.
fn is_list_marker(body: &str) -> bool {
    if let Some(rest) = body.strip_prefix(['-', '*', '+']) {
        return followed_by_whitespace(rest);
    }
    let rest = body.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < body.len()
        && rest
            .strip_prefix('.')
            .is_some_and(followed_by_whitespace)
}

fn is_block_quote(body: &str) -> bool {
    body.strip_prefix('>')
        .is_some_and(|rest| rest.is_empty() || followed_by_whitespace(rest))
}

fn table_row_regex() -> &'static Regex {
    static TABLE_ROW: OnceLock<Regex> = OnceLock::new();
    TABLE_ROW.get_or_init(|| Regex::new(r"^\|[^|]*\|").expect("Invalid table row regex"))
}

fn html_tag_regex() -> &'static Regex {
    static HTML_TAG: OnceLock<Regex> = OnceLock::new();
    HTML_TAG.get_or_init(|| Regex::new(r"^<[^>]+>").expect("Invalid html tag regex"))
}
