//! Splits template source into literal text and tag tokens.
//!
//! Whitespace policy, applied here so the parser only sees final text:
//! - the first newline after a `{% %}` or `{# #}` tag is dropped;
//! - spaces and tabs between the start of a line and a `{% %}` or `{# #}`
//!   tag are dropped when nothing else precedes the tag on that line
//!   (`{%+` opts out);
//! - `+%}` keeps the newline after a block tag;
//! - `{%-`, `{{-`, `{#-` strip all whitespace before the tag and
//!   `-%}`, `-}}`, `-#}` strip all whitespace after it;
//! - `{{ }}` tags are never trimmed implicitly.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Expr,
    Block,
    Comment,
}

impl TagKind {
    fn close(self) -> &'static str {
        match self {
            TagKind::Expr => "}}",
            TagKind::Block => "%}",
            TagKind::Comment => "#}",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            TagKind::Expr => "expression tag '{{'",
            TagKind::Block => "block tag '{%'",
            TagKind::Comment => "comment '{#'",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    /// Content of `{{ ... }}`, trimmed, with the byte offset of the tag.
    Expr(&'a str, usize),
    /// Content of `{% ... %}`, trimmed, with the byte offset of the tag.
    Block(&'a str, usize),
}

/// 1-based line and column of a byte offset.
pub(crate) fn position(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) + 1;
    (line, column)
}

pub(crate) fn syntax_error(name: &str, source: &str, offset: usize, message: String) -> Error {
    let (line, column) = position(source, offset);
    Error::TemplateSyntax { template: name.to_string(), line, column, message }
}

fn next_tag(source: &str, from: usize) -> Option<(usize, TagKind)> {
    let bytes = source.as_bytes();
    let mut i = from;
    while let Some(found) = source[i..].find('{') {
        let at = i + found;
        match bytes.get(at + 1) {
            Some(b'{') => return Some((at, TagKind::Expr)),
            Some(b'%') => return Some((at, TagKind::Block)),
            Some(b'#') => return Some((at, TagKind::Comment)),
            _ => i = at + 1,
        }
    }
    None
}

/// Finds the closing delimiter, skipping over quoted strings in expression
/// and block tags. Returns the offset relative to `from`.
fn find_close(source: &str, from: usize, kind: TagKind) -> Option<usize> {
    let rest = &source[from..];
    let close = kind.close();
    if kind == TagKind::Comment {
        return rest.find(close);
    }
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => quote = Some(c),
            None if rest[i..].starts_with(close) => return Some(i),
            None => {}
        }
    }
    None
}

pub(crate) fn tokenize<'a>(name: &str, source: &'a str) -> Result<Vec<Token<'a>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut strip_all = false;
    let mut strip_newline = false;

    loop {
        let tag = next_tag(source, pos);
        let text_end = tag.map(|(at, _)| at).unwrap_or(source.len());

        let mut text_start = pos;
        if strip_all {
            let text = &source[text_start..text_end];
            text_start += text.len() - text.trim_start().len();
        } else if strip_newline {
            let text = &source[text_start..text_end];
            if text.starts_with("\r\n") {
                text_start += 2;
            } else if text.starts_with('\n') {
                text_start += 1;
            }
        }

        let Some((at, kind)) = tag else {
            if text_start < source.len() {
                tokens.push(Token::Text(&source[text_start..]));
            }
            return Ok(tokens);
        };

        let marker = source.as_bytes().get(at + 2).copied();
        let left_strip = marker == Some(b'-');
        let left_keep = marker == Some(b'+') && kind != TagKind::Expr;

        let mut text_stop = text_end;
        if left_strip {
            text_stop = text_start + source[text_start..text_end].trim_end().len();
        } else if kind != TagKind::Expr && !left_keep {
            let line_start = source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let indent = &source[line_start..at];
            if indent.chars().all(|c| c == ' ' || c == '\t') {
                text_stop = line_start.max(text_start);
            }
        }
        if text_start < text_stop {
            tokens.push(Token::Text(&source[text_start..text_stop]));
        }

        let inner_start = at + 2 + usize::from(left_strip || left_keep);
        let close = find_close(source, inner_start, kind).ok_or_else(|| {
            syntax_error(name, source, at, format!("unterminated {}", kind.describe()))
        })?;
        let mut inner_end = inner_start + close;
        let right_marker = (inner_end > inner_start).then(|| source.as_bytes()[inner_end - 1]);
        let right_strip = right_marker == Some(b'-');
        let right_keep = right_marker == Some(b'+') && kind != TagKind::Expr;
        if right_strip || right_keep {
            inner_end -= 1;
        }
        let content = source[inner_start..inner_end].trim();

        match kind {
            TagKind::Expr => {
                if content.is_empty() {
                    return Err(syntax_error(name, source, at, "empty expression".to_string()));
                }
                tokens.push(Token::Expr(content, at));
            }
            TagKind::Block => tokens.push(Token::Block(content, at)),
            TagKind::Comment => {}
        }

        pos = inner_start + close + 2;
        strip_all = right_strip;
        strip_newline = kind != TagKind::Expr && !right_keep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize("test", source)
            .unwrap()
            .into_iter()
            .map(|t| match t {
                Token::Text(s) => format!("T:{s}"),
                Token::Expr(s, _) => format!("E:{s}"),
                Token::Block(s, _) => format!("B:{s}"),
            })
            .collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(texts("hello"), ["T:hello"]);
        assert!(texts("").is_empty());
    }

    #[test]
    fn test_block_on_own_line_emits_no_line() {
        assert_eq!(
            texts("a\n  {% if x %}\nb\n  {% endif %}\nc"),
            ["T:a\n", "B:if x", "T:b\n", "B:endif", "T:c"]
        );
    }

    #[test]
    fn test_expression_keeps_surrounding_whitespace() {
        assert_eq!(texts("  {{ x }}\n"), ["T:  ", "E:x", "T:\n"]);
    }

    #[test]
    fn test_explicit_strip_markers() {
        assert_eq!(texts("a  \n{{- x -}}  \n b"), ["T:a", "E:x", "T:b"]);
        assert_eq!(texts("a {%- if x -%} b"), ["T:a", "B:if x", "T:b"]);
    }

    #[test]
    fn test_plus_disables_lstrip() {
        assert_eq!(texts("  {%+ if x %}y"), ["T:  ", "B:if x", "T:y"]);
    }

    #[test]
    fn test_plus_keeps_trailing_newline() {
        assert_eq!(
            texts("a{% if x %}b{% endif +%}\nc"),
            ["T:a", "B:if x", "T:b", "B:endif", "T:\nc"]
        );
    }

    #[test]
    fn test_inline_block_after_text_is_not_lstripped() {
        assert_eq!(texts("key = {% if x %}1{% endif %}"), ["T:key = ", "B:if x", "T:1", "B:endif"]);
    }

    #[test]
    fn test_comment_is_dropped_with_its_line() {
        assert_eq!(texts("a\n{# note #}\nb"), ["T:a\n", "T:b"]);
    }

    #[test]
    fn test_close_delimiter_inside_string() {
        assert_eq!(texts("{{ '}}' }}"), ["E:'}}'"]);
    }

    #[test]
    fn test_single_brace_is_text() {
        assert_eq!(texts("{ \"a\": 1 }"), ["T:{ \"a\": 1 }"]);
    }

    #[test]
    fn test_unterminated_tag_reports_position() {
        let err = tokenize("broken.j2", "line one\n  {% if x").unwrap_err();
        match err {
            Error::TemplateSyntax { template, line, column, message } => {
                assert_eq!(template, "broken.j2");
                assert_eq!((line, column), (2, 3));
                assert!(message.contains("unterminated"));
            }
            other => panic!("Expected TemplateSyntax, got {other:?}"),
        }
    }
}
