//! Template parser.
//!
//! Block structure is tracked with an explicit stack of open blocks, so
//! nesting depth is limited only by memory. Expressions inside tags are
//! parsed by a small recursive-descent parser.

use super::ast::{CmpOp, Expr, LoopTarget, MapMethod, Node, NodeId, Template};
use super::lexer::{syntax_error, tokenize, Token};
use crate::error::Result;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Punct(&'static str),
}

const PUNCTS: [&str; 16] =
    ["==", "!=", "<=", ">=", "<", ">", "|", "~", ".", ",", "(", ")", "[", "]", "-", ":"];

fn lex_expr(input: &str) -> std::result::Result<Vec<Tok>, String> {
    let mut toks = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(i, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' || c == '\'' {
            chars.next();
            let mut s = String::new();
            let mut closed = false;
            while let Some((_, ch)) = chars.next() {
                match ch {
                    '\\' => match chars.next() {
                        Some((_, 'n')) => s.push('\n'),
                        Some((_, 't')) => s.push('\t'),
                        Some((_, other)) => s.push(other),
                        None => break,
                    },
                    ch if ch == c => {
                        closed = true;
                        break;
                    }
                    ch => s.push(ch),
                }
            }
            if !closed {
                return Err("unterminated string literal".to_string());
            }
            toks.push(Tok::Str(s));
        } else if c.is_ascii_digit() {
            let rest = &input[i..];
            let int_len = rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len());
            let after = &rest[int_len..];
            let frac_len = if after.starts_with('.')
                && after[1..].starts_with(|ch: char| ch.is_ascii_digit())
            {
                1 + after[1..].find(|ch: char| !ch.is_ascii_digit()).unwrap_or(after.len() - 1)
            } else {
                0
            };
            let literal = &rest[..int_len + frac_len];
            if frac_len > 0 {
                let f = literal.parse().map_err(|_| format!("invalid number '{literal}'"))?;
                toks.push(Tok::Float(f));
            } else {
                let n = literal.parse().map_err(|_| format!("invalid number '{literal}'"))?;
                toks.push(Tok::Int(n));
            }
            for _ in 0..literal.len() {
                chars.next();
            }
        } else if c.is_alphabetic() || c == '_' {
            let rest = &input[i..];
            let len =
                rest.find(|ch: char| !(ch.is_alphanumeric() || ch == '_')).unwrap_or(rest.len());
            toks.push(Tok::Ident(rest[..len].to_string()));
            for _ in rest[..len].chars() {
                chars.next();
            }
        } else {
            let rest = &input[i..];
            let punct = PUNCTS
                .iter()
                .find(|p| rest.starts_with(**p))
                .copied()
                .ok_or_else(|| format!("unexpected character '{c}'"))?;
            toks.push(Tok::Punct(punct));
            for _ in 0..punct.len() {
                chars.next();
            }
        }
    }
    Ok(toks)
}

const RESERVED: [&str; 11] =
    ["and", "or", "not", "in", "is", "true", "false", "True", "False", "none", "None"];

/// Maximum nesting of sub-expressions, operator chains included.
const MAX_EXPR_DEPTH: usize = 100;

struct ExprParser {
    toks: Vec<Tok>,
    pos: usize,
    offset: usize,
    depth: usize,
}

type ParseResult<T> = std::result::Result<T, String>;

impl ExprParser {
    fn new(input: &str, offset: usize) -> ParseResult<Self> {
        Ok(Self { toks: lex_expr(input)?, pos: 0, offset, depth: 0 })
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn peek_at(&self, n: usize) -> Option<&Tok> {
        self.toks.get(self.pos + n)
    }

    fn advance(&mut self) -> Option<Tok> {
        let tok = self.toks.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn is_punct(&self, p: &str) -> bool {
        matches!(self.peek(), Some(Tok::Punct(q)) if *q == p)
    }

    fn is_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Some(Tok::Ident(s)) if s == kw)
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.is_punct(p) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.is_keyword(kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> ParseResult<()> {
        if self.eat_punct(p) {
            Ok(())
        } else {
            Err(format!("expected '{p}', found {}", self.describe_next()))
        }
    }

    fn expect_name(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Tok::Ident(name)) if !RESERVED.contains(&name.as_str()) => Ok(name),
            Some(tok) => Err(format!("expected a name, found {}", describe(&tok))),
            None => Err("expected a name, found end of tag".to_string()),
        }
    }

    fn expect_end(&self) -> ParseResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(format!("unexpected {} after expression", describe(tok))),
        }
    }

    fn describe_next(&self) -> String {
        self.peek().map(describe).unwrap_or_else(|| "end of tag".to_string())
    }

    /// Enters one nesting level; the caller restores `depth` when done.
    fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_EXPR_DEPTH {
            return Err("expression nested too deeply".to_string());
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        self.descend()?;
        let expr = self.parse_or()?;
        self.depth = depth;
        Ok(expr)
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_and()?;
        while self.eat_keyword("or") {
            self.descend()?;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_not()?;
        while self.eat_keyword("and") {
            self.descend()?;
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.eat_keyword("not") {
            let depth = self.depth;
            self.descend()?;
            let inner = self.parse_not()?;
            self.depth = depth;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_compare()
    }

    fn parse_compare(&mut self) -> ParseResult<Expr> {
        let left = self.parse_concat()?;
        let (op, width) = match self.peek() {
            Some(Tok::Punct("==")) => (CmpOp::Eq, 1),
            Some(Tok::Punct("!=")) => (CmpOp::Ne, 1),
            Some(Tok::Punct("<")) => (CmpOp::Lt, 1),
            Some(Tok::Punct("<=")) => (CmpOp::Le, 1),
            Some(Tok::Punct(">")) => (CmpOp::Gt, 1),
            Some(Tok::Punct(">=")) => (CmpOp::Ge, 1),
            Some(Tok::Ident(kw)) if kw == "in" => (CmpOp::In, 1),
            Some(Tok::Ident(kw))
                if kw == "not" && matches!(self.peek_at(1), Some(Tok::Ident(n)) if n == "in") =>
            {
                (CmpOp::NotIn, 2)
            }
            _ => return Ok(left),
        };
        self.pos += width;
        let right = self.parse_concat()?;
        Ok(Expr::Compare(Box::new(left), op, Box::new(right)))
    }

    fn parse_concat(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut left = self.parse_tested()?;
        while self.eat_punct("~") {
            self.descend()?;
            let right = self.parse_tested()?;
            left = Expr::Concat(Box::new(left), Box::new(right));
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_tested(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_filtered()?;
        if !self.eat_keyword("is") {
            return Ok(expr);
        }
        let negated = self.eat_keyword("not");
        let name = match self.advance() {
            Some(Tok::Ident(name)) => name,
            Some(tok) => return Err(format!("expected a test name, found {}", describe(&tok))),
            None => return Err("expected a test name, found end of tag".to_string()),
        };
        if !TESTS.contains(&name.as_str()) {
            return Err(format!("unknown test '{name}'"));
        }
        Ok(Expr::Test { expr: Box::new(expr), name, negated })
    }

    fn parse_filtered(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.parse_postfix()?;
        while self.eat_punct("|") {
            self.descend()?;
            let name = self.expect_name()?;
            let mut args = Vec::new();
            if self.eat_punct("(") {
                if !self.eat_punct(")") {
                    loop {
                        args.push(self.parse_expr()?);
                        if self.eat_punct(")") {
                            break;
                        }
                        self.expect_punct(",")?;
                    }
                }
            }
            expr = Expr::Filter { expr: Box::new(expr), name, args, offset: self.offset };
        }
        self.depth = depth;
        Ok(expr)
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.parse_primary()?;
        loop {
            if self.is_punct(".") || self.is_punct("[") {
                self.descend()?;
            }
            if self.eat_punct(".") {
                let name = match self.advance() {
                    Some(Tok::Ident(name)) => name,
                    Some(Tok::Int(i)) => {
                        expr = Expr::Item(Box::new(expr), Box::new(Expr::Literal(i.into())));
                        continue;
                    }
                    Some(tok) => {
                        return Err(format!("expected attribute name, found {}", describe(&tok)))
                    }
                    None => return Err("expected attribute name, found end of tag".to_string()),
                };
                if self.eat_punct("(") {
                    self.expect_punct(")")?;
                    let method = match name.as_str() {
                        "items" => MapMethod::Items,
                        "keys" => MapMethod::Keys,
                        "values" => MapMethod::Values,
                        other => return Err(format!("unsupported method call '{other}()'")),
                    };
                    expr = Expr::Method(Box::new(expr), method);
                } else {
                    expr = Expr::Attr(Box::new(expr), name);
                }
            } else if self.eat_punct("[") {
                let key = self.parse_expr()?;
                self.expect_punct("]")?;
                expr = Expr::Item(Box::new(expr), Box::new(key));
            } else {
                self.depth = depth;
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.advance() {
            Some(Tok::Str(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Tok::Int(n)) => Ok(Expr::Literal(n.into())),
            Some(Tok::Float(f)) => Ok(Expr::Literal(f.into())),
            Some(Tok::Punct("-")) => match self.advance() {
                Some(Tok::Int(n)) => Ok(Expr::Literal((-n).into())),
                Some(Tok::Float(f)) => Ok(Expr::Literal((-f).into())),
                _ => Err("expected a number after '-'".to_string()),
            },
            Some(Tok::Punct("(")) => {
                let expr = self.parse_expr()?;
                self.expect_punct(")")?;
                Ok(expr)
            }
            Some(Tok::Punct("[")) => {
                let mut items = Vec::new();
                if !self.eat_punct("]") {
                    loop {
                        items.push(self.parse_expr()?);
                        if self.eat_punct("]") {
                            break;
                        }
                        self.expect_punct(",")?;
                        if self.eat_punct("]") {
                            break;
                        }
                    }
                }
                Ok(Expr::List(items))
            }
            Some(Tok::Ident(name)) => match name.as_str() {
                "true" | "True" => Ok(Expr::Literal(Value::Bool(true))),
                "false" | "False" => Ok(Expr::Literal(Value::Bool(false))),
                "none" | "None" => Ok(Expr::Literal(Value::None)),
                kw if RESERVED.contains(&kw) => Err(format!("unexpected keyword '{kw}'")),
                _ => Ok(Expr::Var(name)),
            },
            Some(tok) => Err(format!("unexpected {}", describe(&tok))),
            None => Err("expected an expression, found end of tag".to_string()),
        }
    }

    /// `key` or `key, value` followed by `in`.
    fn parse_loop_target(&mut self) -> ParseResult<LoopTarget> {
        let key = self.expect_name()?;
        let value = if self.eat_punct(",") { Some(self.expect_name()?) } else { None };
        if !self.eat_keyword("in") {
            return Err(format!("expected 'in' in for loop, found {}", self.describe_next()));
        }
        Ok(LoopTarget { key, value })
    }
}

/// Names accepted after `is`.
pub(crate) const TESTS: [&str; 9] =
    ["defined", "undefined", "none", "string", "number", "mapping", "sequence", "true", "false"];

fn describe(tok: &Tok) -> String {
    match tok {
        Tok::Ident(s) => format!("'{s}'"),
        Tok::Str(s) => format!("string \"{s}\""),
        Tok::Int(n) => format!("number {n}"),
        Tok::Float(f) => format!("number {f}"),
        Tok::Punct(p) => format!("'{p}'"),
    }
}

/// Parses a full standalone expression.
fn parse_expression(input: &str, offset: usize) -> ParseResult<Expr> {
    let mut parser = ExprParser::new(input, offset)?;
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

/// A block that has been opened but not yet closed.
enum Open {
    If {
        branches: Vec<(Expr, Vec<NodeId>)>,
        /// `None` once the `else` branch started.
        cond: Option<Expr>,
    },
    For {
        target: LoopTarget,
        iterable: Expr,
        /// Loop body, set aside once the `else` branch started.
        main_body: Option<Vec<NodeId>>,
    },
}

struct Frame {
    open: Open,
    body: Vec<NodeId>,
    offset: usize,
}

impl Frame {
    fn keyword(&self) -> &'static str {
        match self.open {
            Open::If { .. } => "if",
            Open::For { .. } => "for",
        }
    }
}

/// Parses template text into an immutable [`Template`].
pub fn parse(name: &str, source: &str) -> Result<Template> {
    let err = |offset: usize, message: String| syntax_error(name, source, offset, message);

    let mut nodes: Vec<Node> = Vec::new();
    let mut root: Vec<NodeId> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    fn push(nodes: &mut Vec<Node>, root: &mut Vec<NodeId>, stack: &mut [Frame], node: Node) {
        let id = nodes.len();
        nodes.push(node);
        match stack.last_mut() {
            Some(frame) => frame.body.push(id),
            None => root.push(id),
        }
    }

    for token in tokenize(name, source)? {
        match token {
            Token::Text(text) => push(&mut nodes, &mut root, &mut stack, Node::Text(text.into())),
            Token::Expr(content, offset) => {
                let expr = parse_expression(content, offset).map_err(|m| err(offset, m))?;
                push(&mut nodes, &mut root, &mut stack, Node::Output(expr));
            }
            Token::Block(content, offset) => {
                let (keyword, rest) = match content.find(char::is_whitespace) {
                    Some(i) => (&content[..i], content[i..].trim()),
                    None => (content, ""),
                };
                let no_args = |kw: &str| -> Result<()> {
                    if rest.is_empty() {
                        Ok(())
                    } else {
                        Err(err(offset, format!("unexpected '{rest}' after '{kw}'")))
                    }
                };
                match keyword {
                    "if" => {
                        let cond = parse_expression(rest, offset).map_err(|m| err(offset, m))?;
                        stack.push(Frame {
                            open: Open::If { branches: Vec::new(), cond: Some(cond) },
                            body: Vec::new(),
                            offset,
                        });
                    }
                    "elif" => {
                        let cond = parse_expression(rest, offset).map_err(|m| err(offset, m))?;
                        match stack.last_mut() {
                            Some(Frame { open: Open::If { branches, cond: current }, body, .. })
                                if current.is_some() =>
                            {
                                if let Some(prev) = current.replace(cond) {
                                    branches.push((prev, std::mem::take(body)));
                                }
                            }
                            _ => return Err(err(offset, "'elif' outside of an 'if' block".into())),
                        }
                    }
                    "else" => {
                        no_args("else")?;
                        match stack.last_mut() {
                            Some(Frame { open: Open::If { branches, cond }, body, .. })
                                if cond.is_some() =>
                            {
                                if let Some(prev) = cond.take() {
                                    branches.push((prev, std::mem::take(body)));
                                }
                            }
                            Some(Frame { open: Open::For { main_body, .. }, body, .. })
                                if main_body.is_none() =>
                            {
                                *main_body = Some(std::mem::take(body));
                            }
                            _ => return Err(err(offset, "unexpected 'else'".into())),
                        }
                    }
                    "endif" => {
                        no_args("endif")?;
                        let (mut branches, cond, body) = match stack.pop() {
                            Some(Frame { open: Open::If { branches, cond }, body, .. }) => {
                                (branches, cond, body)
                            }
                            Some(frame) => {
                                return Err(err(
                                    offset,
                                    format!("'endif' closes a '{}' block", frame.keyword()),
                                ))
                            }
                            None => return Err(err(offset, "'endif' without matching 'if'".into())),
                        };
                        let else_body = match cond {
                            Some(cond) => {
                                branches.push((cond, body));
                                Vec::new()
                            }
                            None => body,
                        };
                        push(&mut nodes, &mut root, &mut stack, Node::If { branches, else_body });
                    }
                    "for" => {
                        let mut parser =
                            ExprParser::new(rest, offset).map_err(|m| err(offset, m))?;
                        let target = parser.parse_loop_target().map_err(|m| err(offset, m))?;
                        let iterable = parser.parse_expr().map_err(|m| err(offset, m))?;
                        parser.expect_end().map_err(|m| err(offset, m))?;
                        stack.push(Frame {
                            open: Open::For { target, iterable, main_body: None },
                            body: Vec::new(),
                            offset,
                        });
                    }
                    "endfor" => {
                        no_args("endfor")?;
                        let (target, iterable, main_body, tail) = match stack.pop() {
                            Some(Frame {
                                open: Open::For { target, iterable, main_body },
                                body,
                                ..
                            }) => (target, iterable, main_body, body),
                            Some(frame) => {
                                return Err(err(
                                    offset,
                                    format!("'endfor' closes a '{}' block", frame.keyword()),
                                ))
                            }
                            None => {
                                return Err(err(offset, "'endfor' without matching 'for'".into()))
                            }
                        };
                        let (body, else_body) = match main_body {
                            Some(main) => (main, tail),
                            None => (tail, Vec::new()),
                        };
                        push(
                            &mut nodes,
                            &mut root,
                            &mut stack,
                            Node::For { target, iterable, body, else_body },
                        );
                    }
                    "" => return Err(err(offset, "empty block tag".into())),
                    other => return Err(err(offset, format!("unknown block tag '{other}'"))),
                }
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(err(frame.offset, format!("unclosed '{}' block", frame.keyword())));
    }

    Ok(Template { name: name.to_string(), source: source.to_string(), nodes, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn expr(input: &str) -> Expr {
        parse_expression(input, 0).unwrap()
    }

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Var(name.to_string()))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("a or b and not c"),
            Expr::Or(var("a"), Box::new(Expr::And(var("b"), Box::new(Expr::Not(var("c"))))))
        );
    }

    #[test]
    fn test_filter_binds_tighter_than_compare() {
        let parsed = expr("x | default('y') == 'y'");
        let Expr::Compare(left, CmpOp::Eq, _) = parsed else { panic!("expected compare") };
        assert!(matches!(*left, Expr::Filter { ref name, .. } if name == "default"));
    }

    #[test]
    fn test_not_in() {
        assert!(matches!(expr("'a' not in items"), Expr::Compare(_, CmpOp::NotIn, _)));
    }

    #[test]
    fn test_attribute_and_index_access() {
        assert_eq!(
            expr("a.b['c'].items()"),
            Expr::Method(
                Box::new(Expr::Item(
                    Box::new(Expr::Attr(var("a"), "b".to_string())),
                    Box::new(Expr::Literal("c".into()))
                )),
                MapMethod::Items
            )
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("-3"), Expr::Literal((-3).into()));
        assert_eq!(expr("2.5"), Expr::Literal(2.5.into()));
        assert_eq!(expr("None"), Expr::Literal(Value::None));
        assert_eq!(
            expr("['a', 1,]"),
            Expr::List(vec![Expr::Literal("a".into()), Expr::Literal(1.into())])
        );
    }

    #[test]
    fn test_malformed_expressions() {
        for input in ["a +", "a ==", "(a", "a b", "x | ", "'open", "a.upper()", "x is fancy"] {
            assert!(parse_expression(input, 0).is_err(), "expected error for {input:?}");
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |n: usize| format!("{}x{}", "[".repeat(n), "]".repeat(n));
        assert!(parse_expression(&nested(MAX_EXPR_DEPTH - 1), 0).is_ok());
        assert_eq!(
            parse_expression(&nested(MAX_EXPR_DEPTH + 1), 0).unwrap_err(),
            "expression nested too deeply"
        );
        assert!(parse_expression(&"not ".repeat(500), 0).is_err());
    }

    #[test]
    fn test_if_elif_else_structure() {
        let tpl = parse("t", "{% if a %}A{% elif b %}B{% else %}C{% endif %}").unwrap();
        assert_eq!(tpl.root.len(), 1);
        let Node::If { branches, else_body } = &tpl.nodes[tpl.root[0]] else {
            panic!("expected if node")
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(else_body.len(), 1);
    }

    #[test]
    fn test_for_with_two_targets_and_else() {
        let tpl = parse("t", "{% for k, v in m %}{{ k }}{% else %}none{% endfor %}").unwrap();
        let Node::For { target, body, else_body, .. } = &tpl.nodes[tpl.root[0]] else {
            panic!("expected for node")
        };
        assert_eq!(target.key, "k");
        assert_eq!(target.value.as_deref(), Some("v"));
        assert_eq!(body.len(), 1);
        assert_eq!(else_body.len(), 1);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 2_000;
        let source = format!("{}x{}", "{% if a %}".repeat(depth), "{% endif %}".repeat(depth));
        let tpl = parse("deep", &source).unwrap();
        assert_eq!(tpl.nodes.len(), depth + 1);
    }

    fn syntax_message(source: &str) -> (usize, usize, String) {
        match parse("bad.j2", source) {
            Err(Error::TemplateSyntax { line, column, message, .. }) => (line, column, message),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_block() {
        let (line, _, message) = syntax_message("a\n{% for x in y %}\n{{ x }}");
        assert_eq!(line, 2);
        assert_eq!(message, "unclosed 'for' block");
    }

    #[test]
    fn test_unmatched_end() {
        assert!(syntax_message("{% endif %}").2.contains("without matching 'if'"));
        assert!(syntax_message("{% if a %}{% endfor %}").2.contains("closes a 'if' block"));
        assert!(syntax_message("{% else %}").2.contains("unexpected 'else'"));
        assert!(syntax_message("{% if a %}{% else %}{% elif b %}{% endif %}")
            .2
            .contains("'elif' outside"));
    }

    #[test]
    fn test_unknown_tag_and_bad_reference() {
        assert!(syntax_message("{% include 'x' %}").2.contains("unknown block tag 'include'"));
        let (line, column, _) = syntax_message("ok\n  {{ a. }}");
        assert_eq!((line, column), (2, 3));
    }
}
