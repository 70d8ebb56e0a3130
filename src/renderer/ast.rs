//! Parsed template representation: a node arena plus expression trees.

use crate::value::Value;

/// Index into [`Template::nodes`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMethod {
    Items,
    Keys,
    Values,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    List(Vec<Expr>),
    Var(String),
    /// `base.name`
    Attr(Box<Expr>, String),
    /// `base[key]`
    Item(Box<Expr>, Box<Expr>),
    Method(Box<Expr>, MapMethod),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare(Box<Expr>, CmpOp, Box<Expr>),
    /// `left ~ right`
    Concat(Box<Expr>, Box<Expr>),
    Filter {
        expr: Box<Expr>,
        name: String,
        args: Vec<Expr>,
        /// Byte offset of the enclosing tag, for diagnostics.
        offset: usize,
    },
    /// `expr is [not] name`
    Test {
        expr: Box<Expr>,
        name: String,
        negated: bool,
    },
}

impl Expr {
    /// Visits every filter application in this expression.
    pub fn visit_filters<'a>(&'a self, out: &mut Vec<(&'a str, usize)>) {
        match self {
            Expr::Literal(_) | Expr::Var(_) => {}
            Expr::List(items) => items.iter().for_each(|e| e.visit_filters(out)),
            Expr::Attr(base, _) | Expr::Method(base, _) | Expr::Not(base) => {
                base.visit_filters(out)
            }
            Expr::Test { expr, .. } => expr.visit_filters(out),
            Expr::Item(a, b)
            | Expr::And(a, b)
            | Expr::Or(a, b)
            | Expr::Compare(a, _, b)
            | Expr::Concat(a, b) => {
                a.visit_filters(out);
                b.visit_filters(out);
            }
            Expr::Filter { expr, name, args, offset } => {
                expr.visit_filters(out);
                args.iter().for_each(|e| e.visit_filters(out));
                out.push((name, *offset));
            }
        }
    }
}

/// Loop variables: `for key in ...` or `for key, value in ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTarget {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Output(Expr),
    If {
        branches: Vec<(Expr, Vec<NodeId>)>,
        else_body: Vec<NodeId>,
    },
    For {
        target: LoopTarget,
        iterable: Expr,
        body: Vec<NodeId>,
        else_body: Vec<NodeId>,
    },
}

/// An immutable parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub(crate) name: String,
    pub(crate) source: String,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Vec<NodeId>,
}

impl Template {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn root(&self) -> &[NodeId] {
        &self.root
    }

    /// All filter names used by the template with their tag offsets.
    pub fn filters(&self) -> Vec<(&str, usize)> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Text(_) => {}
                Node::Output(expr) => expr.visit_filters(&mut out),
                Node::If { branches, .. } => {
                    branches.iter().for_each(|(cond, _)| cond.visit_filters(&mut out))
                }
                Node::For { iterable, .. } => iterable.visit_filters(&mut out),
            }
        }
        out
    }
}
