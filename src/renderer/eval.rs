//! Template evaluation.
//!
//! Node walking is iterative: an explicit frame stack replaces recursion
//! over block bodies. Loop variables live in a scope stack layered over the
//! caller's context, which is only ever read.

use super::ast::{CmpOp, Expr, LoopTarget, MapMethod, Node, NodeId, Template};
use super::filters::Filters;
use crate::context::Context;
use crate::value::Value;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::Write;

type Scope = IndexMap<String, Value>;

struct Loop<'t> {
    target: &'t LoopTarget,
    body: &'t [NodeId],
    items: Vec<(Value, Value)>,
    next: usize,
}

enum Frame<'t> {
    Body { ids: &'t [NodeId], pos: usize },
    Loop(Loop<'t>),
}

enum Step<'t> {
    Exec(NodeId),
    Pop,
    Iterate { body: &'t [NodeId], bindings: Scope },
    EndLoop,
}

struct Evaluator<'a> {
    context: &'a Context,
    filters: &'a Filters,
    scopes: Vec<Scope>,
}

impl Template {
    /// Renders the template against `context`.
    ///
    /// Missing variables render as empty strings and unknown filters pass
    /// values through; `Environment` rejects unknown filters up front.
    pub fn render(&self, context: &Context, filters: &Filters) -> String {
        let mut eval = Evaluator { context, filters, scopes: Vec::new() };
        let mut out = String::with_capacity(self.source.len());
        let mut stack = vec![Frame::Body { ids: &self.root, pos: 0 }];

        while let Some(frame) = stack.last_mut() {
            let step = match frame {
                Frame::Body { ids, pos } => match ids.get(*pos) {
                    Some(&id) => {
                        *pos += 1;
                        Step::Exec(id)
                    }
                    None => Step::Pop,
                },
                Frame::Loop(state) => match state.items.get(state.next) {
                    Some((key, value)) => {
                        let bindings =
                            loop_bindings(state.target, key, value, state.next, state.items.len());
                        state.next += 1;
                        Step::Iterate { body: state.body, bindings }
                    }
                    None => Step::EndLoop,
                },
            };

            match step {
                Step::Exec(id) => match &self.nodes[id] {
                    Node::Text(text) => out.push_str(text),
                    Node::Output(expr) => {
                        let value = eval.eval(expr);
                        let _ = write!(out, "{value}");
                    }
                    Node::If { branches, else_body } => {
                        let body = branches
                            .iter()
                            .find(|(cond, _)| eval.eval(cond).is_true())
                            .map(|(_, body)| body)
                            .unwrap_or(else_body);
                        stack.push(Frame::Body { ids: body, pos: 0 });
                    }
                    Node::For { target, iterable, body, else_body } => {
                        let collection = eval.eval(iterable);
                        let items = match target.value {
                            Some(_) => collection.iter_pairs(),
                            None => collection
                                .iter_items()
                                .into_iter()
                                .map(|v| (v, Value::None))
                                .collect(),
                        };
                        if items.is_empty() {
                            stack.push(Frame::Body { ids: else_body, pos: 0 });
                        } else {
                            eval.scopes.push(Scope::new());
                            stack.push(Frame::Loop(Loop { target, body, items, next: 0 }));
                        }
                    }
                },
                Step::Pop => {
                    stack.pop();
                }
                Step::Iterate { body, bindings } => {
                    if let Some(scope) = eval.scopes.last_mut() {
                        *scope = bindings;
                    }
                    stack.push(Frame::Body { ids: body, pos: 0 });
                }
                Step::EndLoop => {
                    eval.scopes.pop();
                    stack.pop();
                }
            }
        }

        out
    }
}

fn loop_bindings(
    target: &LoopTarget,
    key: &Value,
    value: &Value,
    index: usize,
    length: usize,
) -> Scope {
    let mut meta = IndexMap::new();
    meta.insert("index".to_string(), Value::from(index + 1));
    meta.insert("index0".to_string(), Value::from(index));
    meta.insert("revindex".to_string(), Value::from(length - index));
    meta.insert("revindex0".to_string(), Value::from(length - index - 1));
    meta.insert("first".to_string(), Value::from(index == 0));
    meta.insert("last".to_string(), Value::from(index + 1 == length));
    meta.insert("length".to_string(), Value::from(length));

    let mut scope = Scope::new();
    scope.insert("loop".to_string(), Value::Map(meta));
    scope.insert(target.key.clone(), key.clone());
    if let Some(name) = &target.value {
        scope.insert(name.clone(), value.clone());
    }
    scope
}

impl Evaluator<'_> {
    fn lookup(&self, name: &str) -> Value {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.context.get(name))
            .cloned()
            .unwrap_or_default()
    }

    fn eval(&self, expr: &Expr) -> Value {
        match expr {
            Expr::Literal(value) => value.clone(),
            Expr::List(items) => Value::Seq(items.iter().map(|e| self.eval(e)).collect()),
            Expr::Var(name) => self.lookup(name),
            Expr::Attr(base, name) => self.eval(base).get_attr(name).cloned().unwrap_or_default(),
            Expr::Item(base, key) => {
                let key = self.eval(key);
                self.eval(base).get_item(&key).cloned().unwrap_or_default()
            }
            Expr::Method(base, method) => {
                let value = self.eval(base);
                let Some(map) = value.as_map() else {
                    return Value::Seq(Vec::new());
                };
                let items = match method {
                    MapMethod::Items => map
                        .iter()
                        .map(|(k, v)| Value::Seq(vec![Value::from(k.as_str()), v.clone()]))
                        .collect(),
                    MapMethod::Keys => map.keys().map(|k| Value::from(k.as_str())).collect(),
                    MapMethod::Values => map.values().cloned().collect(),
                };
                Value::Seq(items)
            }
            Expr::Not(inner) => Value::Bool(!self.eval(inner).is_true()),
            Expr::And(left, right) => {
                let left = self.eval(left);
                if left.is_true() {
                    self.eval(right)
                } else {
                    left
                }
            }
            Expr::Or(left, right) => {
                let left = self.eval(left);
                if left.is_true() {
                    left
                } else {
                    self.eval(right)
                }
            }
            Expr::Compare(left, op, right) => {
                let (left, right) = (self.eval(left), self.eval(right));
                Value::Bool(compare(&left, *op, &right))
            }
            Expr::Concat(left, right) => {
                Value::String(format!("{}{}", self.eval(left), self.eval(right)))
            }
            Expr::Filter { expr, name, args, .. } => {
                let value = self.eval(expr);
                let args: Vec<Value> = args.iter().map(|a| self.eval(a)).collect();
                self.filters.apply(name, &value, &args)
            }
            Expr::Test { expr, name, negated } => {
                let value = self.eval(expr);
                let result = match name.as_str() {
                    "defined" => !value.is_none(),
                    "undefined" | "none" => value.is_none(),
                    "true" => value == Value::Bool(true),
                    "false" => value == Value::Bool(false),
                    kind => value.kind() == kind,
                };
                Value::Bool(result != *negated)
            }
        }
    }
}

fn compare(left: &Value, op: CmpOp, right: &Value) -> bool {
    match op {
        CmpOp::Eq => left.loose_eq(right),
        CmpOp::Ne => !left.loose_eq(right),
        CmpOp::Lt => left.compare(right) == Some(Ordering::Less),
        CmpOp::Le => matches!(left.compare(right), Some(Ordering::Less | Ordering::Equal)),
        CmpOp::Gt => left.compare(right) == Some(Ordering::Greater),
        CmpOp::Ge => matches!(left.compare(right), Some(Ordering::Greater | Ordering::Equal)),
        CmpOp::In => right.contains(left),
        CmpOp::NotIn => !right.contains(left),
    }
}
