use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use tracing::debug;

use crate::*;

/// Why a string could not be read as a `Value`. Positions are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,
    #[error("bracket opened at byte {pos} is never closed")]
    Unbalanced { pos: usize },
    #[error("unexpected `{found}` at byte {pos}")]
    UnexpectedClose { pos: usize, found: char },
    #[error("node opened at byte {pos} has no kind")]
    MissingKind { pos: usize },
    #[error("trailing input at byte {pos}")]
    Trailing { pos: usize },
    #[error("malformed word `{word}` at byte {pos}")]
    BadName { pos: usize, word: String },
}

/// Printing uses the same syntax `parse_value` reads:
/// `(Kind child ..)`, `Kind` for a childless node, `Kind:name` for a named
/// one, `[child ..]` for a sequence and `_` for a bare placeholder.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        enum Item<'a> {
            Visit(&'a Value),
            Text(&'static str),
        }
        let mut stack = vec![Item::Visit(self)];
        while let Some(item) = stack.pop() {
            let value = match item {
                Item::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Item::Visit(value) => value,
            };
            let children = value.child_slice();
            match value {
                Value::Seq(_) => {
                    f.write_str("[")?;
                    stack.push(Item::Text("]"));
                }
                Value::Node(node) => {
                    if !children.is_empty() {
                        f.write_str("(")?;
                        stack.push(Item::Text(")"));
                    }
                    match &node.name {
                        None if node.kind == *EMPTY_SYM => f.write_str("_")?,
                        Some(name) => write!(f, "{}:{}", node.kind, name)?,
                        None => write!(f, "{}", node.kind)?,
                    }
                }
            }
            // pushed last to first; a sequence has no space before its first item
            for (i, child) in children.iter().enumerate().rev() {
                stack.push(Item::Visit(child));
                if i > 0 || !value.is_seq() {
                    stack.push(Item::Text(" "));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    OpenSeq,
    Close(char),
    Word(&'a str),
}

/// split `s` into brackets and whitespace-separated words, with byte offsets
fn tokenize(s: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = vec![];
    let mut word_start: Option<usize> = None;
    for (i, c) in s.char_indices() {
        let is_bracket = matches!(c, '(' | ')' | '[' | ']');
        if c.is_whitespace() || is_bracket {
            if let Some(start) = word_start.take() {
                tokens.push((start, Token::Word(&s[start..i])));
            }
        }
        match c {
            '(' => tokens.push((i, Token::Open)),
            '[' => tokens.push((i, Token::OpenSeq)),
            ')' | ']' => tokens.push((i, Token::Close(c))),
            _ if c.is_whitespace() => {}
            _ => {
                if word_start.is_none() {
                    word_start = Some(i);
                }
            }
        }
    }
    if let Some(start) = word_start {
        tokens.push((start, Token::Word(&s[start..])));
    }
    tokens
}

/// a bracket that has been opened but not yet closed
enum Open {
    Node { pos: usize, head: Option<(Symbol, Option<Symbol>)>, children: Vec<Value> },
    Seq { pos: usize, items: Vec<Value> },
}

/// `Kind`, `Kind:name` or `_`
fn parse_head(pos: usize, word: &str) -> Result<(Symbol, Option<Symbol>), ParseError> {
    if word == "_" {
        return Ok((EMPTY_SYM.clone(), None));
    }
    match word.split_once(':') {
        None => Ok((word.into(), None)),
        Some((kind, name)) if !kind.is_empty() && !name.is_empty() && !name.contains(':') => {
            Ok((kind.into(), Some(name.into())))
        }
        Some(_) => Err(ParseError::BadName { pos, word: word.to_string() }),
    }
}

fn make_node((kind, name): (Symbol, Option<Symbol>), children: Vec<Value>) -> Value {
    match name {
        Some(name) => Value::named(kind, name, children),
        None => Value::node(kind, children),
    }
}

/// hand a finished value to the innermost open bracket, or make it the result
fn push_value(
    stack: &mut [Open],
    done: &mut Option<Value>,
    value: Value,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        None => *done = Some(value),
        Some(Open::Seq { items, .. }) => items.push(value),
        Some(Open::Node { head: Some(_), children, .. }) => children.push(value),
        Some(Open::Node { head: None, pos, .. }) => {
            return Err(ParseError::MissingKind { pos: *pos })
        }
    }
    Ok(())
}

fn parse_inner(s: &str) -> Result<Value, ParseError> {
    let mut stack: Vec<Open> = vec![];
    let mut done: Option<Value> = None;

    for (pos, token) in tokenize(s) {
        if done.is_some() {
            return Err(ParseError::Trailing { pos });
        }
        match token {
            Token::Open => stack.push(Open::Node { pos, head: None, children: vec![] }),
            Token::OpenSeq => stack.push(Open::Seq { pos, items: vec![] }),
            Token::Word(word) => {
                if let Some(Open::Node { head: head @ None, .. }) = stack.last_mut() {
                    *head = Some(parse_head(pos, word)?);
                    continue;
                }
                let value = make_node(parse_head(pos, word)?, vec![]);
                push_value(&mut stack, &mut done, value)?;
            }
            Token::Close(found) => {
                let value = match (stack.pop(), found) {
                    (Some(Open::Node { head: Some(head), children, .. }), ')') => {
                        make_node(head, children)
                    }
                    (Some(Open::Node { head: None, pos: open, .. }), ')') => {
                        return Err(ParseError::MissingKind { pos: open })
                    }
                    (Some(Open::Seq { items, .. }), ']') => Value::seq(items),
                    _ => return Err(ParseError::UnexpectedClose { pos, found }),
                };
                push_value(&mut stack, &mut done, value)?;
            }
        }
    }

    if let Some(open) = stack.first() {
        let pos = match open {
            Open::Node { pos, .. } | Open::Seq { pos, .. } => *pos,
        };
        return Err(ParseError::Unbalanced { pos });
    }
    done.ok_or(ParseError::Empty)
}

/// Read a tree written in the syntax `Value` displays with. Every node in the
/// result is a fresh allocation, so parsing the same string twice gives two
/// unrelated trees.
pub fn parse_value(s: &str) -> Result<Value, ParseError> {
    parse_inner(s).map_err(|e| {
        debug!(error = %e, input = s, "failed to parse tree");
        e
    })
}

impl FromStr for Value {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s)
    }
}
