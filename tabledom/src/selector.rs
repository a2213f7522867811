//! A small CSS selector subset: type, `#id`, `.class`, `[attr]`,
//! `[attr=value]`, `*`, the descendant combinator and selector lists.

use std::str::FromStr;

use crate::document::Document;
use crate::error::SelectorError;
use crate::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Exists,
    Equals(String),
}

/// One compound selector such as `tr.odd[data-x]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    /// Written as `*`; an empty compound still counts as a step then.
    universal: bool,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrMatch)>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn is_step(&self) -> bool {
        self.universal || !self.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag(node) else {
            return false;
        };
        if let Some(want) = &self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if doc.attr(node, "id") != Some(want.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| doc.has_class(node, c)) {
            return false;
        }
        self.attrs.iter().all(|(name, m)| match (m, doc.attr(node, name)) {
            (_, None) => false,
            (AttrMatch::Exists, Some(_)) => true,
            (AttrMatch::Equals(want), Some(have)) => want == have,
        })
    }
}

/// Compounds joined by descendant combinators, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<Compound>,
}

impl Complex {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(doc, node) {
            return false;
        }

        // Greedy right-to-left ancestor walk is exact for descendant-only chains.
        let mut remaining: Vec<&Compound> = rest.iter().collect();
        let mut cursor = doc.parent(node);
        while let Some(ancestor) = cursor {
            let Some(compound) = remaining.last() else {
                break;
            };
            if compound.matches(doc, ancestor) {
                remaining.pop();
            }
            cursor = doc.parent(ancestor);
        }
        remaining.is_empty()
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for piece in input.split(',') {
            alternatives.push(parse_complex(piece, input)?);
        }
        Ok(Self { alternatives })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, node))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_complex(piece: &str, whole: &str) -> Result<Complex, SelectorError> {
    // Offsets in errors refer to the whole input.
    let base = piece.as_ptr() as usize - whole.as_ptr() as usize;
    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let mut parts = Vec::new();
    let mut current = Compound::default();
    let mut i = 0;

    let take_name = |i: &mut usize| -> String {
        let mut name = String::new();
        while let Some(&(_, c)) = chars.get(*i) {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            *i += 1;
        }
        name
    };

    while let Some(&(offset, c)) = chars.get(i) {
        match c {
            c if c.is_whitespace() => {
                if current.is_step() {
                    parts.push(std::mem::take(&mut current));
                }
                i += 1;
            }
            '*' => {
                current.universal = true;
                i += 1;
            }
            '#' | '.' => {
                i += 1;
                let name = take_name(&mut i);
                if name.is_empty() {
                    return Err(SelectorError::MissingName(c));
                }
                if c == '#' {
                    current.id = Some(name);
                } else {
                    current.classes.push(name);
                }
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|&(_, c)| c == ']')
                    .map(|p| i + p)
                    .ok_or(SelectorError::UnterminatedAttribute(base + offset))?;
                let body: String = chars[i + 1..close].iter().map(|&(_, c)| c).collect();
                let (name, matcher) = match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        (name.trim().to_string(), AttrMatch::Equals(value.to_string()))
                    }
                    None => (body.trim().to_string(), AttrMatch::Exists),
                };
                if name.is_empty() || !name.chars().all(is_name_char) {
                    return Err(SelectorError::MissingName('['));
                }
                current.attrs.push((name.to_ascii_lowercase(), matcher));
                i = close + 1;
            }
            c if is_name_char(c) => {
                let name = take_name(&mut i);
                current.tag = Some(name.to_ascii_lowercase());
            }
            other => {
                return Err(SelectorError::Unexpected {
                    found: other,
                    offset: base + offset,
                })
            }
        }
    }

    if current.is_step() {
        parts.push(current);
    }
    if parts.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(Complex { parts })
}

impl Document {
    /// Elements matching `selector` in document order. With a `scope`, only
    /// descendants of the scope are returned, though leading compounds may be
    /// satisfied by ancestors outside it.
    pub fn select(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let scope = scope.unwrap_or_else(|| self.root());
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// Parse and run `selector`.
    pub fn select_str(&self, scope: Option<NodeId>, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(scope, &selector))
    }

    pub fn select_first(&self, scope: Option<NodeId>, selector: &Selector) -> Option<NodeId> {
        let scope = scope.unwrap_or_else(|| self.root());
        self.descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n))
    }
}
