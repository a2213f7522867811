use std::fmt;

/// Handle to a node living in a [`Document`](crate::Document) arena.
///
/// Slots are never reused, so a handle to a removed node simply stops
/// resolving instead of pointing at some unrelated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element { tag: String },
    Text(String),
}

/// Owned element description, turned into live nodes by
/// [`Document::from_element`](crate::Document::from_element).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: NodeKind,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.into().to_ascii_lowercase(),
            },
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A bare text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(content.into()),
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn table() -> Self {
        Self::new("table")
    }

    pub fn thead() -> Self {
        Self::new("thead")
    }

    pub fn tbody() -> Self {
        Self::new("tbody")
    }

    pub fn tfoot() -> Self {
        Self::new("tfoot")
    }

    pub fn tr() -> Self {
        Self::new("tr")
    }

    pub fn th(content: impl Into<String>) -> Self {
        Self::new("th").child(Self::text(content))
    }

    pub fn td(content: impl Into<String>) -> Self {
        Self::new("td").child(Self::text(content))
    }

    pub fn span(content: impl Into<String>) -> Self {
        Self::new("span").child(Self::text(content))
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    /// Tag name, or `None` for text and document nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    // Identity
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Boolean-style attribute (present with an empty value).
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        match self.attrs.iter_mut().find(|(k, _)| k == "class") {
            Some(slot) if slot.1.is_empty() => slot.1 = class,
            Some(slot) => {
                slot.1.push(' ');
                slot.1.push_str(&class);
            }
            None => self.attrs.push(("class".to_string(), class)),
        }
        self
    }

    // Visual
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.styles.iter_mut().find(|(k, _)| *k == property) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((property, value)),
        }
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
