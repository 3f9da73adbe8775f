use serde::Serialize;

// ============================================================================
// Mapped content elements
// ============================================================================

/// A single mapped content field: stable id plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub id: String,
    pub label: String,
}

/// Container element holding an ordered list of child elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub id: String,
    pub label: String,
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Plain(Field),
    Component(Component),
}

impl Element {
    pub fn plain(id: impl Into<String>, label: impl Into<String>) -> Self {
        Element::Plain(Field {
            id: id.into(),
            label: label.into(),
        })
    }

    pub fn component(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<Element>,
    ) -> Self {
        Element::Component(Component {
            id: id.into(),
            label: label.into(),
            children,
        })
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Element::Component(_))
    }
}

/// A loaded mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingDefinition {
    pub name: String,
    pub elements: Vec<Element>,
}

// ============================================================================
// Flattening contract
// ============================================================================

/// What `flatten` sees of a component once its wrapper is removed.
#[derive(Debug)]
pub enum Unwrapped<E> {
    Plain(E),
    Component {
        id: String,
        label: String,
        children: Vec<E>,
    },
}

/// Accessors the flattener needs from an element type.
///
/// `Element` implements this; any caller-owned element representation can
/// implement it too and reuse `flatten` directly.
pub trait Flattenable: Sized {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    /// Overwrite id and label in place.
    fn relabel(&mut self, id: String, label: String);

    /// Hand back a plain element untouched, or consume a component into its parts.
    fn into_component(self) -> Unwrapped<Self>;

    fn is_component(&self) -> bool;

    /// Child count for components, `None` for plain elements.
    fn child_count(&self) -> Option<usize>;
}

impl Flattenable for Element {
    fn id(&self) -> &str {
        match self {
            Element::Plain(f) => &f.id,
            Element::Component(c) => &c.id,
        }
    }

    fn label(&self) -> &str {
        match self {
            Element::Plain(f) => &f.label,
            Element::Component(c) => &c.label,
        }
    }

    fn relabel(&mut self, id: String, label: String) {
        match self {
            Element::Plain(f) => {
                f.id = id;
                f.label = label;
            }
            Element::Component(c) => {
                c.id = id;
                c.label = label;
            }
        }
    }

    fn into_component(self) -> Unwrapped<Self> {
        match self {
            Element::Component(c) => Unwrapped::Component {
                id: c.id,
                label: c.label,
                children: c.children,
            },
            plain => Unwrapped::Plain(plain),
        }
    }

    fn is_component(&self) -> bool {
        Element::is_component(self)
    }

    fn child_count(&self) -> Option<usize> {
        match self {
            Element::Plain(_) => None,
            Element::Component(c) => Some(c.children.len()),
        }
    }
}
