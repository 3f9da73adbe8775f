use tracing::debug;

use crate::{
    mapping::element_model::{Flattenable, Unwrapped},
    translate::translator::{PassthroughTranslator, Translator},
};

/// Label template for a flattened child; `{component}` is the parent label.
pub const CHILD_LABEL_TEMPLATE: &str = "{component}: {field}";

/// Replace every component with its children, one level deep.
///
/// Each child gets the label `"{component}: {field}"` and the id
/// `"{component_id}/{field_id}"`, and takes the position its component held.
/// Plain elements pass through untouched. A component nested inside a
/// component is relabeled like any other child but stays a component; use
/// [`flatten_deep`] to expand every level.
///
/// ```text
/// [Name, Address{Street, City}]  ->  [Name, Address: Street, Address: City]
///  1     5      1       2             1     5/1              5/2
/// ```
pub fn flatten<E: Flattenable>(elements: Vec<E>) -> Vec<E> {
    flatten_with(elements, &PassthroughTranslator)
}

/// [`flatten`] with the child label composed through `translator`.
pub fn flatten_with<E, T>(elements: Vec<E>, translator: &T) -> Vec<E>
where
    E: Flattenable,
    T: Translator + ?Sized,
{
    let mut out = Vec::with_capacity(flattened_len(&elements));

    for element in elements {
        match element.into_component() {
            Unwrapped::Plain(plain) => out.push(plain),
            Unwrapped::Component {
                id,
                label,
                children,
            } => {
                debug!(component = %id, children = children.len(), "expanding component");
                for mut child in children {
                    let child_label = translator.translate(
                        CHILD_LABEL_TEMPLATE,
                        &[("component", label.as_str()), ("field", child.label())],
                    );
                    let child_id = format!("{}/{}", id, child.id());
                    child.relabel(child_id, child_label);
                    out.push(child);
                }
            }
        }
    }

    out
}

/// Flatten until no component remains, composing labels and ids at every level.
pub fn flatten_deep<E: Flattenable>(elements: Vec<E>) -> Vec<E> {
    flatten_deep_with(elements, &PassthroughTranslator)
}

pub fn flatten_deep_with<E, T>(elements: Vec<E>, translator: &T) -> Vec<E>
where
    E: Flattenable,
    T: Translator + ?Sized,
{
    let mut current = elements;
    let mut passes = 0usize;
    while !is_flat(&current) {
        current = flatten_with(current, translator);
        passes += 1;
    }
    debug!(passes, len = current.len(), "deep flatten complete");
    current
}

/// Output length of a single [`flatten`] pass.
pub fn flattened_len<E: Flattenable>(elements: &[E]) -> usize {
    elements
        .iter()
        .map(|e| e.child_count().unwrap_or(1))
        .sum()
}

pub fn is_flat<E: Flattenable>(elements: &[E]) -> bool {
    !elements.iter().any(Flattenable::is_component)
}
