use std::collections::HashMap;

/// Injected translation capability.
///
/// Templates use `{name}` placeholders; `substitutions` supplies the values in
/// order. Placeholders without a matching substitution are left verbatim.
pub trait Translator {
    fn translate(&self, template: &str, substitutions: &[(&str, &str)]) -> String;
}

/// Substitution only, no catalog lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, template: &str, substitutions: &[(&str, &str)]) -> String {
        substitute(template, substitutions)
    }
}

/// Looks templates up in a catalog before substituting.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    catalog: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(catalog: HashMap<String, String>) -> Self {
        Self { catalog }
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, template: &str, substitutions: &[(&str, &str)]) -> String {
        let localized = self
            .catalog
            .get(template)
            .map(String::as_str)
            .unwrap_or(template);
        substitute(localized, substitutions)
    }
}

/// Replace each `{name}` in `template` with its substitution.
///
/// Single left-to-right scan, so substituted values are never re-expanded.
pub fn substitute(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match substitutions.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
