use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    listing::{error::ListingError, rows::Row},
    translate::translator::Translator,
};

pub const LINK_TEXT: &str = "Open";
pub const NOT_AVAILABLE_TEXT: &str = "Not available";

/// One rendered listing cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rendered {
    Link { text: String, href: String },
    Text { text: String },
}

impl Rendered {
    pub fn to_html(&self) -> String {
        match self {
            Rendered::Link { text, href } => format!(
                "<a href=\"{}\">{}</a>",
                escape_html(href),
                escape_html(text)
            ),
            Rendered::Text { text } => escape_html(text),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Link { text, href } => write!(f, "{} ({})", text, href),
            Rendered::Text { text } => write!(f, "{}", text),
        }
    }
}

/// Renders a single listing row into a cell.
pub trait RowRenderer {
    fn render(&self, row: &Row) -> Rendered;
}

pub fn render_listing<R: RowRenderer + ?Sized>(renderer: &R, rows: &[Row]) -> Vec<Rendered> {
    rows.iter().map(|row| renderer.render(row)).collect()
}

// ============================================================================
// Entity link renderer
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Emit `base_url` + path instead of a root-relative path
    #[serde(default)]
    pub absolute: bool,

    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_path_template")]
    pub path_template: String,

    /// Row column holding the entity identifier
    #[serde(default = "default_id_field")]
    pub id_field: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            absolute: false,
            base_url: String::new(),
            path_template: default_path_template(),
            id_field: default_id_field(),
        }
    }
}

fn default_path_template() -> String { "entity/{id}".to_string() }
fn default_id_field() -> String { "id".to_string() }

impl LinkConfig {
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.absolute && self.base_url.trim().is_empty() {
            return Err(ListingError::MissingBaseUrl);
        }
        if !self.path_template.contains("{id}") {
            return Err(ListingError::MissingIdPlaceholder(self.path_template.clone()));
        }
        Ok(())
    }

    pub fn href(&self, id: &str) -> String {
        let path = self.path_template.replace("{id}", id);
        let path = path.trim_start_matches('/');
        if self.absolute {
            format!("{}/{}", self.base_url.trim_end_matches('/'), path)
        } else {
            format!("/{}", path)
        }
    }
}

/// "Open" link for rows with a numeric id, "Not available" for the rest.
pub struct EntityLinkRenderer<T: Translator> {
    config: LinkConfig,
    translator: T,
}

impl<T: Translator> EntityLinkRenderer<T> {
    pub fn new(config: LinkConfig, translator: T) -> Result<Self, ListingError> {
        config.validate()?;
        Ok(Self { config, translator })
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }
}

impl<T: Translator> RowRenderer for EntityLinkRenderer<T> {
    fn render(&self, row: &Row) -> Rendered {
        match row.get(&self.config.id_field).and_then(numeric_id) {
            Some(id) => Rendered::Link {
                text: self.translator.translate(LINK_TEXT, &[]),
                href: self.config.href(&id),
            },
            None => {
                debug!(field = %self.config.id_field, "row has no numeric id");
                Rendered::Text {
                    text: self.translator.translate(NOT_AVAILABLE_TEXT, &[]),
                }
            }
        }
    }
}

/// The identifier as link text, if the value is numeric.
///
/// Accepts JSON numbers and strings of an optional sign, digits and at most
/// one decimal point (`"12"`, `"-3"`, `"4.5"`). Surrounding whitespace is
/// ignored.
pub fn numeric_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let s = s.trim();
            is_numeric(s).then(|| s.to_string())
        }
        _ => None,
    }
}

pub fn is_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    match frac_part {
        None => !int_part.is_empty() && all_digits(int_part),
        Some(frac) => {
            (!int_part.is_empty() || !frac.is_empty())
                && all_digits(int_part)
                && all_digits(frac)
        }
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
