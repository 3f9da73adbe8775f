use sha1::{Digest, Sha1};

use crate::mapping::element_model::Flattenable;

/// SHA-1 over the `id\tlabel` lines of `elements`, hex encoded.
///
/// Intended for flattened output: two mapping edits that produce the same
/// flat field list share a fingerprint.
pub fn mapping_fingerprint<E: Flattenable>(elements: &[E]) -> String {
    let mut hasher = Sha1::new();
    for element in elements {
        hasher.update(element.id().as_bytes());
        hasher.update(b"\t");
        hasher.update(element.label().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
