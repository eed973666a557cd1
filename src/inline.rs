//! Inline-style rewriter for the responsive template.

use crate::css::{self, property_value};
use crate::dom::{walk_mut, ElementNode};
use crate::policy::styles_for;

/// Prepend the policy declarations to every element's `style`, in place.
///
/// Author declarations stay at the end of the attribute and therefore win.
/// Running this twice prepends twice; callers should start from a fresh tree.
pub fn inline_styles(root: &mut ElementNode, font_family: &str) {
    let mut touched = 0usize;
    walk_mut(root, &mut |tag, attrs| {
        let existing = attrs.style();
        let align = existing
            .and_then(|s| property_value(s, "text-align"))
            .map(|a| a.to_ascii_lowercase());
        let computed = styles_for(tag, font_family, align.as_deref());
        if let Some(merged) = css::prepend(&computed, existing) {
            log::trace!("<{}> style = {merged:?}", tag.name());
            attrs.set("style", merged);
            touched += 1;
        }
    });
    log::debug!("inlined styles on {touched} elements");
}
