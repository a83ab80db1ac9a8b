//! Deterministic line-item keys.
//!
//! Two cart additions are "the same selection" exactly when product, size,
//! and color all match. The key is a structured value compared field by
//! field; the rendered string form exists only for the persisted `id` and
//! for callers addressing a line item.

use kuyen_core::ProductId;

/// The uniqueness key of a cart line item.
///
/// Compared structurally, so a size or color containing a separator
/// character can never collide with another selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineItemKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineItemKey {
    /// Build the key for a selection.
    #[must_use]
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }

    /// Render the stable string id stored in the persisted snapshot.
    ///
    /// Size and color are percent-encoded before joining with `:`, which
    /// percent-encoding always escapes, so the rendering is injective.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}:{}:{}",
            self.product_id,
            urlencoding::encode(&self.size),
            urlencoding::encode(&self.color)
        )
    }
}

impl core::fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_same_selection_same_key() {
        let a = LineItemKey::new(ProductId::new(1), "M", "Negro");
        let b = LineItemKey::new(ProductId::new(1), "M", "Negro");
        assert_eq!(a, b);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_different_color_different_key() {
        let a = LineItemKey::new(ProductId::new(1), "M", "Negro");
        let b = LineItemKey::new(ProductId::new(1), "M", "Borgoña");
        assert_ne!(a, b);
        assert_ne!(a.render(), b.render());
    }

    #[test]
    fn test_render_is_collision_safe_for_separator_chars() {
        // A naive "{id}-{size}-{color}" concatenation would render both of
        // these as "1-M-1-Negro".
        let a = LineItemKey::new(ProductId::new(1), "M-1", "Negro");
        let b = LineItemKey::new(ProductId::new(1), "M", "1-Negro");
        assert_ne!(a.render(), b.render());

        // Colons inside a component are escaped, never confused with the
        // separator itself.
        let c = LineItemKey::new(ProductId::new(1), "M:L", "Negro");
        let d = LineItemKey::new(ProductId::new(1), "M", "L:Negro");
        assert_ne!(c.render(), d.render());
    }

    #[test]
    fn test_render_format() {
        let key = LineItemKey::new(ProductId::new(3), "XL", "Azul Medianoche");
        assert_eq!(key.render(), "3:XL:Azul%20Medianoche");
    }
}
