//! Special-anchor lookup.
//!
//! Finding a toolbar title or an overflow button depends on host
//! internals, so it is best-effort: a resolver either returns an element
//! or nothing, and the overlay turns nothing into
//! [`OverlayError::AnchorNotFound`](crate::error::OverlayError::AnchorNotFound).

use std::fmt;

use crate::host::ElementHandle;

/// Well-known anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorRole {
    /// The toolbar's home/up button.
    Home,
    /// The toolbar's title text.
    Title,
    /// The overflow menu button.
    OverflowMenu,
}

/// A request for an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorQuery {
    /// Element by platform identifier.
    Id(u32),
    /// Element by role.
    Role(AnchorRole),
}

impl fmt::Display for AnchorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "element with id {id}"),
            Self::Role(AnchorRole::Home) => f.write_str("toolbar home button"),
            Self::Role(AnchorRole::Title) => f.write_str("toolbar title"),
            Self::Role(AnchorRole::OverflowMenu) => f.write_str("overflow menu button"),
        }
    }
}

/// Locates anchor elements in the host tree.
pub trait AnchorResolver {
    /// Returns the element for the query, or `None` on any mismatch.
    fn resolve_anchor(&self, query: &AnchorQuery) -> Option<ElementHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_display() {
        assert_eq!(AnchorQuery::Id(42).to_string(), "element with id 42");
        assert_eq!(
            AnchorQuery::Role(AnchorRole::OverflowMenu).to_string(),
            "overflow menu button"
        );
    }
}
