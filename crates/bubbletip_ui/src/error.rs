//! # Overlay Error Types
//!
//! Geometry and animation never fail; everything here comes from the host
//! or from anchor lookup.

use thiserror::Error;

use crate::anchor::AnchorQuery;

/// Errors that can occur while showing a tooltip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// Special-anchor resolution could not locate the element.
    #[error("anchor not found: {query}")]
    AnchorNotFound {
        /// The lookup that failed.
        query: AnchorQuery,
    },

    /// The host cannot accept the bubble (e.g. no overlay container).
    #[error("invalid host state: {0}")]
    InvalidHostState(String),

    /// Settings file could not be parsed or holds invalid values.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
