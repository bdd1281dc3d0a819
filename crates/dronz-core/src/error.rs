//! Error types for region inputs.

use thiserror::Error;

/// A caller handed the geometry layer a region it cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("no region was supplied")]
    MissingRegion,

    #[error("region `{found}` is not the central area (expected `{expected}`)")]
    NotCentralArea { found: String, expected: String },

    #[error("region `{name}` has {count} vertices, at least 3 are required")]
    DegenerateRegion { name: String, count: usize },

    #[error("region `{name}` has a non-finite coordinate at vertex {index}")]
    NonFiniteVertex { name: String, index: usize },
}
