// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

use crate::ident::SegmentId;

/// Rejected model mutations. A rejected call leaves the model untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Vertex range outside the segment or reversed.
    #[error("segment {segment}: vertex range {from}..={to} outside 0..{len}")]
    InvalidSegmentIndices {
        /// Target segment.
        segment: SegmentId,
        /// Requested first index.
        from: usize,
        /// Requested last index.
        to: usize,
        /// Vertex count of the segment.
        len: usize,
    },
    /// Diameter must be finite and non-negative.
    #[error("invalid pipe diameter: {0}")]
    InvalidDiameter(f64),
    /// Split position must be an interior vertex.
    #[error("segment {segment}: cannot split at vertex {at} of {len}")]
    InvalidSplit {
        /// Target segment.
        segment: SegmentId,
        /// Requested split vertex.
        at: usize,
        /// Vertex count of the segment.
        len: usize,
    },
}

/// Failures decoding a scheme document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Payload was not a valid feature collection.
    #[error("malformed scheme document: {0}")]
    Json(#[from] serde_json::Error),
}
