// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Backend-shaped scheme fixtures.

use anyhow::{Context, Result};
use pipenet_core::{default_pipe_name, NodeKind};
use pipenet_proto::{
    Feature, FeatureCollection, ObjectId, ObjectType, Properties, SchemeId, PROP_DIAMETER,
    PROP_NAME,
};
use serde_json::Value;
use std::path::Path;

/// Builder for [`FeatureCollection`]s shaped like a scheme load response.
///
/// # Example
///
/// ```
/// use pipenet_core::NodeKind;
/// use pipenet_dry_tests::SchemeBuilder;
///
/// let fc = SchemeBuilder::new(7)
///     .node(NodeKind::Well, 1, [0.0, 0.0])
///     .pipe(3, "Магистраль", &[[0.0, 0.0], [1.0, 1.0]], 110.0)
///     .build();
///
/// assert_eq!(fc.id_scheme, Some(7));
/// assert_eq!(fc.features.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SchemeBuilder {
    fc: FeatureCollection,
}

impl SchemeBuilder {
    /// Empty scheme bound to `id_scheme`.
    pub fn new(id_scheme: SchemeId) -> Self {
        Self {
            fc: FeatureCollection::new(Some(id_scheme)),
        }
    }

    /// Add a point object.
    pub fn node(mut self, kind: NodeKind, id: ObjectId, at: [f64; 2]) -> Self {
        self.fc
            .features
            .push(Feature::point(id, kind.object_type(), at, Properties::new()));
        self
    }

    /// Add a pipe segment with a name and diameter.
    pub fn pipe(mut self, id: ObjectId, name: &str, coords: &[[f64; 2]], diameter: f64) -> Self {
        let mut props = Properties::new();
        props.insert(PROP_NAME.to_owned(), Value::from(name));
        props.insert(PROP_DIAMETER.to_owned(), Value::from(diameter));
        self.fc
            .features
            .push(Feature::line(id, ObjectType::Pipe, coords.to_vec(), props));
        self
    }

    /// Add a pipe segment carrying the default name and no properties besides
    /// the diameter.
    pub fn bare_pipe(self, id: ObjectId, coords: &[[f64; 2]], diameter: f64) -> Self {
        let name = default_pipe_name(id);
        self.pipe(id, &name, coords, diameter)
    }

    /// Add an arbitrary feature.
    pub fn feature(mut self, feature: Feature) -> Self {
        self.fc.features.push(feature);
        self
    }

    /// Finished collection.
    pub fn build(self) -> FeatureCollection {
        self.fc
    }

    /// Finished collection as JSON text.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.fc).context("serialize scheme fixture")
    }
}

/// Read a scheme fixture from disk.
pub fn read_scheme(path: impl AsRef<Path>) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read scheme fixture {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse scheme fixture {}", path.display()))
}
