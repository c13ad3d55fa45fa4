// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wire schema for scheme sync with the backend store.
//!
//! Shapes follow the backend's GeoJSON dialect exactly: a `FeatureCollection`
//! whose features carry a `name_object_type` tag in Russian, wrapped in a
//! `{ "data": ... }` request envelope. Pure data; no I/O here.

mod object_type;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub use object_type::{ObjectType, UnknownObjectType};

/// Scheme identifier on the backend.
pub type SchemeId = u64;

/// Backend object id (per object type).
pub type ObjectId = u64;

/// Open property bag carried by every feature.
pub type Properties = BTreeMap<String, serde_json::Value>;

/// Pipe name property (segments of one drawn line share it).
pub const PROP_NAME: &str = "Имя";
/// Pipe diameter property.
pub const PROP_DIAMETER: &str = "Диаметр";
/// Legacy diameter property some older schemes still carry.
pub const PROP_DIAMETER_LEGACY: &str = "diameter";
/// Address property shown in the object passport.
pub const PROP_ADDRESS: &str = "Адрес";

/// Literal `"FeatureCollection"` marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CollectionMarker {
    /// The only accepted value.
    #[default]
    FeatureCollection,
}

/// Literal `"Feature"` marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FeatureMarker {
    /// The only accepted value.
    #[default]
    Feature,
}

/// Feature geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Single coordinate `[x, y]`.
    Point {
        /// Longitude/latitude pair.
        coordinates: [f64; 2],
    },
    /// Ordered coordinates `[[x, y], ...]`.
    LineString {
        /// Vertex list.
        coordinates: Vec<[f64; 2]>,
    },
}

/// One object on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Always `"Feature"`.
    #[serde(rename = "type", default)]
    pub marker: FeatureMarker,
    /// Backend id; absent for objects the backend has never seen.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<ObjectId>,
    /// Object type tag.
    pub name_object_type: ObjectType,
    /// Geometry; `null` in delete requests.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Open property bag (`null` reads as empty).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl Feature {
    /// Point feature.
    #[must_use]
    pub fn point(id: ObjectId, ty: ObjectType, at: [f64; 2], properties: Properties) -> Self {
        Self {
            marker: FeatureMarker::Feature,
            id: Some(id),
            name_object_type: ty,
            geometry: Some(Geometry::Point { coordinates: at }),
            properties,
        }
    }

    /// LineString feature.
    #[must_use]
    pub fn line(id: ObjectId, ty: ObjectType, coords: Vec<[f64; 2]>, properties: Properties) -> Self {
        Self {
            marker: FeatureMarker::Feature,
            id: Some(id),
            name_object_type: ty,
            geometry: Some(Geometry::LineString {
                coordinates: coords,
            }),
            properties,
        }
    }

    /// Delete tombstone: geometry `null`, empty properties.
    #[must_use]
    pub fn tombstone(id: ObjectId, ty: ObjectType) -> Self {
        Self {
            marker: FeatureMarker::Feature,
            id: Some(id),
            name_object_type: ty,
            geometry: None,
            properties: Properties::new(),
        }
    }
}

/// Collection of features, optionally bound to a scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type", default)]
    pub marker: CollectionMarker,
    /// Target scheme (create/delete requests carry it, updates do not).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_scheme: Option<SchemeId>,
    /// Features in request order.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Empty collection, optionally bound to `id_scheme`.
    #[must_use]
    pub fn new(id_scheme: Option<SchemeId>) -> Self {
        Self {
            marker: CollectionMarker::FeatureCollection,
            id_scheme,
            features: Vec::new(),
        }
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// `true` when there are no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Request body envelope: `{ "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    /// Wrapped payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps `data`.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Scheme load request body: `{ "id_scheme": ... }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadRequest {
    /// Scheme to load.
    pub id_scheme: SchemeId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Num(ObjectId),
    Text(String),
    Null,
}

// Older payloads carry ids as numeric strings.
fn lenient_id<'de, D>(de: D) -> Result<Option<ObjectId>, D::Error>
where
    D: Deserializer<'de>,
{
    match IdRepr::deserialize(de)? {
        IdRepr::Num(n) => Ok(Some(n)),
        IdRepr::Text(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("non-numeric feature id: {s:?}"))),
        IdRepr::Null => Ok(None),
    }
}

fn null_as_empty<'de, D>(de: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tombstone_has_null_geometry_and_empty_properties() {
        let mut fc = FeatureCollection::new(Some(12));
        fc.features.push(Feature::tombstone(5, ObjectType::Pipe));
        let v = serde_json::to_value(Envelope::new(fc)).unwrap();
        assert_eq!(
            v,
            json!({
                "data": {
                    "type": "FeatureCollection",
                    "id_scheme": 12,
                    "features": [{
                        "type": "Feature",
                        "id": 5,
                        "name_object_type": "Труба",
                        "geometry": null,
                        "properties": {}
                    }]
                }
            })
        );
    }

    #[test]
    fn update_collection_omits_scheme_id() {
        let fc = FeatureCollection::new(None);
        let v = serde_json::to_value(&fc).unwrap();
        assert_eq!(v, json!({"type": "FeatureCollection", "features": []}));
    }

    #[test]
    fn loads_string_ids_and_null_properties() {
        let f: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "id": "42",
            "name_object_type": "Скважина",
            "geometry": {"type": "Point", "coordinates": [37.6, 55.7]},
            "properties": null
        }))
        .unwrap();
        assert_eq!(f.id, Some(42));
        assert_eq!(f.name_object_type, ObjectType::Well);
        assert!(f.properties.is_empty());
        assert_eq!(
            f.geometry,
            Some(Geometry::Point {
                coordinates: [37.6, 55.7]
            })
        );
    }

    #[test]
    fn missing_id_reads_as_none() {
        let f: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "name_object_type": "Труба",
            "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
            "properties": {"Имя": "Труба #1", "Диаметр": 110}
        }))
        .unwrap();
        assert_eq!(f.id, None);
        assert_eq!(f.properties.get(PROP_DIAMETER), Some(&json!(110)));
    }
}
