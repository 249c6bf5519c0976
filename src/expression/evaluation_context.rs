use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Values available to every evaluation regardless of feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalProperties {
    /// Current map zoom.
    #[serde(default)]
    pub zoom: Option<f64>,
    /// Kernel density estimate, set only while rendering heatmaps.
    #[serde(default)]
    pub heatmap_density: Option<f64>,
}

impl GlobalProperties {
    /// Globals carrying just a zoom level.
    pub fn at_zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            ..Self::default()
        }
    }
}

/// Geometry class of a rendered feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    /// Point or multipoint.
    Point,
    /// Line or multiline.
    LineString,
    /// Polygon or multipolygon.
    Polygon,
}

impl GeometryType {
    /// Name as reported by `["geometry-type"]`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
        }
    }
}

/// A rendered feature as seen by style evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature id, if the source provides one.
    #[serde(default)]
    pub id: Option<Json>,
    /// Geometry class.
    #[serde(default, rename = "type")]
    pub geometry_type: Option<GeometryType>,
    /// Feature properties.
    #[serde(default)]
    pub properties: Map<String, Json>,
}

impl Feature {
    /// A feature with the given properties and nothing else.
    pub fn with_properties(properties: Map<String, Json>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Property lookup.
    pub fn property(&self, key: &str) -> Option<&Json> {
        self.properties.get(key)
    }
}

/// Read-only view threaded through `evaluate` calls. One per evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Zoom and other global values.
    pub globals: &'a GlobalProperties,
    /// The feature being styled, if any.
    pub feature: Option<&'a Feature>,
}

impl<'a> EvaluationContext<'a> {
    /// Context for `globals` with no feature.
    pub fn new(globals: &'a GlobalProperties) -> Self {
        Self {
            globals,
            feature: None,
        }
    }

    /// Attach a feature.
    pub fn with_feature(mut self, feature: &'a Feature) -> Self {
        self.feature = Some(feature);
        self
    }

    /// Property of the current feature, if both exist.
    pub fn property(&self, key: &str) -> Option<&'a Json> {
        self.feature.and_then(|f| f.property(key))
    }
}
