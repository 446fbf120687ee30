use geo::{Geometry, Polygon};
use geojson::{feature::Id, Feature, FeatureCollection};
use serde::{Deserialize, Serialize};

use super::{SpeedUnit, Statement};
use crate::{model::CustomModelError, util::geo_utils};

/// declarative description of how edge attributes turn into speeds and
/// priorities. compiled into a weighting by
/// [`crate::model::compiler::CustomModelCompiler`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomModel {
    /// decimal attribute holding the base speed of an edge
    #[serde(default)]
    pub speed_attribute: String,
    #[serde(default)]
    pub speed_unit: SpeedUnit,
    #[serde(default)]
    pub speed: Vec<Statement>,
    #[serde(default)]
    pub priority: Vec<Statement>,
    /// extra weight per 1000 meters, regardless of speed and priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_influence: Option<f64>,
    /// seconds added to unfavored edges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_penalty: Option<f64>,
    /// polygons referenced by `in_<id>` conditions, keyed by feature id
    #[serde(default = "empty_areas")]
    pub areas: FeatureCollection,
}

impl Default for CustomModel {
    fn default() -> Self {
        CustomModel {
            speed_attribute: String::new(),
            speed_unit: SpeedUnit::default(),
            speed: vec![],
            priority: vec![],
            distance_influence: None,
            heading_penalty: None,
            areas: empty_areas(),
        }
    }
}

impl CustomModel {
    pub fn new(speed_attribute: &str) -> CustomModel {
        CustomModel {
            speed_attribute: speed_attribute.to_string(),
            ..Default::default()
        }
    }

    pub fn with_speed_unit(mut self, speed_unit: SpeedUnit) -> Self {
        self.speed_unit = speed_unit;
        self
    }

    pub fn add_to_speed(mut self, statement: Statement) -> Self {
        self.speed.push(statement);
        self
    }

    pub fn add_to_priority(mut self, statement: Statement) -> Self {
        self.priority.push(statement);
        self
    }

    pub fn set_distance_influence(mut self, distance_influence: f64) -> Self {
        self.distance_influence = Some(distance_influence);
        self
    }

    pub fn set_heading_penalty(mut self, heading_penalty: f64) -> Self {
        self.heading_penalty = Some(heading_penalty);
        self
    }

    /// adds a polygon that conditions can reference as `in_<id>`
    pub fn add_area(mut self, id: &str, polygon: Polygon<f64>) -> Self {
        let geometry = geojson::Geometry::from(&Geometry::Polygon(polygon));
        self.areas.features.push(Feature {
            bbox: None,
            geometry: Some(geometry),
            id: Some(Id::String(id.to_string())),
            properties: None,
            foreign_members: None,
        });
        self
    }

    /// refines this (profile) model with a model sent along with a request.
    ///
    /// statements of the query are appended, so they apply after the
    /// profile's statements. a query LIMIT can only narrow what the profile
    /// allows, while a query MULTIPLY above 1 raises speed or priority and
    /// the derived bounds with it. scalar parameters of the query replace
    /// those of the profile.
    /// areas are combined; an area id declared by both models is an error,
    /// as is a query that names a different speed attribute.
    pub fn merge(&self, query: &CustomModel) -> Result<CustomModel, CustomModelError> {
        if !query.speed_attribute.is_empty() && query.speed_attribute != self.speed_attribute {
            return Err(CustomModelError::InvalidParameter {
                parameter: String::from("speed_attribute"),
                message: format!(
                    "query uses '{}' but the profile is built on '{}'",
                    query.speed_attribute, self.speed_attribute
                ),
            });
        }
        let mut merged = self.clone();
        merged.speed.extend(query.speed.iter().cloned());
        merged.priority.extend(query.priority.iter().cloned());
        if query.distance_influence.is_some() {
            merged.distance_influence = query.distance_influence;
        }
        if query.heading_penalty.is_some() {
            merged.heading_penalty = query.heading_penalty;
        }
        let existing: Vec<String> = self
            .areas
            .features
            .iter()
            .filter_map(geo_utils::get_feature_id)
            .collect();
        for feature in query.areas.features.iter() {
            if let Some(id) = geo_utils::get_feature_id(feature) {
                if existing.contains(&id) {
                    return Err(CustomModelError::InvalidArea {
                        id,
                        message: String::from("declared by both the profile and the query"),
                    });
                }
            }
            merged.areas.features.push(feature.clone());
        }
        Ok(merged)
    }
}

impl std::str::FromStr for CustomModel {
    type Err = serde_json::Error;

    /// reads a custom model from its JSON form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

fn empty_areas() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![],
        foreign_members: None,
    }
}
