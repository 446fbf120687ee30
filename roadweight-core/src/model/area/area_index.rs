use geo::{Intersects, Point, Polygon};
use geojson::FeatureCollection;
use rstar::{
    primitives::{GeomWithData, Rectangle},
    RTree,
};

use crate::{model::CustomModelError, util::geo_utils};

/// position of an area within an [`AreaIndex`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AreaId(pub usize);

type AreaEnvelope = GeomWithData<Rectangle<[f64; 2]>, AreaId>;

/// the named polygons of a custom model, with an R-tree over their bounding
/// boxes. read-only once built, so lookups need no synchronization.
#[derive(Clone, Debug)]
pub struct AreaIndex {
    names: Vec<String>,
    polygons: Vec<Polygon<f64>>,
    rtree: RTree<AreaEnvelope>,
}

impl AreaIndex {
    pub fn empty() -> AreaIndex {
        AreaIndex {
            names: vec![],
            polygons: vec![],
            rtree: RTree::new(),
        }
    }

    /// builds the index from (id, polygon) pairs. polygons are (lon, lat)
    /// rings; only the outer ring is supported.
    pub fn new(areas: Vec<(String, Polygon<f64>)>) -> Result<AreaIndex, CustomModelError> {
        let mut names: Vec<String> = Vec::with_capacity(areas.len());
        let mut polygons = Vec::with_capacity(areas.len());
        let mut envelopes = Vec::with_capacity(areas.len());
        for (idx, (name, polygon)) in areas.into_iter().enumerate() {
            let invalid = |message: &str| CustomModelError::InvalidArea {
                id: name.clone(),
                message: message.to_string(),
            };
            if names.contains(&name) {
                return Err(invalid("declared more than once"));
            }
            if !polygon.interiors().is_empty() {
                return Err(invalid("polygons with holes are not supported"));
            }
            if polygon.exterior().0.len() < 4 {
                return Err(invalid("outer ring needs at least three distinct points"));
            }
            let envelope = geo_utils::get_polygon_envelope(&polygon)
                .ok_or_else(|| invalid("polygon has no bounding box"))?;
            envelopes.push(GeomWithData::new(envelope, AreaId(idx)));
            names.push(name);
            polygons.push(polygon);
        }
        Ok(AreaIndex {
            names,
            polygons,
            rtree: RTree::bulk_load(envelopes),
        })
    }

    pub fn area_id(&self, name: &str) -> Option<AreaId> {
        self.names.iter().position(|n| n == name).map(AreaId)
    }

    pub fn name(&self, area: AreaId) -> Option<&str> {
        self.names.get(area.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// true if the point lies inside the area or on its boundary
    pub fn contains_point(&self, area: AreaId, point: &Point<f64>) -> bool {
        self.rtree
            .locate_all_at_point(&[point.x(), point.y()])
            .any(|envelope| envelope.data == area && self.polygons[area.0].intersects(point))
    }

    /// tests a set of representative points of an edge. the set must be
    /// non-empty and every point must be within the area.
    pub fn contains_all(&self, area: AreaId, points: &[Point<f64>]) -> bool {
        !points.is_empty() && points.iter().all(|p| self.contains_point(area, p))
    }
}

impl TryFrom<&FeatureCollection> for AreaIndex {
    type Error = CustomModelError;

    /// reads areas from GeoJSON features, using the feature id as area id
    fn try_from(collection: &FeatureCollection) -> Result<Self, Self::Error> {
        let areas = collection
            .features
            .iter()
            .enumerate()
            .map(|(n, feature)| {
                let id = geo_utils::get_feature_id(feature).ok_or_else(|| {
                    CustomModelError::InvalidArea {
                        id: format!("feature {n}"),
                        message: String::from("feature has no id"),
                    }
                })?;
                let polygon = geo_utils::try_feature_polygon(feature)
                    .map_err(|message| CustomModelError::InvalidArea {
                        id: id.clone(),
                        message,
                    })?;
                Ok((id, polygon))
            })
            .collect::<Result<Vec<_>, CustomModelError>>()?;
        AreaIndex::new(areas)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{line_string, point, polygon};

    fn custom1() -> Polygon<f64> {
        polygon![
            (x: 11.5818, y: 50.0126),
            (x: 11.5818, y: 50.0119),
            (x: 11.5861, y: 50.0119),
            (x: 11.5861, y: 50.0126),
            (x: 11.5818, y: 50.0126)
        ]
    }

    #[test]
    fn test_contains_all_points() {
        let index = AreaIndex::new(vec![("custom1".to_string(), custom1())])
            .expect("test invariant failed: could not build area index");
        let area = index.area_id("custom1").expect("area should exist");
        let inside = vec![
            point!(x: 11.582, y: 50.0120),
            point!(x: 11.585, y: 50.0125)
        ];
        let partly = vec![point!(x: 11.582, y: 50.0120), point!(x: 8.1, y: 40.1)];
        assert!(index.contains_all(area, &inside));
        assert!(!index.contains_all(area, &partly));
        assert!(!index.contains_all(area, &[]));
        // boundary counts as inside
        assert!(index.contains_point(area, &point!(x: 11.5818, y: 50.0120)));
    }

    #[test]
    fn test_overlapping_envelopes() {
        let other = polygon![
            (x: 11.0, y: 50.0),
            (x: 12.0, y: 50.0),
            (x: 12.0, y: 51.0),
            (x: 11.0, y: 50.0)
        ];
        let index = AreaIndex::new(vec![
            ("custom1".to_string(), custom1()),
            ("wide".to_string(), other)
        ])
        .expect("test invariant failed: could not build area index");
        let wide = index.area_id("wide").expect("area should exist");
        let custom1 = index.area_id("custom1").expect("area should exist");
        let p = point!(x: 11.9, y: 50.05);
        assert!(index.contains_point(wide, &p));
        assert!(!index.contains_point(custom1, &p));
        // inside the bounding box of "wide" but above its diagonal
        assert!(!index.contains_point(wide, &point!(x: 11.1, y: 50.5)));
    }

    #[test]
    fn test_rejects_holes_and_duplicates() {
        let with_hole = Polygon::new(
            line_string![
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 10.0, y: 10.0),
                (x: 0.0, y: 0.0)
            ],
            vec![line_string![
                (x: 5.0, y: 1.0),
                (x: 6.0, y: 1.0),
                (x: 6.0, y: 2.0),
                (x: 5.0, y: 1.0)
            ]],
        );
        let result = AreaIndex::new(vec![("holey".to_string(), with_hole)]);
        assert!(matches!(result, Err(CustomModelError::InvalidArea { id, .. }) if id == "holey"));

        let result = AreaIndex::new(vec![
            ("a".to_string(), custom1()),
            ("a".to_string(), custom1())
        ]);
        assert!(matches!(result, Err(CustomModelError::InvalidArea { .. })));
    }

    #[test]
    fn test_from_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "custom1",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[11.5818,50.0126],[11.5818,50.0119],[11.5861,50.0119],[11.5861,50.0126],[11.5818,50.0126]]]
                }
            }]
        }"#;
        let collection: FeatureCollection =
            serde_json::from_str(json).expect("test invariant failed: invalid GeoJSON");
        let index = AreaIndex::try_from(&collection).expect("areas should load");
        assert_eq!(index.len(), 1);
        assert_eq!(index.name(AreaId(0)), Some("custom1"));
    }

    #[test]
    fn test_rejects_non_polygon_feature() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": 7,
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [11.0, 50.0] }
            }]
        }"#;
        let collection: FeatureCollection =
            serde_json::from_str(json).expect("test invariant failed: invalid GeoJSON");
        let result = AreaIndex::try_from(&collection);
        assert!(matches!(result, Err(CustomModelError::InvalidArea { id, .. }) if id == "7"));
    }
}
