use geo::{BoundingRect, Geometry, Polygon};
use geojson::{feature::Id, Feature};
use rstar::primitives::Rectangle;

/// creates an R-tree envelope from the bounding box of a polygon.
///
/// an empty polygon has no bounding box, in which case the result is None.
pub fn get_polygon_envelope(polygon: &Polygon<f64>) -> Option<Rectangle<[f64; 2]>> {
    polygon.bounding_rect().map(|rect| {
        let (min, max) = (rect.min(), rect.max());
        Rectangle::from_corners([min.x, min.y], [max.x, max.y])
    })
}

/// reads the identifier of a GeoJSON feature as a string. numeric ids are
/// rendered in their JSON form.
pub fn get_feature_id(feature: &Feature) -> Option<String> {
    match feature.id.as_ref()? {
        Id::String(s) => Some(s.clone()),
        Id::Number(n) => Some(n.to_string()),
    }
}

/// decodes the geometry of a GeoJSON feature into a polygon.
///
/// # Returns
///
/// * the polygon, or a message describing why the feature is not a polygon
pub fn try_feature_polygon(feature: &Feature) -> Result<Polygon<f64>, String> {
    let geom_json = feature
        .geometry
        .clone()
        .ok_or_else(|| String::from("feature has no geometry"))?;
    let geometry: Geometry<f64> = geom_json
        .try_into()
        .map_err(|e| format!("failure decoding GeoJson geometry to geo-types: {e}"))?;
    match geometry {
        Geometry::Polygon(polygon) => Ok(polygon),
        other => Err(format!(
            "expected a Polygon geometry, found {}",
            geometry_type_name(&other)
        )),
    }
}

fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
