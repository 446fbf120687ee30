use std::{collections::HashMap, path::Path};

use geo::{Geometry, Point};
use roadweight_core::model::attribute::{
    AttributeConfig, AttributeKind, EdgeId, InMemoryEdge, InMemoryRegistry, NodeId,
};
use wkt::TryFromWkt;

use super::AppError;

/// reads an edge list CSV into edges laid out by the registry.
///
/// required columns are `edge_id`, `base_node`, `adj_node` and `distance`
/// (meters). optional columns: `geometry` (WKT LINESTRING or POINT in lon/lat,
/// used for area conditions), `unfavored` (true/false, both directions),
/// and for every declared attribute `<name>` with an optional
/// `<name>_reverse`. attributes without a column keep their default value.
pub fn read_edges(path: &Path, registry: &InMemoryRegistry) -> Result<Vec<InMemoryEdge>, AppError> {
    let path_str = path.to_string_lossy().to_string();
    let csv_error = |source: csv::Error| AppError::Csv {
        path: path_str.clone(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: HashMap<String, usize> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(idx, col)| (String::from(col), idx))
        .collect();
    for required in ["edge_id", "base_node", "adj_node", "distance"] {
        if !headers.contains_key(required) {
            return Err(AppError::InvalidEdge {
                path: path_str.clone(),
                row: 0,
                message: format!("missing required column '{required}'"),
            });
        }
    }

    let mut edges = vec![];
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let row = EdgeRow {
            headers: &headers,
            record: &record,
        };
        let edge = row.to_edge(registry).map_err(|message| AppError::InvalidEdge {
            path: path_str.clone(),
            row: idx + 1,
            message,
        })?;
        edges.push(edge);
    }
    log::info!("read {} edges from {path_str}", edges.len());
    Ok(edges)
}

struct EdgeRow<'a> {
    headers: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl EdgeRow<'_> {
    fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .get(column)
            .and_then(|idx| self.record.get(*idx))
            .filter(|value| !value.is_empty())
    }

    fn required(&self, column: &str) -> Result<&str, String> {
        self.get(column)
            .ok_or_else(|| format!("missing value for '{column}'"))
    }

    fn parse<T: std::str::FromStr>(&self, column: &str) -> Result<T, String>
    where
        T::Err: std::fmt::Display,
    {
        let value = self.required(column)?;
        value
            .parse::<T>()
            .map_err(|e| format!("invalid value '{value}' for '{column}': {e}"))
    }

    fn to_edge(&self, registry: &InMemoryRegistry) -> Result<InMemoryEdge, String> {
        let mut edge = registry.new_edge(
            EdgeId(self.parse("edge_id")?),
            NodeId(self.parse("base_node")?),
            NodeId(self.parse("adj_node")?),
            self.parse("distance")?,
        );
        if let Some(wkt) = self.get("geometry") {
            edge.set_points(parse_points(wkt)?);
        }
        if let Some(unfavored) = self.get("unfavored") {
            edge.set_unfavored(parse_bool(unfavored)?);
        }
        for attribute in registry.attributes() {
            self.set_attribute(registry, &mut edge, attribute)?;
        }
        Ok(edge)
    }

    fn set_attribute(
        &self,
        registry: &InMemoryRegistry,
        edge: &mut InMemoryEdge,
        attribute: &AttributeConfig,
    ) -> Result<(), String> {
        let name = attribute.name.as_str();
        let reverse_column = format!("{name}_reverse");
        let Some(forward) = self.get(name) else {
            return Ok(());
        };
        let reverse = self.get(&reverse_column).unwrap_or(forward);
        let result = match attribute.kind {
            AttributeKind::Boolean => {
                registry.set_bool(edge, name, parse_bool(forward)?, parse_bool(reverse)?)
            }
            AttributeKind::Enum => registry.set_enum(edge, name, forward, reverse),
            AttributeKind::Decimal => registry.set_decimal(
                edge,
                name,
                self.parse(name)?,
                parse_decimal(&reverse_column, reverse)?,
            ),
        };
        result.map_err(|e| e.to_string())
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(format!("expected true or false, found '{value}'")),
    }
}

fn parse_decimal(column: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|e| format!("invalid value '{value}' for '{column}': {e}"))
}

fn parse_points(wkt: &str) -> Result<Vec<Point<f64>>, String> {
    let geometry = Geometry::<f64>::try_from_wkt_str(wkt)
        .map_err(|e| format!("failure deserializing WKT geometry '{wkt}': {e}"))?;
    match geometry {
        Geometry::LineString(line) => Ok(line.points().collect()),
        Geometry::Point(point) => Ok(vec![point]),
        _ => Err(format!("expected a LINESTRING or POINT geometry, found '{wkt}'")),
    }
}
