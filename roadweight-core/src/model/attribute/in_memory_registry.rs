use std::collections::HashMap;

use itertools::Itertools;

use super::{
    AttributeConfig, AttributeError, AttributeId, AttributeKind, AttributeRegistry,
    BooleanHandle, DecimalAttribute, DecimalHandle, EdgeId, EnumAttribute, EnumHandle,
    InMemoryEdge, NodeId,
};

/// registry backed by a list of attribute declarations. each attribute gets a
/// slot in the storage of its kind, in declaration order.
#[derive(Clone, Debug)]
pub struct InMemoryRegistry {
    attributes: Vec<AttributeConfig>,
    lookup: HashMap<String, (usize, AttributeId)>,
    slots: (usize, usize, usize),
}

impl InMemoryRegistry {
    pub fn new(attributes: Vec<AttributeConfig>) -> Result<InMemoryRegistry, AttributeError> {
        let mut lookup = HashMap::with_capacity(attributes.len());
        let (mut n_boolean, mut n_enum, mut n_decimal) = (0, 0, 0);
        for (idx, attribute) in attributes.iter().enumerate() {
            validate_declaration(attribute)?;
            let counter = match attribute.kind {
                AttributeKind::Boolean => &mut n_boolean,
                AttributeKind::Enum => &mut n_enum,
                AttributeKind::Decimal => &mut n_decimal,
            };
            let id = AttributeId(*counter);
            *counter += 1;
            if lookup.insert(attribute.name.clone(), (idx, id)).is_some() {
                return Err(AttributeError::Duplicate(attribute.name.clone()));
            }
        }
        log::debug!(
            "registry with {n_boolean} boolean, {n_enum} enum and {n_decimal} decimal attributes"
        );
        Ok(InMemoryRegistry {
            attributes,
            lookup,
            slots: (n_boolean, n_enum, n_decimal),
        })
    }

    pub fn attributes(&self) -> &[AttributeConfig] {
        &self.attributes
    }

    /// creates an edge with default values for every attribute: false, the
    /// first enum value and 0.0.
    pub fn new_edge(
        &self,
        edge_id: EdgeId,
        base_node: NodeId,
        adj_node: NodeId,
        distance: f64,
    ) -> InMemoryEdge {
        InMemoryEdge::new(edge_id, base_node, adj_node, distance, self.slots)
    }

    pub fn set_bool(
        &self,
        edge: &mut InMemoryEdge,
        name: &str,
        forward: bool,
        reverse: bool,
    ) -> Result<(), AttributeError> {
        let (config, id) = self.slot(name, AttributeKind::Boolean)?;
        check_direction(config, forward == reverse)?;
        edge.booleans[id.0] = [forward, reverse];
        Ok(())
    }

    pub fn set_enum(
        &self,
        edge: &mut InMemoryEdge,
        name: &str,
        forward: &str,
        reverse: &str,
    ) -> Result<(), AttributeError> {
        let (config, id) = self.slot(name, AttributeKind::Enum)?;
        check_direction(config, forward == reverse)?;
        let ordinal = |value: &str| {
            config
                .values
                .iter()
                .position(|v| v == value)
                .map(|idx| idx as u32)
                .ok_or_else(|| AttributeError::InvalidValue {
                    name: name.to_string(),
                    message: format!(
                        "'{value}' is not one of [{}]",
                        config.values.join(", ")
                    ),
                })
        };
        edge.enums[id.0] = [ordinal(forward)?, ordinal(reverse)?];
        Ok(())
    }

    pub fn set_decimal(
        &self,
        edge: &mut InMemoryEdge,
        name: &str,
        forward: f64,
        reverse: f64,
    ) -> Result<(), AttributeError> {
        let (config, id) = self.slot(name, AttributeKind::Decimal)?;
        check_direction(config, forward == reverse)?;
        let max = config.max.unwrap_or(f64::INFINITY);
        for value in [forward, reverse] {
            if value.is_nan() || value > max {
                return Err(AttributeError::InvalidValue {
                    name: name.to_string(),
                    message: format!("{value} is outside of the storable range (max {max})"),
                });
            }
        }
        edge.decimals[id.0] = [forward, reverse];
        Ok(())
    }

    fn slot(
        &self,
        name: &str,
        expected: AttributeKind,
    ) -> Result<(&AttributeConfig, AttributeId), AttributeError> {
        let (idx, id) = self
            .lookup
            .get(name)
            .ok_or_else(|| AttributeError::Unknown(name.to_string()))?;
        let config = &self.attributes[*idx];
        if config.kind != expected {
            return Err(AttributeError::KindMismatch {
                name: name.to_string(),
                expected,
                found: config.kind,
            });
        }
        Ok((config, *id))
    }

    fn lookup_kind(&self, name: &str, kind: AttributeKind) -> Option<(&AttributeConfig, AttributeId)> {
        self.slot(name, kind).ok()
    }
}

impl AttributeRegistry for InMemoryRegistry {
    fn attribute_kind(&self, name: &str) -> Option<AttributeKind> {
        self.lookup
            .get(name)
            .map(|(idx, _)| self.attributes[*idx].kind)
    }

    fn resolve_boolean(&self, name: &str) -> Option<BooleanHandle> {
        self.lookup_kind(name, AttributeKind::Boolean)
            .map(|(_, id)| BooleanHandle(id))
    }

    fn resolve_decimal(&self, name: &str) -> Option<DecimalAttribute> {
        self.lookup_kind(name, AttributeKind::Decimal)
            .map(|(config, id)| DecimalAttribute {
                handle: DecimalHandle(id),
                max_value: config.max.unwrap_or(f64::INFINITY),
            })
    }

    fn resolve_enum(&self, name: &str) -> Option<EnumAttribute> {
        self.lookup_kind(name, AttributeKind::Enum)
            .map(|(config, id)| EnumAttribute {
                handle: EnumHandle(id),
                values: config.values.clone(),
            })
    }
}

fn validate_declaration(attribute: &AttributeConfig) -> Result<(), AttributeError> {
    let invalid = |message: &str| AttributeError::InvalidDeclaration {
        name: attribute.name.clone(),
        message: message.to_string(),
    };
    if attribute.name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    match attribute.kind {
        AttributeKind::Enum if attribute.values.is_empty() => {
            Err(invalid("enum attributes need at least one value"))
        }
        AttributeKind::Enum => match attribute.values.iter().duplicates().next() {
            Some(v) => Err(invalid(&format!("enum value '{v}' is listed twice"))),
            None => Ok(()),
        },
        AttributeKind::Decimal => match attribute.max {
            Some(max) if max.is_nan() => Err(invalid("max must be a number")),
            _ => Ok(()),
        },
        AttributeKind::Boolean => Ok(()),
    }
}

fn check_direction(config: &AttributeConfig, same_value: bool) -> Result<(), AttributeError> {
    if config.directional || same_value {
        Ok(())
    } else {
        Err(AttributeError::InvalidValue {
            name: config.name.clone(),
            message: String::from(
                "attribute is not directional, forward and reverse values must match",
            ),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::attribute::EdgeState;

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new(vec![
            AttributeConfig::decimal("car_average_speed", Some(155.0), true),
            AttributeConfig::boolean("road_class_link", false),
            AttributeConfig::enumeration("road_class", &["OTHER", "PRIMARY", "SECONDARY"], false),
            AttributeConfig::decimal("max_weight", None, false),
        ])
        .expect("test invariant failed: registry could not be built")
    }

    #[test]
    fn test_resolve_by_kind() {
        let registry = registry();
        assert_eq!(
            registry.attribute_kind("road_class"),
            Some(AttributeKind::Enum)
        );
        assert!(registry.resolve_boolean("road_class").is_none());
        let speed = registry
            .resolve_decimal("car_average_speed")
            .expect("speed should resolve");
        assert_eq!(speed.max_value, 155.0);
        let weight = registry
            .resolve_decimal("max_weight")
            .expect("max_weight should resolve");
        assert!(weight.max_value.is_infinite());
        let road_class = registry.resolve_enum("road_class").expect("enum should resolve");
        assert_eq!(road_class.ordinal_of("SECONDARY"), Some(2));
        assert_eq!(road_class.ordinal_of("MOTORWAY"), None);
        assert!(registry.attribute_kind("toll").is_none());
    }

    #[test]
    fn test_set_and_get_directional_values() {
        let registry = registry();
        let mut edge = registry.new_edge(EdgeId(0), NodeId(0), NodeId(1), 100.0);
        registry
            .set_decimal(&mut edge, "car_average_speed", 100.0, 50.0)
            .expect("set speed");
        registry
            .set_enum(&mut edge, "road_class", "PRIMARY", "PRIMARY")
            .expect("set road class");
        let speed = registry
            .resolve_decimal("car_average_speed")
            .expect("speed should resolve");
        assert_eq!(speed.handle.get(&edge, false), 100.0);
        assert_eq!(speed.handle.get(&edge, true), 50.0);
        let road_class = registry.resolve_enum("road_class").expect("enum should resolve");
        assert_eq!(road_class.handle.get(&edge, true), 1);
        assert_eq!(edge.distance(), 100.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let registry = registry();
        let mut edge = registry.new_edge(EdgeId(0), NodeId(0), NodeId(1), 100.0);
        let too_fast = registry.set_decimal(&mut edge, "car_average_speed", 200.0, 10.0);
        assert!(matches!(too_fast, Err(AttributeError::InvalidValue { .. })));
        let not_directional = registry.set_bool(&mut edge, "road_class_link", true, false);
        assert!(matches!(
            not_directional,
            Err(AttributeError::InvalidValue { .. })
        ));
        let wrong_kind = registry.set_bool(&mut edge, "road_class", true, true);
        assert!(matches!(wrong_kind, Err(AttributeError::KindMismatch { .. })));
        let unknown_value = registry.set_enum(&mut edge, "road_class", "MOTORWAY", "MOTORWAY");
        assert!(matches!(unknown_value, Err(AttributeError::InvalidValue { .. })));
    }

    #[test]
    fn test_rejects_duplicate_declaration() {
        let result = InMemoryRegistry::new(vec![
            AttributeConfig::boolean("toll", false),
            AttributeConfig::decimal("toll", Some(1.0), false),
        ]);
        assert!(matches!(result, Err(AttributeError::Duplicate(name)) if name == "toll"));
    }
}
