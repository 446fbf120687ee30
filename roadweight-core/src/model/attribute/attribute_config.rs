use serde::{Deserialize, Serialize};

use super::AttributeKind;

/// declaration of an edge attribute for an [`super::InMemoryRegistry`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttributeConfig {
    /// name used to reference the attribute in custom model conditions
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    /// largest storable value of a decimal attribute. if omitted, the
    /// attribute is unbounded and cannot be used as the base speed or as an
    /// operand of a statement.
    #[serde(default)]
    pub max: Option<f64>,
    /// valid values of an enum attribute. the first entry is the default.
    #[serde(default)]
    pub values: Vec<String>,
    /// if true, edges store distinct forward and reverse values
    #[serde(default)]
    pub directional: bool,
}

impl AttributeConfig {
    pub fn boolean(name: &str, directional: bool) -> AttributeConfig {
        AttributeConfig {
            name: name.to_string(),
            kind: AttributeKind::Boolean,
            max: None,
            values: vec![],
            directional,
        }
    }

    pub fn enumeration(name: &str, values: &[&str], directional: bool) -> AttributeConfig {
        AttributeConfig {
            name: name.to_string(),
            kind: AttributeKind::Enum,
            max: None,
            values: values.iter().map(|v| v.to_string()).collect(),
            directional,
        }
    }

    pub fn decimal(name: &str, max: Option<f64>, directional: bool) -> AttributeConfig {
        AttributeConfig {
            name: name.to_string(),
            kind: AttributeKind::Decimal,
            max,
            values: vec![],
            directional,
        }
    }
}
