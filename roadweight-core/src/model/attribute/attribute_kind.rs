use serde::{Deserialize, Serialize};

/// value domain of an edge attribute. conditions are type-checked against
/// this kind when a custom model is compiled.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Boolean,
    Enum,
    Decimal,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttributeKind::Boolean => "boolean",
            AttributeKind::Enum => "enum",
            AttributeKind::Decimal => "decimal",
        };
        write!(f, "{s}")
    }
}
