use super::{AttributeKind, BooleanHandle, DecimalAttribute, EnumAttribute};

/// name based lookup of the typed attributes stored on graph edges.
///
/// the registry is only consulted while compiling a custom model. the
/// compiled weighting keeps the returned handles and never looks names up
/// again.
pub trait AttributeRegistry {
    /// kind of the attribute with this name, or None if it is not registered
    fn attribute_kind(&self, name: &str) -> Option<AttributeKind>;

    fn resolve_boolean(&self, name: &str) -> Option<BooleanHandle>;

    fn resolve_decimal(&self, name: &str) -> Option<DecimalAttribute>;

    fn resolve_enum(&self, name: &str) -> Option<EnumAttribute>;
}
