use super::EdgeState;

/// slot of an attribute within the storage of its kind, issued by a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BooleanHandle(pub AttributeId);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumHandle(pub AttributeId);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalHandle(pub AttributeId);

impl BooleanHandle {
    pub fn get(&self, edge: &dyn EdgeState, reverse: bool) -> bool {
        edge.get_bool(self.0, reverse)
    }
}

impl EnumHandle {
    pub fn get(&self, edge: &dyn EdgeState, reverse: bool) -> u32 {
        edge.get_enum(self.0, reverse)
    }
}

impl DecimalHandle {
    pub fn get(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        edge.get_decimal(self.0, reverse)
    }
}

/// a resolved decimal attribute with the largest value it can hold.
/// the maximum may be infinite for attributes without a storage bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecimalAttribute {
    pub handle: DecimalHandle,
    pub max_value: f64,
}

/// a resolved enum attribute with its valid values, in ordinal order.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumAttribute {
    pub handle: EnumHandle,
    pub values: Vec<String>,
}

impl EnumAttribute {
    pub fn ordinal_of(&self, value: &str) -> Option<u32> {
        self.values
            .iter()
            .position(|v| v == value)
            .map(|idx| idx as u32)
    }
}
