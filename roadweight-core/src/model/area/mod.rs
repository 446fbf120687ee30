mod area_index;

pub use area_index::{AreaId, AreaIndex};
