pub mod normalize;
pub mod values;

pub use normalize::normalize_label;
pub use values::parse_value;
