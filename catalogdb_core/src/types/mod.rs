pub mod datatype;

pub use datatype::{DataType, Length, ScalarType};
