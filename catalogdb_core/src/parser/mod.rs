pub mod command;
pub mod parser;

pub use command::DdlStatement;
pub use parser::{parse, parse_batch};
