// crates/infra/src/measurement/strategies.rs
pub mod byte_lookup;
pub mod char_lookup;
pub mod line_breaks;
pub mod line_reader;

pub use byte_lookup::count_lines_with_byte_lookup;
pub use char_lookup::{count_lines_in_memory, count_lines_with_char_lookup};
pub use line_breaks::LineBreakTally;
pub use line_reader::{ReaderFlavor, count_lines_with_reader};
