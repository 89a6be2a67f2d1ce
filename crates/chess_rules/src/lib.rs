pub mod board;
pub mod eval;
pub mod movegen;
pub mod types;

// Re-export the whole rules surface at the crate root.
pub use board::*;
pub use eval::*;
pub use movegen::*;
pub use types::*;
