//! Stackfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can write `stackfall::{core, engine, input, term, types}`.

pub use stackfall_core as core;
pub use stackfall_engine as engine;
pub use stackfall_input as input;
pub use stackfall_term as term;
pub use stackfall_types as types;
