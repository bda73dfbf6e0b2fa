//! Type definitions for Safe transactions and hash outputs

mod hashes;
mod operation;
mod transaction;

pub use hashes::{HashQuad, HashTriple};
pub use operation::Operation;
pub use transaction::SafeTransaction;
