//! Chain context, named networks and well-known contract addresses

mod config;
mod delegates;

pub use config::{chain_ids, ChainContext, Network};
pub use delegates::{is_trusted_delegate, TRUSTED_DELEGATE_TARGETS};
