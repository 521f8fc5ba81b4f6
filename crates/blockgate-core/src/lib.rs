pub mod error;
pub mod rpc;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::{CoreError, RpcError};
pub use types::Block;
