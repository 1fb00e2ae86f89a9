//! Existence probing over HTTP.

mod error;
mod prober;
mod transport;

pub use error::NetError;
pub use prober::Prober;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub(crate) use transport::testing;
