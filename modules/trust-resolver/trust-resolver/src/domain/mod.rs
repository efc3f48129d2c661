//! Domain layer for the trust resolver.

pub mod local_client;
pub mod service;
pub mod source;

pub use local_client::TrustResolverLocalClient;
pub use service::Service;
pub use source::FileTrustSource;
