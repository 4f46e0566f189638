pub mod connection;
pub mod error;
pub mod registry;
pub mod service;

pub use error::RelayError;
pub use registry::Registry;
pub use service::RelayService;
