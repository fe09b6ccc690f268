//! Remote cart service: the seam the controller talks through, and its backends.

mod error;
mod remote;
mod actor_service;
mod http_service;

pub use error::*;
pub use remote::*;
pub use actor_service::*;
pub use http_service::*;
