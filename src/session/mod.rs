//! Live client sessions: the per-stream event queue and the registry keyed
//! by client id.

mod registry;
mod session;

pub use registry::*;
pub use session::*;
