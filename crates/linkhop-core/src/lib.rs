pub mod config;
pub mod error;
pub mod logging;

pub mod probe;
pub mod resolver;
pub mod url_model;

pub use error::{ErrorKind, ResolveError};
pub use probe::{build_transport, ProbeResponse, Transport, TransportKind, TransportSettings};
pub use resolver::{Hop, RedirectResolver, Resolution, ResolutionState, ResolverOptions};
