// Domain layer: identity records, errors and the ports use cases depend on.

pub mod entities;
pub mod errors;
pub mod ports;
