// Domain layer: value types and ports. Concrete implementations live under core.

pub mod model;
pub mod ports;
