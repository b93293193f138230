// Domain layer: core models and ports (interfaces). No storage or HTTP types here.

pub mod model;
pub mod ports;
