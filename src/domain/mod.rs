// Domain layer: models and ports. Nothing here depends on the formatting engines.

pub mod model;
pub mod ports;
