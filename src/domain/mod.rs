// Domain layer: draft model and the storage port. No dependencies beyond serde/chrono.

pub mod model;
pub mod ports;
