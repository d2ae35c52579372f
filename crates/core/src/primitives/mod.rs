//! Primitive-level types shared across crates

pub mod vector;

pub use vector::{DistanceMetric, VectorFieldSpec};
