//! Systems - simulation kernels operating on grid storage

pub mod temperature;
