//! Loopform library - generative closed loops from truncated Fourier series

pub mod cli;
pub mod controller;
pub mod easing;
pub mod params;
pub mod raster;
pub mod spectrum;
pub mod surface;
