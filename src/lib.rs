//! Offline tools for LabVIEW-style CSV sensor logs: a cleaner that drops
//! malformed rows and an FFT processor that plots a signal's spectrum.

pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod interrupt;
pub mod pipeline;
pub mod plot;
pub mod spectrum;
