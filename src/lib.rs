//! Bit-depth sweep harness: quantize a reference signal at 15..=1 bits with an
//! external tool, compare each result against the original, and plot how
//! RMSE, SNR and maximum error evolve with the bit depth.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
