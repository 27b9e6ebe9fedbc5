use thiserror::Error;

pub mod gnss;
pub mod io;

pub mod utils;

#[derive(Debug, PartialEq, Clone, Copy, Error)]
pub enum DigSigProcErr {
	#[error("invalid parameter: {0}")]
	InvalidParameter(&'static str),
	#[error("{measurements} channel measurements but {ephemerides} ephemerides")]
	MismatchedLengths{ measurements:usize, ephemerides:usize },
	#[error("code replica index {idx} outside of replica with length {len}")]
	CodeIndexOutOfBounds{ idx:i64, len:usize },
	#[error("block needs {needed} samples but only {available} were provided")]
	InsufficientSamples{ needed:usize, available:usize },
}
