
use std::f64::consts;

use num_complex::Complex;
use serde::{Serialize, Deserialize};

use crate::DigSigProcErr;
use crate::gnss::constants::{CODE_LENGTH, CODE_LENGTH_CHIPS};

pub const EARLY:usize  = 0;
pub const PROMPT:usize = 1;
pub const LATE:usize   = 2;

/// Length of the padded C/A replica `correlate` expects
pub const PADDED_CODE_LEN:usize = CODE_LENGTH_CHIPS + 2;

/// Early, prompt and late correlations in that order; re is the in-phase (I) sum and im the quadrature (Q) sum
pub type CorrelationSet = [Complex<f64>; 3];

const ZERO:Complex<f64> = Complex{ re: 0.0, im: 0.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelatorOutput {
	pub correlations: CorrelationSet,
	pub num_samples: u32,
}

impl CorrelatorOutput {
	pub fn early(&self)  -> Complex<f64> { self.correlations[EARLY]  }
	pub fn prompt(&self) -> Complex<f64> { self.correlations[PROMPT] }
	pub fn late(&self)   -> Complex<f64> { self.correlations[LATE]   }
}

/// Lays out one code period the way `correlate` indexes it: the last chip, the full code, then the first chip.
/// Index i (1..=1023) holds chip i-1, so a code phase in (i-1, i] selects chip i-1 as prompt and the half-chip
/// early/late offsets at the period edges land on the neighbouring periods' chips.
pub fn pad_code(code:&[i8]) -> Vec<i8> {
	match (code.first(), code.last()) {
		(Some(first), Some(last)) => {
			let mut padded:Vec<i8> = Vec::with_capacity(code.len() + 2);
			padded.push(*last);
			padded.extend_from_slice(code);
			padded.push(*first);
			padded
		},
		_ => vec![],
	}
}

/// Builds the padded replica from one code period of raw signed 8-bit chips, as stored in a replica file
pub fn replica_from_bytes(bytes:&[u8]) -> Result<Vec<i8>, DigSigProcErr> {
	if bytes.len() != CODE_LENGTH_CHIPS {
		return Err(DigSigProcErr::InvalidParameter("replica must hold exactly one code period of chips"));
	}
	Ok(pad_code(&bytes.iter().map(|b| *b as i8).collect::<Vec<i8>>()))
}

fn code_index(code:&[i8], phase:f64) -> Result<usize, DigSigProcErr> {
	let idx:f64 = phase.ceil();
	if idx < 0.0 || idx >= code.len() as f64 {
		return Err(DigSigProcErr::CodeIndexOutOfBounds{ idx: idx as i64, len: code.len() });
	}
	Ok(idx as usize)
}

/// Integrates early, prompt and late correlations over exactly one code period.
///
/// `code` must be a padded replica as produced by `pad_code` (1025 entries for C/A); indices are checked and
/// anything outside the replica returns `CodeIndexOutOfBounds`.  The block consumes ceil((1023 - code_phase) / code_step)
/// samples from the front of `samples`.
///
/// The local carrier is a recursive oscillator: each sample rotates the previous (sin, cos) pair by carrier_step and
/// pulls it back toward unit magnitude with the first order correction (3 - sin^2 - cos^2) / 2.  That correction only
/// holds while carrier_step is small (a few degrees per sample, i.e. |carrier_step| well under 0.1 rad); larger steps
/// let the amplitude drift.
///
/// On success `code_phase` is advanced and reduced by one code period, and `carrier_phase` is advanced and reduced
/// modulo 2*pi.  On error neither is touched.
pub fn correlate(samples:&[i8], code:&[i8], code_phase:&mut f64, code_step:f64, carrier_phase:&mut f64, carrier_step:f64) -> Result<CorrelatorOutput, DigSigProcErr> {
	if !code_step.is_finite() || code_step <= 0.0 {
		return Err(DigSigProcErr::InvalidParameter("code step must be positive and finite"));
	}
	if !code_phase.is_finite() || *code_phase >= CODE_LENGTH {
		return Err(DigSigProcErr::InvalidParameter("code phase must be finite and less than one code period"));
	}
	if !carrier_phase.is_finite() || !carrier_step.is_finite() {
		return Err(DigSigProcErr::InvalidParameter("carrier phase and step must be finite"));
	}

	let num_samples:usize = ((CODE_LENGTH - *code_phase) / code_step).ceil() as usize;
	if num_samples > u32::max_value() as usize {
		return Err(DigSigProcErr::InvalidParameter("code step too small for a single block"));
	}
	if samples.len() < num_samples {
		return Err(DigSigProcErr::InsufficientSamples{ needed: num_samples, available: samples.len() });
	}

	// Code phase grows monotonically over the block, so the early arm of the first sample and the late arm of the
	// last one bound every replica index
	let first_ph:f64 = *code_phase;
	let last_ph:f64  = first_ph + (num_samples.saturating_sub(1) as f64) * code_step;
	code_index(code, first_ph - 0.5)?;
	code_index(code, last_ph + 0.5)?;

	let mut carr_sin:f64 = carrier_phase.sin();
	let mut carr_cos:f64 = carrier_phase.cos();
	let sin_delta:f64 = carrier_step.sin();
	let cos_delta:f64 = carrier_step.cos();

	let mut sum_early:Complex<f64>  = ZERO;
	let mut sum_prompt:Complex<f64> = ZERO;
	let mut sum_late:Complex<f64>   = ZERO;

	for (k, s) in samples[..num_samples].iter().enumerate() {
		let code_ph:f64 = first_ph + (k as f64) * code_step;
		let code_e:f64 = code[(code_ph - 0.5).ceil() as usize] as f64;
		let code_p:f64 = code[code_ph.ceil() as usize] as f64;
		let code_l:f64 = code[(code_ph + 0.5).ceil() as usize] as f64;

		let x:f64 = *s as f64;
		let baseband_i:f64 = carr_sin * x;
		let baseband_q:f64 = carr_cos * x;

		// Rotate the oscillator, then renormalize
		let next_sin:f64 = carr_sin*cos_delta + carr_cos*sin_delta;
		let next_cos:f64 = carr_cos*cos_delta - carr_sin*sin_delta;
		let scale:f64 = (3.0 - next_sin*next_sin - next_cos*next_cos) / 2.0;
		carr_sin = next_sin * scale;
		carr_cos = next_cos * scale;

		sum_early.re  += code_e * baseband_i;
		sum_early.im  += code_e * baseband_q;
		sum_prompt.re += code_p * baseband_i;
		sum_prompt.im += code_p * baseband_q;
		sum_late.re   += code_l * baseband_i;
		sum_late.im   += code_l * baseband_q;
	}

	*code_phase    = first_ph + (num_samples as f64) * code_step - CODE_LENGTH;
	*carrier_phase = (*carrier_phase + (num_samples as f64) * carrier_step) % (2.0 * consts::PI);

	Ok(CorrelatorOutput{ correlations: [sum_early, sum_prompt, sum_late], num_samples: num_samples as u32 })
}
