
use std::f64::consts;

use crate::gnss::tracking::correlator::{CorrelationSet, EARLY, LATE};

/// Arctangent Costas discriminator on the prompt correlation, in cycles.
///
/// Q == 0 is deliberately left to IEEE arithmetic: I/Q becomes +/-inf and the result saturates at +/-0.25.
pub fn costas_discriminator(i:f64, q:f64) -> f64 {
	(i / q).atan() / (2.0 * consts::PI)
}

/// Normalized early-minus-late envelope discriminator, in [-1, 1].  Returns zero when both the early and
/// late correlations are zero.
pub fn dll_discriminator(cs:&CorrelationSet) -> f64 {
	let early_mag:f64 = (cs[EARLY].re * cs[EARLY].re + cs[EARLY].im * cs[EARLY].im).sqrt();
	let late_mag:f64  = (cs[LATE].re  * cs[LATE].re  + cs[LATE].im  * cs[LATE].im).sqrt();

	if early_mag + late_mag == 0.0 { 0.0 } else { (early_mag - late_mag) / (early_mag + late_mag) }
}
