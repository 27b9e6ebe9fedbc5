
use log::debug;
use serde::{Serialize, Deserialize};

use crate::DigSigProcErr;

/// Proportional and integral gains of a second order digital PLL or DLL loop filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopGains {
	pub pgain:f64,
	pub igain:f64,
}

fn natural_frequency(bw:f64, zeta:f64) -> Result<f64, DigSigProcErr> {
	if !(bw > 0.0)   { return Err(DigSigProcErr::InvalidParameter("loop bandwidth must be positive")); }
	if !(zeta > 0.0) { return Err(DigSigProcErr::InvalidParameter("damping ratio must be positive")); }

	// [rad/s]
	Ok((bw * 8.0 * zeta) / (4.0 * zeta * zeta + 1.0))
}

/// Analog loop filter time constants (tau1, tau2) for loop noise bandwidth `bw` [Hz], damping ratio `zeta`
/// and overall loop gain `k`.
pub fn analog_time_constants(bw:f64, zeta:f64, k:f64) -> Result<(f64, f64), DigSigProcErr> {
	let wn = natural_frequency(bw, zeta)?;

	let tau1 = k / (wn * wn);
	let tau2 = (2.0 * zeta) / wn;
	Ok((tau1, tau2))
}

/// Coefficients of the first order loop filter F[z] = ((kp + ki) - kp z^-1) / (1 - z^-1) that, together with an
/// accumulating NCO, forms a second order digital loop.  They come from matching the digital loop transfer function
/// against an analog PLL with natural frequency wn and damping ratio zeta:
///
///   kp = (1/k) * 8 zeta wn T / (4 + 4 zeta wn T + wn^2 T^2)
///   ki = (1/k) * 4 wn^2 T^2  / (4 + 4 zeta wn T + wn^2 T^2)
///
/// where T = 1/sample_freq is the loop update interval and k = K0 Kd is the product of the NCO and discriminator
/// gains.  The natural frequency is related to the loop noise bandwidth by wn = 8 zeta B_L / (4 zeta^2 + 1).
///
/// The same coefficients apply to the carrier Costas loop and to the code DLL; only the discriminator and k differ.
///
/// Reference: Chung, Chien, Samueli and Jain, "Performance analysis of an all-digital BPSK direct-sequence
/// spread-spectrum IF receiver architecture", IEEE JSAC 11:1096-1107, 1993.
pub fn digital_loop_gains(bw:f64, zeta:f64, k:f64, sample_freq:f64) -> Result<LoopGains, DigSigProcErr> {
	if k == 0.0 || !k.is_finite() { return Err(DigSigProcErr::InvalidParameter("loop gain must be finite and nonzero")); }
	if !(sample_freq > 0.0)       { return Err(DigSigProcErr::InvalidParameter("loop update rate must be positive")); }

	let wn = natural_frequency(bw, zeta)?;

	let t:f64 = 1.0 / sample_freq;
	let denominator:f64 = k * (4.0 + 4.0*zeta*wn*t + wn*wn*t*t);

	let gains = LoopGains {
		pgain: (8.0*zeta*wn*t) / denominator,
		igain: (4.0*wn*wn*t*t) / denominator,
	};

	debug!("bw={} [Hz], zeta={}, k={}, fs={} [Hz] -> {:?}", bw, zeta, k, sample_freq, gains);
	Ok(gains)
}

#[cfg(test)]
mod tests {

	use super::*;

	use rand::{Rng, SeedableRng};
	use rand::rngs::StdRng;
	use rstest::rstest;

	#[test]
	fn time_constants_match_closed_form() {
		// zeta = 0.5 makes wn twice the bandwidth
		let (tau1, tau2) = analog_time_constants(5.0, 0.5, 2.0).unwrap();
		assert!((tau1 - 0.02).abs() < 1.0e-15);
		assert!((tau2 - 0.1).abs()  < 1.0e-15);
	}

	#[rstest]
	#[case(0.0, 0.7, 1.0)]
	#[case(-5.0, 0.7, 1.0)]
	#[case(10.0, 0.0, 1.0)]
	#[case(10.0, -0.7, 1.0)]
	#[case(f64::NAN, 0.7, 1.0)]
	fn time_constants_reject_degenerate_design(#[case] bw:f64, #[case] zeta:f64, #[case] k:f64) {
		assert!(matches!(analog_time_constants(bw, zeta, k), Err(DigSigProcErr::InvalidParameter(_))));
	}

	#[rstest]
	#[case(0.0, 0.7, 1.0, 1000.0)]
	#[case(10.0, 0.0, 1.0, 1000.0)]
	#[case(10.0, 0.7, 0.0, 1000.0)]
	#[case(10.0, 0.7, 1.0, 0.0)]
	#[case(10.0, 0.7, 1.0, -1000.0)]
	fn gains_reject_degenerate_design(#[case] bw:f64, #[case] zeta:f64, #[case] k:f64, #[case] fs:f64) {
		assert!(matches!(digital_loop_gains(bw, zeta, k, fs), Err(DigSigProcErr::InvalidParameter(_))));
	}

	#[test]
	fn gains_match_hand_calculation() {
		// bw=0.5, zeta=0.5 -> wn=1; T=1 -> denominator = 4 + 2 + 1 = 7
		let g = digital_loop_gains(0.5, 0.5, 1.0, 1.0).unwrap();
		assert!((g.pgain - 4.0/7.0).abs() < 1.0e-15);
		assert!((g.igain - 4.0/7.0).abs() < 1.0e-15);

		// Loop gain divides both coefficients
		let g2 = digital_loop_gains(0.5, 0.5, 2.0, 1.0).unwrap();
		assert!((g2.pgain - g.pgain/2.0).abs() < 1.0e-15);
		assert!((g2.igain - g.igain/2.0).abs() < 1.0e-15);
	}

	#[test]
	fn gains_positive_for_positive_design() {
		let mut rng = StdRng::seed_from_u64(0x5eed);
		for _ in 0..1000 {
			let bw:f64   = rng.gen_range(1.0e-3, 500.0);
			let zeta:f64 = rng.gen_range(1.0e-3, 5.0);
			let k:f64    = rng.gen_range(1.0e-3, 10.0);
			let fs:f64   = rng.gen_range(1.0, 1.0e6);
			let g = digital_loop_gains(bw, zeta, k, fs).unwrap();
			assert!(g.pgain > 0.0, "pgain={} for bw={}, zeta={}, k={}, fs={}", g.pgain, bw, zeta, k, fs);
			assert!(g.igain > 0.0, "igain={} for bw={}, zeta={}, k={}, fs={}", g.igain, bw, zeta, k, fs);
		}
	}

}
