use num_complex::Complex;

/// Signal-to-noise-variance C/N0 estimate [dB-Hz] from a run of prompt correlations, each integrated over
/// `coh_integration_time_s` seconds.  The Costas loop parks the data-modulated carrier in Q, so |Q| carries the signal
/// and I only noise.  Returns NaN for an empty run and +inf for a noise-free one.
pub fn cn0_snv_estimator(prompts:&[Complex<f64>], coh_integration_time_s:f64) -> f64 {
	let n:f64 = prompts.len() as f64;
	let mean_abs_q:f64 = prompts.iter().map(|c| c.im.abs()).sum::<f64>() / n;
	let signal_pwr:f64 = mean_abs_q * mean_abs_q;
	let total_pwr:f64  = prompts.iter().map(|c| c.norm_sqr()).sum::<f64>() / n;

	let snr = signal_pwr / (total_pwr - signal_pwr);
	10.0 * snr.log10() - 10.0 * coh_integration_time_s.log10()
}

/// Normalized narrow-band power difference (sum Q)^2 - (sum I)^2 over (sum Q)^2 + (sum I)^2, which estimates
/// cos(2 * phase error).  One at Costas lock, where the energy sits in Q, and minus one with the carrier a quarter
/// turn off.
pub fn carrier_lock_detector(prompts:&[Complex<f64>]) -> f64 {
	let (sum_i, sum_q) = prompts.iter().fold((0.0, 0.0), |(i, q), c| (i + c.re, q + c.im));
	let i2:f64 = sum_i * sum_i;
	let q2:f64 = sum_q * sum_q;
	(q2 - i2) / (q2 + i2)
}
