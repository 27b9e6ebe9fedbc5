
use log::{trace, warn};
use serde::{Serialize, Deserialize};

use crate::DigSigProcErr;
use crate::gnss::constants::{C, CHIP_RATE, GPS_L1_HZ, NOMINAL_RANGE};
use crate::gnss::gps_l1_ca::pvt::ephemeris::SvStateProvider;

/// Snapshot of one tracking channel at a measurement epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChannelMeasurement {
	pub receiver_time:f64,			// [sec] receiver time the snapshot was taken at
	pub time_of_week_ms:u32,		// [ms] SV time of week at the start of the current code period
	pub code_phase_chips:f64,		// [chips]
	pub code_phase_rate:f64,		// [chips/s]
	pub carrier_freq:f64,			// [Hz] Doppler
	pub carrier_phase:f64,			// [cycles]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NavigationMeasurement {
	pub tot:f64,					// [sec] time of transmission
	pub pseudorange:f64,			// [m]
	pub pseudorange_rate:f64,		// [m/s]
	pub sat_pos:(f64, f64, f64),	// [m] ECEF at tot
	pub sat_vel:(f64, f64, f64),	// [m/s] ECEF at tot
}

impl ChannelMeasurement {

	/// SV time of transmission of the signal this channel is tracking, propagated to `nav_time` with the code rate
	pub fn time_of_transmission(&self, nav_time:f64) -> f64 {
		let mut tot:f64 = 1.0e-3 * (self.time_of_week_ms as f64);
		tot += self.code_phase_chips / CHIP_RATE;
		tot += (nav_time - self.receiver_time) * self.code_phase_rate / CHIP_RATE;
		tot
	}

}

/// Forms raw pseudoranges and pseudorange rates for a set of channels observed at the common receiver epoch
/// `nav_time`.  `meas[i]` and `ephemerides[i]` must describe the same satellite.
///
/// The pseudoranges are relative: each channel's range is its time of transmission offset from the mean over all
/// channels, plus NOMINAL_RANGE, plus the SV clock correction.  That mean is only meaningful when every snapshot was
/// taken at the same receiver epoch.
pub fn form_measurements<E: SvStateProvider>(meas:&[ChannelMeasurement], nav_time:f64, ephemerides:&[E]) -> Result<Vec<NavigationMeasurement>, DigSigProcErr> {
	if meas.is_empty() {
		warn!("Measurement formation requested with no channels");
		return Err(DigSigProcErr::InvalidParameter("at least one channel is required"));
	}
	if meas.len() != ephemerides.len() {
		warn!("{} channel measurements but {} ephemerides", meas.len(), ephemerides.len());
		return Err(DigSigProcErr::MismatchedLengths{ measurements: meas.len(), ephemerides: ephemerides.len() });
	}

	// Every TOT has to be known before any pseudorange can be referenced to their mean
	let tots:Vec<f64> = meas.iter().map(|m| m.time_of_transmission(nav_time)).collect();
	let mean_tot:f64 = tots.iter().sum::<f64>() / (tots.len() as f64);

	let nav_meas = meas.iter().zip(ephemerides.iter()).zip(tots.iter()).map(|((m, eph), tot)| {
		let sv = eph.sv_state(*tot);

		// Positive Doppler means the SV is approaching
		let pseudorange_rate:f64 = C * -m.carrier_freq / GPS_L1_HZ - sv.clock_rate_err * C;
		let pseudorange:f64 = (mean_tot - tot) * C + NOMINAL_RANGE + sv.clock_err * C;

		trace!("tot={:.9} [sec], pseudorange={:.3} [m], pseudorange_rate={:.3} [m/s]", tot, pseudorange, pseudorange_rate);

		NavigationMeasurement { tot: *tot, pseudorange, pseudorange_rate, sat_pos: sv.pos_ecef, sat_vel: sv.vel_ecef }
	}).collect();

	Ok(nav_meas)
}

#[cfg(test)]
mod tests {

	use super::*;
	use crate::gnss::gps_l1_ca::pvt::ephemeris::SvState;

	struct MockSv { clock_err:f64, clock_rate_err:f64 }

	impl SvStateProvider for MockSv {
		fn sv_state(&self, t:f64) -> SvState {
			SvState { pos_ecef: (2.0e7, 1.0e7, t), vel_ecef: (0.0, 3.0e3, 0.0), clock_err: self.clock_err, clock_rate_err: self.clock_rate_err }
		}
	}

	fn channel(tow_ms:u32, code_phase_chips:f64) -> ChannelMeasurement {
		ChannelMeasurement { receiver_time: 10.0, time_of_week_ms: tow_ms, code_phase_chips, code_phase_rate: CHIP_RATE, carrier_freq: 0.0, carrier_phase: 0.0 }
	}

	#[test]
	fn time_of_transmission() {
		let mut m = channel(345_678, 511.5);
		assert!((m.time_of_transmission(10.0) - (345.678 + 0.5e-3)).abs() < 1.0e-12);

		// Propagating 1 [ms] at the nominal code rate adds 1 [ms]
		m.receiver_time = 9.999;
		assert!((m.time_of_transmission(10.0) - (345.678 + 1.5e-3)).abs() < 1.0e-12);
	}

	#[test]
	fn single_channel_is_nominal_range_plus_clock() {
		let m = ChannelMeasurement { receiver_time: 12.5, time_of_week_ms: 100_020, code_phase_chips: 17.25,
			code_phase_rate: 1.023e6 + 2.5, carrier_freq: -1234.5, carrier_phase: 0.0 };
		let eph = MockSv { clock_err: 3.2e-5, clock_rate_err: 1.0e-11 };

		let out = form_measurements(&[m], 12.5007, &[eph]).unwrap();
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].pseudorange, NOMINAL_RANGE + 3.2e-5 * C);
		assert_eq!(out[0].tot, m.time_of_transmission(12.5007));
		assert_eq!(out[0].pseudorange_rate, C * 1234.5 / GPS_L1_HZ - 1.0e-11 * C);
		assert_eq!(out[0].sat_pos, (2.0e7, 1.0e7, out[0].tot));
		assert_eq!(out[0].sat_vel, (0.0, 3.0e3, 0.0));
	}

	#[test]
	fn ranges_are_relative_to_mean_tot() {
		// Later time of transmission means a shorter range
		let meas = [channel(1000, 0.0), channel(1000, 1023.0 / 2.0), channel(1000, 1023.0)];
		let ephs = [MockSv{ clock_err: 0.0, clock_rate_err: 0.0 }, MockSv{ clock_err: 0.0, clock_rate_err: 0.0 }, MockSv{ clock_err: 0.0, clock_rate_err: 0.0 }];
		let out = form_measurements(&meas, 10.0, &ephs).unwrap();

		let half_ms_m = 0.5e-3 * C;
		assert!((out[0].pseudorange - (NOMINAL_RANGE + half_ms_m)).abs() < 1.0e-6);
		assert!((out[1].pseudorange - NOMINAL_RANGE).abs() < 1.0e-6);
		assert!((out[2].pseudorange - (NOMINAL_RANGE - half_ms_m)).abs() < 1.0e-6);

		let mean:f64 = out.iter().map(|m| m.pseudorange).sum::<f64>() / 3.0;
		assert!((mean - NOMINAL_RANGE).abs() < 1.0e-6);
	}

	#[test]
	fn approaching_sv_has_negative_range_rate() {
		let mut m = channel(1000, 0.0);
		m.carrier_freq = 2000.0;
		let out = form_measurements(&[m], 10.0, &[MockSv{ clock_err: 0.0, clock_rate_err: 0.0 }]).unwrap();
		assert!(out[0].pseudorange_rate < 0.0);
		assert!((out[0].pseudorange_rate + 2000.0 * C / GPS_L1_HZ).abs() < 1.0e-9);
	}

	#[test]
	fn empty_and_misaligned_inputs_are_rejected() {
		let none:[MockSv; 0] = [];
		assert_eq!(form_measurements(&[], 0.0, &none), Err(DigSigProcErr::InvalidParameter("at least one channel is required")));

		let one = [MockSv{ clock_err: 0.0, clock_rate_err: 0.0 }];
		let res = form_measurements(&[channel(0, 0.0), channel(0, 0.0)], 0.0, &one);
		assert_eq!(res, Err(DigSigProcErr::MismatchedLengths{ measurements: 2, ephemerides: 1 }));
	}

}
