
use log::trace;

use crate::gnss::gps_l1_ca::pvt::measurement::NavigationMeasurement;
use crate::utils::kinematics;

/// Slant tropospheric delay as a function of elevation only
pub trait TroposphereModel {
	/// [m] delay for a satellite at `elevation` [rad]
	fn delay(&self, elevation:f64) -> f64;
}

/// 2.47 [m] zenith delay scaled by a simple cosecant mapping, 2.47 / (sin(el) + 0.0121).  The small constant keeps
/// the delay finite (about 204 [m]) at the horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleModel;

impl TroposphereModel for SimpleModel {
	fn delay(&self, elevation:f64) -> f64 { 2.47 / (elevation.sin() + 0.0121) }
}

/// Subtracts the modeled tropospheric delay from each pseudorange in place.
///
/// Elevations are taken from the fixed `ref_ecef` position rather than from a refined receiver estimate.  This is a
/// first order approximation: an error in the reference position biases the elevation and therefore the correction,
/// mostly for low satellites.
pub fn apply_tropo_correction<T: TroposphereModel>(nav_meas:&mut [NavigationMeasurement], ref_ecef:(f64, f64, f64), model:&T) {
	for m in nav_meas.iter_mut() {
		let (az, el) = kinematics::ecef_to_azel(m.sat_pos, ref_ecef);
		let delay = model.delay(el);
		trace!("az={:.2} [deg], el={:.2} [deg], tropo={:.3} [m]", az.to_degrees(), el.to_degrees(), delay);
		m.pseudorange -= delay;
	}
}

#[cfg(test)]
mod tests {

	use std::f64::consts;

	use super::*;
	use crate::utils::kinematics::WGS84_SEMI_MAJOR_AXIS_METERS as A;

	// Zero at zenith and growing toward the horizon
	struct ZenithFree;

	impl TroposphereModel for ZenithFree {
		fn delay(&self, elevation:f64) -> f64 { 10.0 * elevation.cos() }
	}

	fn meas_at(sat_pos:(f64, f64, f64)) -> NavigationMeasurement {
		NavigationMeasurement { pseudorange: 2.2e7, sat_pos, ..Default::default() }
	}

	#[test]
	fn simple_model_values() {
		let m = SimpleModel;
		assert!((m.delay(consts::FRAC_PI_2) - 2.47/1.0121).abs() < 1.0e-12);
		assert!((m.delay(0.0) - 2.47/0.0121).abs() < 1.0e-9);
		assert!(m.delay(0.2) > m.delay(0.8));
	}

	#[test]
	fn zenith_satellite_is_unchanged_when_model_is_zero_there() {
		let reference = (A, 0.0, 0.0);
		let mut meas = [meas_at((2.6e7, 0.0, 0.0))];
		apply_tropo_correction(&mut meas, reference, &ZenithFree);
		assert!((meas[0].pseudorange - 2.2e7).abs() < 1.0e-6);

		// A model with a nonzero zenith delay does move it
		let mut meas = [meas_at((2.6e7, 0.0, 0.0))];
		apply_tropo_correction(&mut meas, reference, &SimpleModel);
		assert!((meas[0].pseudorange - (2.2e7 - 2.47/1.0121)).abs() < 1.0e-6);
	}

	#[test]
	fn low_satellites_get_larger_corrections() {
		let reference = (A, 0.0, 0.0);
		let mut meas = [meas_at((2.6e7, 0.0, 0.0)), meas_at((A + 1.0e6, 0.0, 2.0e7))];
		apply_tropo_correction(&mut meas, reference, &SimpleModel);

		let high = 2.2e7 - meas[0].pseudorange;
		let low  = 2.2e7 - meas[1].pseudorange;
		assert!(high > 0.0);
		assert!(low > 5.0 * high, "high={}, low={}", high, low);
	}

	#[test]
	fn empty_slice_is_a_no_op() {
		let mut meas:[NavigationMeasurement; 0] = [];
		apply_tropo_correction(&mut meas, (A, 0.0, 0.0), &SimpleModel);
	}

}
