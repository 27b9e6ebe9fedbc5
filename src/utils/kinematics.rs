
use nalgebra::{Matrix3, Vector3};

pub const WGS84_SEMI_MAJOR_AXIS_METERS:f64 = 6378137.0;
pub const WGS84_SEMI_MINOR_AXIS_METERS:f64 = 6356752.314245;

#[derive(Debug, Clone, Copy)]
pub struct PositionWGS84 {
	pub latitude:f64,					// [rad]
	pub longitude:f64,					// [rad]
	pub height_above_ellipsoid:f64,		// [m]
}

/// Bowring's closed form ECEF to geodetic conversion
pub fn ecef_to_wgs84(e1:f64, e2:f64, e3:f64) -> PositionWGS84 {
	let a:f64 = WGS84_SEMI_MAJOR_AXIS_METERS;
	let b:f64 = WGS84_SEMI_MINOR_AXIS_METERS;

	let e_sq:f64  = (a*a - b*b) / (a*a);
	let ep_sq:f64 = (a*a - b*b) / (b*b);

	let p:f64 = (e1*e1 + e2*e2).sqrt();
	let r:f64 = (p*p   + e3*e3).sqrt();

	let beta:f64 = (((b*e3)/(a*p)) * (1.0 + ep_sq*(b/r))).atan();

	let latitude:f64 = {
		let num:f64   = e3 + (ep_sq * b * beta.sin().powi(3));
		let denom:f64 = p  - (e_sq  * a * beta.cos().powi(3));
		num.atan2(denom)
	};
	let longitude:f64 = e2.atan2(e1);

	let v = a / (1.0 - (e_sq*latitude.sin().powi(2))).sqrt();
	let height_above_ellipsoid = p*latitude.cos() + e3*latitude.sin() - (a*a / v);

	PositionWGS84{ latitude, longitude, height_above_ellipsoid }
}

/// Azimuth (clockwise from north) and elevation, both in radians, of `target` as seen from `reference`; both in ECEF [m]
pub fn ecef_to_azel(target:(f64, f64, f64), reference:(f64, f64, f64)) -> (f64, f64) {
	let ref_wgs84 = ecef_to_wgs84(reference.0, reference.1, reference.2);
	let (phi, lam) = (ref_wgs84.latitude, ref_wgs84.longitude);

	// Rotation from ECEF into north-east-down at the reference position
	let dcm_le = Matrix3::new(-phi.sin()*lam.cos(), -phi.sin()*lam.sin(),  phi.cos(),
	                          -lam.sin(),            lam.cos(),            0.0,
	                          -phi.cos()*lam.cos(), -phi.cos()*lam.sin(), -phi.sin());

	let r_e = Vector3::new(target.0 - reference.0, target.1 - reference.1, target.2 - reference.2);
	let r_l = dcm_le * r_e;

	let r_horizontal:f64 = (r_l[0].powi(2) + r_l[1].powi(2)).sqrt();
	let mut az:f64 = r_l[1].atan2(r_l[0]);
	if az < 0.0 { az += 2.0 * std::f64::consts::PI; }
	let el:f64 = (-r_l[2]).atan2(r_horizontal);

	(az, el)
}
