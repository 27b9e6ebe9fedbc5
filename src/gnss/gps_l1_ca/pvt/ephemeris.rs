
use std::f64::consts;

use serde::{Serialize, Deserialize};

use crate::gnss::constants::{F, HALF_WEEK_SEC, MU, OMEGA_E};

/// Satellite state at a given GPS system time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvState {
	pub pos_ecef:(f64, f64, f64),		// [m]
	pub vel_ecef:(f64, f64, f64),		// [m/s]
	pub clock_err:f64,					// [sec] SV clock minus GPS system time
	pub clock_rate_err:f64,				// [sec/sec]
}

/// Anything that can place a satellite and its clock at a time of transmission.  Measurement formation only needs
/// this, so precise orbits or a simulator can stand in for the broadcast ephemeris.
pub trait SvStateProvider {
	fn sv_state(&self, t:f64) -> SvState;
}

/// Broadcast ephemeris and clock terms as decoded from subframes 1-3.  Angles and angular rates are in the ICD's
/// semicircles and semicircles/sec.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
pub struct Ephemeris {
	pub week_number:u16, pub t_gd:f64,	  pub aodo: u8,    pub fit_interval:bool,
	pub t_oc: f64,       pub a_f0: f64,   pub a_f1: f64,   pub a_f2: f64,
	pub t_oe: f64,       pub sqrt_a: f64, pub dn: f64,     pub m0: f64,
	pub e: f64,          pub omega: f64,  pub omega0: f64, pub omega_dot: f64,
	pub cus: f64,        pub cuc: f64,    pub crs: f64,    pub crc: f64,
	pub cis: f64,        pub cic: f64,    pub i0: f64,     pub idot: f64,
	pub iodc: u16,
}

// Time difference accounting for the beginning or end of week crossover, IS-GPS-200 20.3.3.4.3
fn week_wrap(dt:f64) -> f64 {
	if      dt >  HALF_WEEK_SEC { dt - 2.0*HALF_WEEK_SEC }
	else if dt < -HALF_WEEK_SEC { dt + 2.0*HALF_WEEK_SEC }
	else                        { dt }
}

impl Ephemeris {

	/// Polynomial part of the SV clock correction, without the relativistic term or group delay
	pub fn dt_sv(&self, t:f64) -> f64 {
		let dt = week_wrap(t - self.t_oc);
		self.a_f0 + self.a_f1*dt + self.a_f2*dt.powi(2)
	}

}

impl SvStateProvider for Ephemeris {

	/// User algorithm of IS-GPS-200 Table 20-IV, plus the time derivatives needed for the velocity.  The clock error
	/// includes the relativistic correction and removes the L1 group delay.
	fn sv_state(&self, t:f64) -> SvState {
		let a:f64  = self.sqrt_a.powi(2);                       // [m]
		let n0:f64 = (MU / a.powi(3)).sqrt();                   // [rad/s]
		let tk:f64 = week_wrap(t - self.t_oe);                  // [sec]
		let n:f64  = n0 + (self.dn * consts::PI);               // [rad/s]
		let mk:f64 = (self.m0 * consts::PI) + n*tk;             // [rad]

		// Kepler's equation by Newton-Raphson
		let mut ek:f64 = mk;
		for _ in 0..10 {
			ek = ek - (ek - self.e*ek.sin() - mk)/(1.0 - self.e*ek.cos());
		}
		let one_minus_ecos:f64 = 1.0 - self.e*ek.cos();
		let ek_dot:f64 = n / one_minus_ecos;

		let nu_k:f64 = {
			let y:f64 = ((1.0 - self.e.powi(2)).sqrt() * ek.sin()) / one_minus_ecos;
			let x:f64 = (ek.cos() - self.e) / one_minus_ecos;
			y.atan2(x)
		};
		let nu_dot:f64 = ek_dot * (1.0 - self.e.powi(2)).sqrt() / one_minus_ecos;

		// Argument of latitude, radius and inclination with second harmonic corrections
		let phi_k:f64 = nu_k + (self.omega * consts::PI);
		let (s2, c2) = (2.0*phi_k).sin_cos();

		let u_k:f64 = phi_k + self.cus*s2 + self.cuc*c2;
		let r_k:f64 = a*one_minus_ecos + self.crs*s2 + self.crc*c2;
		let i_k:f64 = (self.i0 * consts::PI) + self.cis*s2 + self.cic*c2 + (self.idot * consts::PI)*tk;

		let u_dot:f64 = nu_dot * (1.0 + 2.0*(self.cus*c2 - self.cuc*s2));
		let r_dot:f64 = a*self.e*ek.sin()*ek_dot + 2.0*nu_dot*(self.crs*c2 - self.crc*s2);
		let i_dot:f64 = (self.idot * consts::PI) + 2.0*nu_dot*(self.cis*c2 - self.cic*s2);

		// Position in the orbital plane
		let (su, cu) = u_k.sin_cos();
		let x_kp:f64 = r_k * cu;
		let y_kp:f64 = r_k * su;
		let x_kp_dot:f64 = r_dot*cu - y_kp*u_dot;
		let y_kp_dot:f64 = r_dot*su + x_kp*u_dot;

		// Corrected longitude of the ascending node
		let omega_k_dot:f64 = (self.omega_dot * consts::PI) - OMEGA_E;
		let omega_k:f64 = (self.omega0 * consts::PI) + omega_k_dot*tk - OMEGA_E*self.t_oe;

		let (so, co) = omega_k.sin_cos();
		let (si, ci) = i_k.sin_cos();

		let x_k:f64 = x_kp*co - y_kp*ci*so;
		let y_k:f64 = x_kp*so + y_kp*ci*co;
		let z_k:f64 = y_kp*si;

		let vx:f64 = x_kp_dot*co - y_kp_dot*ci*so + y_kp*si*so*i_dot - y_k*omega_k_dot;
		let vy:f64 = x_kp_dot*so + y_kp_dot*ci*co - y_kp*si*co*i_dot + x_k*omega_k_dot;
		let vz:f64 = y_kp_dot*si + y_kp*ci*i_dot;

		// Relativistic correction to transmission time and its rate
		let dt_r:f64     = F * self.e * self.sqrt_a * ek.sin();
		let dt_r_dot:f64 = F * self.e * self.sqrt_a * ek.cos() * ek_dot;

		let dt:f64 = week_wrap(t - self.t_oc);

		SvState {
			pos_ecef: (x_k, y_k, z_k),
			vel_ecef: (vx, vy, vz),
			clock_err: self.dt_sv(t) + dt_r - self.t_gd,
			clock_rate_err: self.a_f1 + 2.0*self.a_f2*dt + dt_r_dot,
		}
	}

}

#[cfg(test)]
mod tests {

	use super::*;

	// A near-circular, realistic GPS orbit
	fn eph() -> Ephemeris {
		Ephemeris {
			t_oc: 388800.0, a_f0: 1.0e-4, a_f1: 2.0e-12, a_f2: 0.0, t_gd: -1.1e-8,
			t_oe: 388800.0, sqrt_a: 5153.6, dn: 1.4e-9, m0: 0.3,
			e: 0.01, omega: -0.6, omega0: 0.25, omega_dot: -2.6e-9,
			cus: 6.0e-6, cuc: -1.5e-6, crs: -30.0, crc: 250.0, cis: 1.0e-7, cic: -5.0e-8,
			i0: 0.31, idot: 1.0e-10,
			..Default::default()
		}
	}

	fn norm(v:(f64, f64, f64)) -> f64 { (v.0*v.0 + v.1*v.1 + v.2*v.2).sqrt() }

	#[test]
	fn orbit_radius_is_plausible() {
		let s = eph().sv_state(390000.0);
		let r = norm(s.pos_ecef);
		assert!(r > 2.60e7 && r < 2.70e7, "r={}", r);
		// ECEF speed of a GPS satellite is a few km/s
		let v = norm(s.vel_ecef);
		assert!(v > 1.0e3 && v < 5.0e3, "v={}", v);
	}

	#[test]
	fn velocity_matches_finite_difference() {
		let e = eph();
		let t = 391234.5;
		let h = 0.5;
		let a = e.sv_state(t - h).pos_ecef;
		let b = e.sv_state(t + h).pos_ecef;
		let v = e.sv_state(t).vel_ecef;
		let fd = ((b.0 - a.0) / (2.0*h), (b.1 - a.1) / (2.0*h), (b.2 - a.2) / (2.0*h));
		assert!(norm((fd.0 - v.0, fd.1 - v.1, fd.2 - v.2)) < 1.0e-3, "fd={:?}, v={:?}", fd, v);
	}

	#[test]
	fn clock_terms() {
		let mut e = eph();
		e.e = 0.0;
		let s = e.sv_state(e.t_oc + 100.0);
		assert!((s.clock_err - (1.0e-4 + 2.0e-12*100.0 + 1.1e-8)).abs() < 1.0e-15);
		assert!((s.clock_rate_err - 2.0e-12).abs() < 1.0e-20);
	}

	#[test]
	fn week_crossover_is_handled() {
		let e = eph();
		// Just after the week rollover, 100 [s] past t_oc in real time
		let t = e.t_oc + 100.0 - 2.0*HALF_WEEK_SEC;
		assert!((e.dt_sv(t) - e.dt_sv(e.t_oc + 100.0)).abs() < 1.0e-18);
	}

}
