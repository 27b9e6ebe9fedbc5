
// IS-GPS-200 and WGS-84 values; everything downstream refers to these by name

pub const C:f64 = 2.99792458e8;                  // [m/s] speed of light
pub const GPS_L1_HZ:f64 = 1.57542e9;             // [Hz] L1 carrier frequency
pub const CHIP_RATE:f64 = 1.023e6;               // [chips/s] C/A code chipping rate
pub const CODE_LENGTH:f64 = 1023.0;              // [chips] one C/A code period
pub const CODE_LENGTH_CHIPS:usize = 1023;        // [chips] same as CODE_LENGTH, for indexing

/// [m] Offset added to every raw pseudorange.  The receiver clock bias is unknown when measurements are
/// formed, so the relative ranges get shifted into a physically plausible range domain (roughly the
/// distance to a GPS satellite) and the solver absorbs the difference into its clock term.
pub const NOMINAL_RANGE:f64 = 22.980e6;

pub const MU:f64 = 3.986005e14;                  // [m^3/s^2] WGS-84 value of the earth's gravitational constant
pub const OMEGA_E:f64 = 7.2921151467e-5;         // [rad/s] WGS-84 value of the earth's rotation rate
pub const F:f64 = -4.442807633e-10;              // [sec/root-meter] relativistic clock correction constant

pub const HALF_WEEK_SEC:f64 = 302400.0;          // [sec]
