
pub mod ephemeris;
pub mod measurement;
pub mod troposphere;

pub use self::ephemeris::{Ephemeris, SvState, SvStateProvider};
pub use self::measurement::{form_measurements, ChannelMeasurement, NavigationMeasurement};
pub use self::troposphere::{apply_tropo_correction, SimpleModel, TroposphereModel};
