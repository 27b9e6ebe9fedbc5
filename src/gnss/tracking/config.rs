
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::DigSigProcErr;
use crate::gnss::tracking::loop_filter::{self, LoopGains};

#[derive(Debug, Error)]
pub enum ConfigErr {
	#[error("unable to read configuration: {0}")]
	Io(#[from] std::io::Error),
	#[error("unable to parse configuration: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid loop design: {0}")]
	Invalid(#[from] DigSigProcErr),
}

/// Analog design parameters of one second order loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
	pub bandwidth_hz:f64,		// [Hz] loop noise bandwidth
	pub damping_ratio:f64,
	pub loop_gain:f64,			// NCO gain times discriminator gain
	pub update_rate_hz:f64,		// [Hz] rate at which the discriminator output is fed to the filter
}

impl LoopConfig {

	pub fn gains(&self) -> Result<LoopGains, DigSigProcErr> {
		loop_filter::digital_loop_gains(self.bandwidth_hz, self.damping_ratio, self.loop_gain, self.update_rate_hz)
	}

	pub fn time_constants(&self) -> Result<(f64, f64), DigSigProcErr> {
		loop_filter::analog_time_constants(self.bandwidth_hz, self.damping_ratio, self.loop_gain)
	}

}

impl Default for LoopConfig {
	fn default() -> Self { Self { bandwidth_hz: 40.0, damping_ratio: 0.7, loop_gain: 0.25, update_rate_hz: 1000.0 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
	pub carrier: LoopConfig,
	pub code: LoopConfig,
}

impl Default for TrackingConfig {
	fn default() -> Self {
		Self {
			carrier: LoopConfig::default(),
			code: LoopConfig { bandwidth_hz: 4.0, damping_ratio: 0.7, loop_gain: 1.0, update_rate_hz: 1000.0 },
		}
	}
}

impl TrackingConfig {

	pub fn from_json_str(s:&str) -> Result<Self, ConfigErr> {
		let cfg:Self = serde_json::from_str(s)?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn from_json_file<P: AsRef<Path>>(path:P) -> Result<Self, ConfigErr> {
		let s = fs::read_to_string(path)?;
		Self::from_json_str(&s)
	}

	/// Both loops must yield gains
	pub fn validate(&self) -> Result<(), DigSigProcErr> {
		self.carrier.gains()?;
		self.code.gains()?;
		Ok(())
	}

}
