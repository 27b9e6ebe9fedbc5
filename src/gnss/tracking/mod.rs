
pub mod config;
pub mod correlator;
pub mod discriminators;
pub mod lock_detectors;
pub mod loop_filter;

pub use self::correlator::{correlate, pad_code, replica_from_bytes, CorrelationSet, CorrelatorOutput};
pub use self::discriminators::{costas_discriminator, dll_discriminator};
pub use self::loop_filter::{analog_time_constants, digital_loop_gains, LoopGains};
