
/// Measurement formation and the satellite/atmosphere models it leans on
pub mod pvt;
