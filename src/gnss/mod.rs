
/// Physical and signal constants shared by tracking and measurement formation
pub mod constants;

/// This module contains the per-channel tracking kernel: correlation, discriminators and loop design
pub mod tracking;

pub mod gps_l1_ca;
