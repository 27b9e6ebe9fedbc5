
extern crate clap;
extern crate gnss_track;

use clap::{Arg, App};
use colored::*;
use serde::Serialize;

use gnss_track::gnss::tracking::LoopGains;
use gnss_track::gnss::tracking::config::{LoopConfig, TrackingConfig};

#[derive(Debug, Serialize)]
struct LoopReport {
	config: LoopConfig,
	tau1: f64,
	tau2: f64,
	gains: LoopGains,
}

#[derive(Debug, Serialize)]
struct Report {
	carrier: LoopReport,
	code: LoopReport,
}

fn report(config:LoopConfig) -> Result<LoopReport, gnss_track::DigSigProcErr> {
	let (tau1, tau2) = config.time_constants()?;
	let gains = config.gains()?;
	Ok(LoopReport { config, tau1, tau2, gains })
}

fn main() {
	env_logger::init();

	let matches = App::new("Loop Gains")
		.version("0.1.0")
		.author("John Stanford (johnwstanford@gmail.com)")
		.about("Computes second order PLL and DLL loop filter coefficients from a JSON tracking configuration")
		.arg(Arg::with_name("config")
			.short("c").long("config")
			.help("JSON tracking configuration; defaults are used if omitted")
			.takes_value(true))
		.get_matches();

	let cfg = match matches.value_of("config") {
		Some(path) => match TrackingConfig::from_json_file(path) {
			Ok(cfg) => cfg,
			Err(e) => { eprintln!("{}", format!("{}: {}", path, e).red()); std::process::exit(1) },
		},
		None => TrackingConfig::default(),
	};

	let result = report(cfg.carrier).and_then(|carrier| report(cfg.code).map(|code| Report { carrier, code }));
	match result {
		Ok(r) => match serde_json::to_string_pretty(&r) {
			Ok(s) => println!("{}", s),
			Err(e) => { eprintln!("{}", format!("{}", e).red()); std::process::exit(1) },
		},
		Err(e) => { eprintln!("{}", format!("{}", e).red()); std::process::exit(1) },
	}
}
