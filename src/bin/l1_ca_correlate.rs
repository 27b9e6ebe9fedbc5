
extern crate clap;
extern crate colored;
extern crate gnss_track;
extern crate serde;

use std::f64::consts;
use std::fs;

use clap::{Arg, App};
use colored::*;
use log::{error, info};
use num_complex::Complex;
use serde::{Serialize, Deserialize};

use gnss_track::io;
use gnss_track::gnss::constants::{CHIP_RATE, CODE_LENGTH, GPS_L1_HZ};
use gnss_track::gnss::tracking::{self, lock_detectors, CorrelationSet};

const LOCK_WINDOW:usize = 20;

#[derive(Debug, Serialize, Deserialize)]
struct Record {
	sample_idx: usize,
	num_samples: u32,
	correlations: CorrelationSet,
	carrier_error: f64,
	code_error: f64,
	code_phase: f64,
	carrier_phase: f64,
}

fn main() {
	env_logger::init();

	let matches = App::new("GPS L1 CA Correlator")
		.version("0.1.0")
		.author("John Stanford (johnwstanford@gmail.com)")
		.about("Correlates signed 8-bit real samples against a C/A replica one code period at a time with a fixed Doppler and reports discriminator outputs")
		.arg(Arg::with_name("filename")
			.short("f").long("filename")
			.help("Input filename, signed 8-bit samples")
			.required(true).takes_value(true))
		.arg(Arg::with_name("replica")
			.short("r").long("replica")
			.help("One code period of signed 8-bit chips (1023 bytes)")
			.required(true).takes_value(true))
		.arg(Arg::with_name("sample_rate_sps")
			.short("s").long("sample_rate_sps")
			.takes_value(true).required(true))
		.arg(Arg::with_name("if_hz")
			.long("if_hz").help("Intermediate frequency [Hz]")
			.takes_value(true).default_value("0.0"))
		.arg(Arg::with_name("doppler_hz")
			.short("d").long("doppler_hz")
			.takes_value(true).default_value("0.0"))
		.arg(Arg::with_name("code_phase")
			.short("c").long("code_phase").help("Initial code phase [chips]")
			.takes_value(true).default_value("0.0"))
		.arg(Arg::with_name("max_records")
			.short("m").long("max_records")
			.takes_value(true))
		.get_matches();

	let parse = |name:&str| -> f64 {
		match matches.value_of(name).map(|s| s.parse::<f64>()) {
			Some(Ok(x)) => x,
			_ => { eprintln!("{}", format!("Invalid value for {}", name).red()); std::process::exit(1) }
		}
	};

	let fname:&str   = matches.value_of("filename").unwrap_or_default();
	let rname:&str   = matches.value_of("replica").unwrap_or_default();
	let fs:f64       = parse("sample_rate_sps");
	let if_hz:f64    = parse("if_hz");
	let doppler:f64  = parse("doppler_hz");
	let opt_max_records:Option<usize> = matches.value_of("max_records").and_then(|s| s.parse().ok());

	let code:Vec<i8> = match fs::read(rname).map(|bytes| tracking::replica_from_bytes(&bytes)) {
		Ok(Ok(code)) => code,
		Ok(Err(e)) => { error!("Replica {} rejected: {}", rname, e); std::process::exit(1) },
		Err(e) => { error!("Unable to read replica {}: {}", rname, e); std::process::exit(1) }
	};

	let mut src = match io::file_source_i8(fname) {
		Ok(src) => src,
		Err(e) => { error!("Unable to open {}: {}", fname, e); std::process::exit(1) }
	};

	let code_step:f64    = CHIP_RATE * (1.0 + doppler / GPS_L1_HZ) / fs;
	let carrier_step:f64 = 2.0 * consts::PI * (if_hz + doppler) / fs;
	let mut code_phase:f64    = parse("code_phase");
	let mut carrier_phase:f64 = 0.0;

	info!("{} at {} [samples/sec], code_step={:.6} [chips/sample], carrier_step={:.6} [rad/sample]", fname, fs, code_step, carrier_step);

	let mut records:Vec<Record> = vec![];
	let mut prompts:Vec<Complex<f64>> = vec![];
	let mut sample_idx:usize = 0;

	loop {
		let needed = ((CODE_LENGTH - code_phase) / code_step).ceil() as usize;
		let block = src.take_block(needed);
		if block.len() < needed { break; }

		match tracking::correlate(&block, &code, &mut code_phase, code_step, &mut carrier_phase, carrier_step) {
			Ok(out) => {
				let prompt = out.prompt();
				records.push(Record {
					sample_idx, num_samples: out.num_samples, correlations: out.correlations,
					carrier_error: tracking::costas_discriminator(prompt.re, prompt.im),
					code_error: tracking::dll_discriminator(&out.correlations),
					code_phase, carrier_phase,
				});
				sample_idx += out.num_samples as usize;

				prompts.push(prompt);
				if prompts.len() == LOCK_WINDOW {
					let cn0  = lock_detectors::cn0_snv_estimator(&prompts, 1.0e-3);
					let lock = lock_detectors::carrier_lock_detector(&prompts);
					let status = format!("{:8.2} [dB-Hz], carrier lock {:6.3}", cn0, lock);
					if lock > 0.8 { eprintln!("{}", status.green()); } else { eprintln!("{}", status.yellow()); }
					prompts.clear();
				}
			},
			Err(e) => {
				error!("Correlation failed at sample {}: {}", sample_idx, e);
				break;
			}
		}

		if let Some(max_records) = opt_max_records {
			if records.len() >= max_records { break; }
		}
	}

	// Output data in JSON format
	match serde_json::to_string_pretty(&records) {
		Ok(s) => println!("{}", s),
		Err(e) => error!("Unable to serialize results: {}", e),
	}
}
