#[macro_use]
extern crate log;

use clap::{App, Arg};
use earlywork::parser::{parse_instance, parse_time_limit};
use earlywork::solver::{calculate_early_work, format_solution, hybrid, verify_schedule};
use std::fs;

fn main() {
  env_logger::init();

  let matches = App::new("earlywork")
    .version("1.0")
    .about("Heuristic solver maximizing total early work on uniform parallel machines")
    .arg(
      Arg::with_name("instance")
        .long("instance")
        .help("Instance file name")
        .takes_value(true)
        .required(true),
    )
    .arg(
      Arg::with_name("output")
        .long("output")
        .help("Solution file name")
        .takes_value(true)
        .required(true),
    )
    .arg(
      Arg::with_name("time-limit")
        .long("time-limit")
        .help("Time limit (in s) shared by all search phases")
        .takes_value(true)
        .required(true),
    )
    .arg(
      Arg::with_name("seed")
        .long("seed")
        .help("Seed for rng")
        .takes_value(true)
        .default_value("0"),
    )
    .get_matches();

  let instance_file = matches.value_of("instance").expect("Missing instance file");
  let output_file = matches.value_of("output").expect("Missing output file");
  let time_limit = matches
    .value_of("time-limit")
    .and_then(|m| parse_time_limit(m).ok())
    .expect("Invalid time limit");
  let seed: u64 = matches
    .value_of("seed")
    .and_then(|m| m.parse().ok())
    .expect("Invalid seed");

  let contents = fs::read_to_string(instance_file).expect("Error reading file");
  let instance = parse_instance(&contents).expect("Error parsing file");

  let config = hybrid::Config {
    time_limit: time_limit,
    seed: seed,
  };
  let schedule = hybrid::find_solution(&instance, &config);

  verify_schedule(&instance, &schedule).expect("Verification failed");
  info!(
    "Criterion value {}",
    calculate_early_work(&instance, &schedule)
  );

  fs::write(output_file, format_solution(&instance, &schedule)).expect("Error writing solution");
}
