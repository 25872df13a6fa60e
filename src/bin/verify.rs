use clap::{App, Arg};
use earlywork::parser::parse_instance;
use earlywork::verifier::{verify_output, Verdict};
use std::fs;
use std::process;

fn main() {
  env_logger::init();

  let matches = App::new("verify")
    .version("1.0")
    .about("Checks a solution file against its instance")
    .arg(
      Arg::with_name("instance")
        .long("instance")
        .help("Instance file name")
        .takes_value(true)
        .required(true),
    )
    .arg(
      Arg::with_name("solution")
        .long("solution")
        .help("Solution file name")
        .takes_value(true)
        .required(true),
    )
    .get_matches();

  let instance_file = matches.value_of("instance").expect("Missing instance file");
  let solution_file = matches.value_of("solution").expect("Missing solution file");

  let instance_contents = fs::read_to_string(instance_file).expect("Error reading instance file");
  let instance = parse_instance(&instance_contents).expect("Error parsing instance file");
  let solution_contents = fs::read_to_string(solution_file).expect("Error reading solution file");

  match verify_output(&instance, &solution_contents) {
    Ok(Verdict::Pass { value }) => {
      println!("OK: criterion value = {}", value);
    }
    Ok(Verdict::Mismatch { computed, reported }) => {
      println!(
        "ERROR: criterion value mismatch, computed {} but solution reports {}",
        computed, reported
      );
      process::exit(1);
    }
    Ok(Verdict::Invalid { reason }) => {
      println!("ERROR: {}", reason);
      process::exit(1);
    }
    Err(err) => {
      println!("ERROR: {}", err);
      process::exit(1);
    }
  }
}
