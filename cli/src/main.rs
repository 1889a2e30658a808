//! Demand-generation command line
//!
//! Produces the per-episode route-definition document for a given seed and
//! prints the schedule summary. The simulator session and the trained model
//! live in the research harness; this binary only covers the part that must
//! be reproducible from the command line.

use std::env;
use std::fs;
use std::process::ExitCode;

use signal_eval_core_rs::DemandGenerator;

struct Options {
    seed: u64,
    max_steps: u32,
    n_cars: u32,
    output: Option<String>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Options, String> {
        let mut options = Options {
            seed: 0,
            max_steps: 5400,
            n_cars: 1000,
            output: None,
        };

        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value_for = |name: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| format!("missing value for {}", name))
            };
            match flag.as_str() {
                "--seed" => options.seed = parse_number(&value_for("--seed")?, "--seed")?,
                "--max-steps" => {
                    options.max_steps = parse_number(&value_for("--max-steps")?, "--max-steps")?
                }
                "--cars" => options.n_cars = parse_number(&value_for("--cars")?, "--cars")?,
                "--out" => options.output = Some(value_for("--out")?),
                other => return Err(format!("unknown flag {}", other)),
            }
        }
        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value '{}' for {}", value, flag))
}

fn print_usage() {
    eprintln!("usage: signal-eval [--seed N] [--max-steps N] [--cars N] [--out FILE]");
}

fn run(args: &[String]) -> Result<(), String> {
    let options = Options::parse(args)?;

    let generator = DemandGenerator::new(options.max_steps, options.n_cars)
        .map_err(|error| error.to_string())?;
    let plan = generator.generate(options.seed);
    log::info!(
        "generated {} spawn events for seed {}",
        plan.len(),
        options.seed
    );

    let straight = plan.events.iter().filter(|e| e.route.is_straight()).count();
    let first_step = plan.events.first().map(|e| e.step).unwrap_or(0);
    let last_step = plan.events.last().map(|e| e.step).unwrap_or(0);

    println!("----- Demand schedule (seed {})", options.seed);
    println!("Vehicles:        {}", plan.len());
    println!("Step horizon:    0..{}", plan.max_steps);
    println!("First spawn:     step {}", first_step);
    println!("Last spawn:      step {}", last_step);
    println!(
        "Straight/turn:   {}/{} ({:.1}% straight)",
        straight,
        plan.len() - straight,
        100.0 * straight as f64 / plan.len() as f64
    );

    let document = plan.to_route_document();
    match &options.output {
        Some(path) => {
            fs::write(path, document)
                .map_err(|error| format!("cannot write {}: {}", path, error))?;
            println!("----- Route document saved at: {}", path);
        }
        None => {
            println!();
            print!("{}", document);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--help") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            print_usage();
            ExitCode::FAILURE
        }
    }
}
