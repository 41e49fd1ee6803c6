// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use cadenza::{compose, Composition, CompositionConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Cadenza - Procedural Composition Engine");
    println!();
    println!("Usage: cadenza [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>       Load settings from a YAML or TOML file");
    println!("  --tonic <NOTE>        Tonic pitch class, e.g. C, F#, Bb (default C)");
    println!("  --mode <MODE>         major or minor (default major)");
    println!("  --time <SIG>          4/4, 3/4 or 6/8 (default 4/4)");
    println!("  --length <N>          Number of measures (default 8)");
    println!("  --structure <FORM>    A, AABA or AB (default A)");
    println!("  --rhythm <STYLE>      random, whole, half, quarter or eighth (default random)");
    println!("  --no-melody           Chord part only");
    println!("  --no-slurs            Do not add slurs to the melody");
    println!("  --no-ties             Do not tie repeated melody notes");
    println!("  --melody-only         Leave out the chord part");
    println!("  --seed <N>            Seed for reproducible output");
    println!("  --yaml                Print the whole composition as YAML");
    println!("  --verbose             Show generation details on stderr");
    println!("  --help                Show this help message");
}

/// What the command line asked for
struct Options {
    config: CompositionConfig,
    yaml: bool,
    verbose: bool,
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(None);
    }

    // The config file is the base layer; flags override it wherever they appear
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => CompositionConfig::load(value_of(args, i, "--config")?)?,
        None => CompositionConfig::default(),
    };
    let mut yaml = false;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => i += 1,
            "--tonic" => {
                config.tonic = value_of(args, i, flag)?.to_string();
                i += 1;
            }
            "--mode" => {
                config.mode = value_of(args, i, flag)?.to_string();
                i += 1;
            }
            "--time" => {
                config.time_signature = value_of(args, i, flag)?.to_string();
                i += 1;
            }
            "--length" => {
                let value = value_of(args, i, flag)?;
                config.length = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid length: {}", value))?;
                i += 1;
            }
            "--structure" => {
                config.structure = value_of(args, i, flag)?.to_string();
                i += 1;
            }
            "--rhythm" => {
                config.rhythm = value_of(args, i, flag)?.to_string();
                i += 1;
            }
            "--seed" => {
                let value = value_of(args, i, flag)?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow!("Invalid seed: {}", value))?,
                );
                i += 1;
            }
            "--no-melody" => config.melody = false,
            "--no-slurs" => config.slurs = false,
            "--no-ties" => config.ties = false,
            "--melody-only" => config.melody_only = true,
            "--yaml" => yaml = true,
            "--verbose" | "-v" => verbose = true,
            _ => return Err(anyhow!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    Ok(Some(Options {
        config,
        yaml,
        verbose,
    }))
}

fn print_composition(composition: &Composition) {
    println!("{}", composition.score.title);
    println!();
    println!("Progression: {}", composition.progression);
    println!();
    if let Some(melody) = &composition.score.melody {
        println!("{}", melody);
    }
    if let Some(chords) = &composition.score.chords {
        println!("{}", chords);
    }
    for warning in composition.score.warnings() {
        println!("Warning: {}", warning);
    }
    println!("{}", composition.analysis);
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            eprintln!("Run with --help for usage information");
            std::process::exit(1);
        }
    };

    let default_level = if options.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let params = match options.config.validate() {
        Ok(params) => params,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let composition = compose(params).context("Composition failed")?;

    if options.yaml {
        let yaml = serde_yaml::to_string(&composition).context("Failed to serialize composition")?;
        print!("{}", yaml);
    } else {
        print_composition(&composition);
    }

    Ok(())
}
