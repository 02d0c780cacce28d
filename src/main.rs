// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::time::Duration;

use anyhow::Result;
use subbeat::catalog::time_signature_label;
use subbeat::{InstrumentKind, PatternCatalog, Sequencer, SequencerConfig};

fn print_usage() {
    println!("SUBBEAT - Rhythm Pattern Sequencer");
    println!();
    println!("Usage: subbeat [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list                 List the built-in pattern catalog");
    println!("  --pattern <TEXT>       Play a pattern string (e.g. \"1/4, 1/8, 1/8\")");
    println!("  --beat <NAME>          Play a catalogued pattern by name");
    println!("  --tempo <BPM>          Tempo in BPM (default 60)");
    println!("  --loops <N>            Stop after N full passes (default: until Ctrl+C)");
    println!("  --seed <N>             Seed the RNG for reproducible randomization");
    println!("  --randomize            Randomize the structure before playing");
    println!("  --humanize <KIND>      Enable humanize for an instrument (repeatable)");
    println!("  --help                 Show this help message");
}

fn print_catalog(catalog: &PatternCatalog) {
    println!("Built-in patterns:");
    for (total, entries) in catalog.grouped() {
        println!();
        println!("  {}", time_signature_label(total));
        for entry in entries {
            println!("    {:<20} {}", entry.name, entry.pattern);
        }
    }
}

struct Options {
    pattern: Option<String>,
    beat: Option<String>,
    tempo: Option<f64>,
    loops: Option<usize>,
    seed: Option<u64>,
    randomize: bool,
    humanize: Vec<InstrumentKind>,
    list: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        pattern: None,
        beat: None,
        tempo: None,
        loops: None,
        seed: None,
        randomize: false,
        humanize: Vec::new(),
        list: false,
    };

    let mut index = 0;
    while index < args.len() {
        let take_value = |index: usize| -> Result<&String> {
            args.get(index + 1)
                .ok_or_else(|| anyhow::anyhow!("{} requires a value", args[index]))
        };
        match args[index].as_str() {
            "--list" => options.list = true,
            "--pattern" => {
                options.pattern = Some(take_value(index)?.clone());
                index += 1;
            }
            "--beat" => {
                options.beat = Some(take_value(index)?.clone());
                index += 1;
            }
            "--tempo" => {
                let value = take_value(index)?;
                options.tempo = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid tempo: {}", value))?,
                );
                index += 1;
            }
            "--loops" => {
                let value = take_value(index)?;
                options.loops = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid loop count: {}", value))?,
                );
                index += 1;
            }
            "--seed" => {
                let value = take_value(index)?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid seed: {}", value))?,
                );
                index += 1;
            }
            "--randomize" => options.randomize = true,
            "--humanize" => {
                let value = take_value(index)?;
                options.humanize.push(value.parse()?);
                index += 1;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        index += 1;
    }

    Ok(options)
}

async fn run(mut seq: Sequencer, options: Options) -> Result<()> {
    match (&options.pattern, &options.beat) {
        (Some(pattern), _) => seq.load_pattern(pattern)?,
        (None, Some(name)) => seq.select_pattern(name)?,
        (None, None) => seq.select_pattern("Four on the Floor")?,
    }

    if let Some(bpm) = options.tempo {
        seq.set_tempo(bpm);
    }
    for kind in &options.humanize {
        seq.set_humanize(*kind, true);
    }
    if options.randomize {
        seq.randomize_structure();
    }

    let loop_length = seq.events().len();
    println!(
        "Playing {} events per pass at {} BPM (Ctrl+C to stop)",
        loop_length,
        seq.tempo().bpm()
    );

    seq.start();
    let mut passes = 0usize;

    loop {
        let wait = seq
            .time_until_next()
            .unwrap_or(Duration::from_millis(10))
            .max(Duration::from_millis(1));

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Stopped");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                // A wrap back to index 0 marks the end of a pass
                if seq.poll().contains(&0) {
                    passes += 1;
                    if options.loops.is_some_and(|limit| passes >= limit) {
                        break;
                    }
                }
            }
        }
    }

    seq.stop();
    println!("Played {} full passes", passes);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let options = parse_args(&args)?;
    let config = SequencerConfig::load_default()?;
    let mut seq = Sequencer::with_config(config);
    if let Some(seed) = options.seed {
        seq.seed_rng(seed);
    }

    if options.list {
        print_catalog(seq.catalog());
        return Ok(());
    }

    run(seq, options).await
}
