/// Mesh to binary point cloud converter main entry point
mod bounds;
mod constants;
mod converter;
mod error;
mod mesh;
mod obj;
mod pcd;
mod sampler;
mod stl;

use constants::DEFAULT_POINT_COUNT;
use converter::MeshConverter;
use error::ConvertResult;
use std::env;
use std::path::PathBuf;
use std::process;

struct CliOptions {
    input: PathBuf,
    output: PathBuf,
    points: usize,
    seed: Option<u64>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let Some(options) = parse_args(&args) else {
        eprintln!(
            "Usage: {} <input.stl|input.obj> <output.pcd> [--points N] [--seed S]",
            args[0]
        );
        process::exit(1);
    };

    if let Err(err) = run(&options) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(options: &CliOptions) -> ConvertResult<()> {
    let converter = MeshConverter::new(
        &options.input,
        &options.output,
        options.points,
        options.seed,
    )?;
    converter.convert()
}

/// Parse positional input/output paths and optional flags.
/// Returns None on any malformed argument so main can print usage.
fn parse_args(args: &[String]) -> Option<CliOptions> {
    let mut positional = Vec::new();
    let mut points = DEFAULT_POINT_COUNT;
    let mut seed = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--points" | "-p" => points = iter.next()?.parse().ok()?,
            "--seed" | "-s" => seed = Some(iter.next()?.parse().ok()?),
            flag if flag.starts_with('-') => return None,
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() != 2 {
        return None;
    }

    Some(CliOptions {
        input: PathBuf::from(&positional[0]),
        output: PathBuf::from(&positional[1]),
        points,
        seed,
    })
}
