use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use vivify_isa::{generate, parse};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Target {
    Rust,
}

#[derive(Debug, Parser)]
struct Args {
    /// Language to generate the decode logic in
    #[arg(value_enum)]
    target: Target,

    /// Instruction set description file
    file: PathBuf,

    /// Output file, stdout if not given
    #[arg(short = 'o')]
    output: Option<PathBuf>,

    /// Print the parsed instruction listing to stderr
    #[arg(short = 'v')]
    verbose: bool,
}

fn open_output(path: Option<&PathBuf>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let Target::Rust = args.target;

    let filename = args.file.display().to_string();
    let src = match fs::read_to_string(&args.file) {
        Ok(src) => src,
        Err(err) => {
            eprintln!("could not read {}: {}", filename, err);
            return ExitCode::FAILURE;
        }
    };

    let instructions = match parse(&src) {
        Ok(instructions) => instructions,
        Err(err) => {
            anstream::println!("{}", err.display(&src, &filename));
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        for inst in &instructions {
            eprintln!("{}", inst);
        }
    }

    let artifacts = generate(&instructions);
    let result = open_output(args.output.as_ref()).and_then(|mut out| {
        artifacts.write_to(&mut out)?;
        out.flush()
    });

    if let Err(err) = result {
        eprintln!("could not write output: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
