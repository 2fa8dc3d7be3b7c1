#![allow(clippy::uninlined_format_args)]

use esregex::{backends, Error, Flags, MatchOutcome, Options, Regex, StepLimit};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use structopt::StructOpt;
use tracing_subscriber::filter::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(name = "esregex-tool")]
struct Opt {
    /// The regular expression.
    pattern: String,

    /// The flags of the regular expression, like "gimsuy".
    #[structopt(long, short)]
    flags: Option<Flags>,

    /// Disable the IR optimizations.
    #[structopt(long)]
    no_opt: bool,

    /// Dump the parsed IR to stdout.
    #[structopt(long)]
    dump_ast: bool,

    /// Dump the bytecode to stdout.
    #[structopt(long)]
    dump_bytecode: bool,

    /// Dump all regular expression compilation phases to stdout.
    #[structopt(long)]
    dump_phases: bool,

    /// Give up on a match after this many instructions.
    #[structopt(long)]
    step_limit: Option<u64>,

    /// The input values to match against.
    #[structopt(conflicts_with_all = &["bench", "file"])]
    inputs: Vec<String>,

    /// Match against the contents of a specified file.
    #[structopt(long, conflicts_with_all = &["bench", "inputs"])]
    file: Option<PathBuf>,

    /// Benchmark the matches of the specified file.
    #[structopt(long, conflicts_with_all = &["file", "inputs"])]
    bench: Option<PathBuf>,
}

fn format_match(r: &esregex::Match, input: &str) -> String {
    let mut result = format!(
        "\"{}\" ({}..{})",
        &input[r.range()],
        r.range().start,
        r.range().end
    );

    // Show capture groups if any exist
    if !r.captures.is_empty() {
        let captures: Vec<String> = r
            .captures
            .iter()
            .map(|cg| match cg {
                Some(cg) => format!("\"{}\" ({}..{})", &input[cg.clone()], cg.start, cg.end),
                None => "None".to_string(),
            })
            .collect();
        result.push_str(&format!(", captures: [{}]", captures.join(", ")));
    }
    for (name, range) in r.named_groups() {
        match range {
            Some(range) => result.push_str(&format!(", {}: \"{}\"", name, &input[range])),
            None => result.push_str(&format!(", {}: None", name)),
        }
    }
    result
}

fn exec_re_on_string(re: &Regex, input: &str) {
    let mut matches = re.find_iter(input);
    if let Some(res) = matches.next() {
        let count = if re.flags().global {
            1 + matches.count()
        } else {
            1
        };
        println!("Match: {}, total: {}", format_match(&res, input), count);
    } else {
        println!("No match");
    }
}

fn exec_re_with_limit(re: &Regex, input: &str, limit: u64) {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut budget = StepLimit::new(limit);
    match re.exec_with_budget(&units, 0, false, &mut budget) {
        MatchOutcome::Matched(m) => println!(
            "Match: {}..{} (code units), steps left: {}",
            m.start(),
            m.end(),
            budget.remaining()
        ),
        MatchOutcome::NoMatch => println!("No match, steps left: {}", budget.remaining()),
        MatchOutcome::Aborted => println!("Aborted after {} steps", limit),
    }
}

fn bench_re_on_path(re: &Regex, path: &Path) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            println!("{}: {}", err, path.display());
            return;
        }
    };
    let input = contents.as_str();
    // Warmup
    re.find_iter(input).count();
    let start = Instant::now();
    for _ in 0..25 {
        re.find_iter(input).count();
    }
    let duration = start.elapsed();
    println!("{} ms", duration.as_millis());
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Opt::from_args();

    let mut flags = args.flags.unwrap_or_default();
    flags.no_opt = args.no_opt;
    let options = Options::from(flags);
    options.validate()?;

    if args.dump_phases || args.dump_ast {
        let units: Vec<u16> = args.pattern.encode_utf16().collect();
        let mut ire = backends::try_parse(&units, &options)?;
        println!("Unoptimized IR:\n{}", ire);
        if args.dump_phases && !flags.no_opt {
            backends::optimize(&mut ire);
            println!("Optimized IR:\n{}", ire);
        }
    }

    let re = Regex::with_options(&args.pattern, options)?;
    if args.dump_phases || args.dump_bytecode {
        println!("Bytecode:\n{}", re.disassemble());
    }

    if let Some(ref path) = args.file {
        match fs::read_to_string(path) {
            Ok(contents) => exec_re_on_string(&re, contents.as_str()),
            Err(err) => println!("{}: {}", err, path.display()),
        };
    } else if let Some(ref path) = args.bench {
        bench_re_on_path(&re, path);
    } else {
        for input in args.inputs {
            match args.step_limit {
                Some(limit) => exec_re_with_limit(&re, &input, limit),
                None => exec_re_on_string(&re, &input),
            }
        }
    }
    Ok(())
}
