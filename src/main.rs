use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use serde::Serialize;

use compact_suffix_tree::{
    construct_with_config, normalize, random_text, time_strategies, Alphabet, BuildStrategy,
    CompactSuffixTree, StrategyTiming, TreeConfig,
};

/// Build a compacted suffix tree over one or more texts and search it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Texts to index, in source order (after any --file and --random texts)
    texts: Vec<String>,

    /// Read a text from this file; repeat for several files
    #[arg(long = "file", short = 'f')]
    files: Vec<PathBuf>,

    /// Index one randomly generated text of this many characters
    #[arg(long)]
    random: Option<usize>,

    /// Character set for --random
    #[arg(long, value_enum, default_value_t = Alphabet::Letters)]
    alphabet: Alphabet,

    /// Construction strategy: direct (alias incremental, nlgn) or trie (alias n2)
    #[arg(long, alias = "cost", default_value_t = BuildStrategy::DirectIncremental)]
    strategy: BuildStrategy,

    /// Abort construction once a structure would exceed this many nodes
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Keep upper and lower case distinct
    #[arg(long)]
    case_sensitive: bool,

    /// Pattern to search for; repeatable. Without any, patterns are read from stdin
    #[arg(long = "pattern", short = 'p')]
    patterns: Vec<String>,

    /// Print the longest repeated substring (single text only)
    #[arg(long)]
    longest: bool,

    /// Print the maximal repeats (single text only)
    #[arg(long)]
    maximals: bool,

    /// Print a construction time comparison of both strategies
    #[arg(long)]
    time: bool,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Verbose/info output (default: quiet)
    #[arg(long, short = 'v', alias = "info")]
    verbose: bool,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Trace output
    #[arg(long)]
    trace: bool,
}

/// One indexed text and where it came from.
#[derive(Debug, Clone, Serialize)]
struct Source {
    label: String,
    length: usize,
}

#[derive(Debug, Clone, Serialize)]
struct PatternReport {
    pattern: String,
    sources: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct TimingReport {
    strategy: String,
    elapsed_ns: Option<u128>,
    error: Option<String>,
}

impl From<&StrategyTiming> for TimingReport {
    fn from(timing: &StrategyTiming) -> Self {
        let (elapsed_ns, error) = match &timing.elapsed {
            Ok(elapsed) => (Some(elapsed.as_nanos()), None),
            Err(error) => (None, Some(error.to_string())),
        };
        Self {
            strategy: timing.strategy.to_string(),
            elapsed_ns,
            error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    strategy: String,
    node_count: usize,
    sources: Vec<Source>,
    patterns: Vec<PatternReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    timings: Vec<TimingReport>,
}

fn main() {
    let args = Args::parse();
    let log_level = if args.trace {
        "trace"
    } else if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "error"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(error) = run(&args, &mut stdin.lock(), &mut stdout.lock()) {
        eprintln!("suffix-tree failed: {error:?}");
        std::process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(args: &Args, input: &mut R, out: &mut W) -> Result<Report> {
    let (sources, texts) = collect_texts(args, input, out)?;
    info!(
        "Indexing {} text(s) with the {} strategy",
        texts.len(),
        args.strategy
    );

    let mut timings = Vec::new();
    if args.time {
        timings = time_strategies(&texts, args.max_nodes)
            .iter()
            .map(TimingReport::from)
            .collect();
        write_timing_table(out, &timings)?;
    }

    let config = TreeConfig {
        strategy: args.strategy,
        max_nodes: args.max_nodes,
    };
    writeln!(out, "Creating tree.")?;
    let tree = construct_with_config(&texts, config)
        .with_context(|| format!("Failed to build the {} tree", args.strategy))?;
    debug!("Tree built with {} nodes", tree.node_count());

    let patterns = if args.patterns.is_empty() {
        interactive_patterns(&tree, &sources, args.case_sensitive, input, out)?
    } else {
        let mut reports = Vec::with_capacity(args.patterns.len());
        for raw in &args.patterns {
            let pattern = resolve_pattern(raw, args.case_sensitive)?;
            if pattern.is_empty() {
                skip_empty_pattern(raw, out)?;
                continue;
            }
            let report = search_and_print(&tree, &sources, pattern, out)?;
            reports.push(report);
        }
        reports
    };

    let mut longest = None;
    let mut maximals = None;
    if texts.len() > 1 && (args.longest || args.maximals) {
        writeln!(
            out,
            "Longest repeat and maximal repeats are only available for a single text."
        )?;
    } else {
        if args.longest {
            let repeat = tree.longest_repeated_substring();
            writeln!(out, "Longest repeated substring: {repeat}\n")?;
            longest = Some(repeat);
        }
        if args.maximals {
            let repeats = tree.maximal_repeats();
            write_maximals(out, &repeats)?;
            maximals = Some(repeats);
        }
    }

    let report = Report {
        strategy: tree.strategy().to_string(),
        node_count: tree.node_count(),
        sources,
        patterns,
        longest,
        maximals,
        timings,
    };

    if let Some(path) = &args.json {
        write_json(path, &report)?;
        info!("Report written to {}", path.display());
    }
    Ok(report)
}

/// Gather texts in source order: files, then the random text, then positional
/// arguments. Falls back to one prompted line when nothing was supplied.
fn collect_texts<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    out: &mut W,
) -> Result<(Vec<Source>, Vec<String>)> {
    let mut labelled: Vec<(String, String)> = Vec::new();

    for path in &args.files {
        let text = read_text_file(path, args.case_sensitive)?;
        labelled.push((path.display().to_string(), text));
    }

    if let Some(len) = args.random {
        let text = random_text(&mut rand::thread_rng(), len, args.alphabet);
        debug!("Random text: {text}");
        labelled.push((format!("random({len})"), text));
    }

    for (index, raw) in args.texts.iter().enumerate() {
        labelled.push((format!("text #{index}"), normalize(raw, args.case_sensitive)));
    }

    if labelled.is_empty() {
        write!(out, "Enter text: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            bail!("No text supplied");
        };
        labelled.push(("stdin".to_owned(), normalize(&line, args.case_sensitive)));
        writeln!(out)?;
    }

    Ok(labelled
        .into_iter()
        .map(|(label, text)| {
            (
                Source {
                    label,
                    length: text.chars().count(),
                },
                text,
            )
        })
        .unzip())
}

fn read_text_file(path: &Path, case_sensitive: bool) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read text from {}", path.display()))?;
    Ok(normalize(&raw, case_sensitive))
}

/// A pattern naming an existing file stands for that file's contents.
fn resolve_pattern(raw: &str, case_sensitive: bool) -> Result<String> {
    let path = Path::new(raw);
    if !raw.is_empty() && path.is_file() {
        debug!("Reading pattern from {}", path.display());
        read_text_file(path, case_sensitive)
    } else {
        Ok(normalize(raw, case_sensitive))
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let bytes = input.read_line(&mut line).context("Failed to read from stdin")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

/// Prompt for patterns until `0` or end of input.
fn interactive_patterns<R: BufRead, W: Write>(
    tree: &CompactSuffixTree,
    sources: &[Source],
    case_sensitive: bool,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<PatternReport>> {
    let mut reports = Vec::new();
    loop {
        write!(out, "Enter pattern (0 to exit): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            break;
        };
        let pattern = resolve_pattern(&line, case_sensitive)?;
        if pattern == "0" {
            break;
        }
        if pattern.is_empty() {
            skip_empty_pattern(&line, out)?;
            continue;
        }
        reports.push(search_and_print(tree, sources, pattern, out)?);
    }
    Ok(reports)
}

/// Nothing is left of `raw` after normalization; searching it would match
/// every source.
fn skip_empty_pattern<W: Write>(raw: &str, out: &mut W) -> Result<()> {
    warn!("Pattern {raw:?} is empty after normalization, skipping");
    writeln!(out, "Pattern '{raw}' has no searchable characters, skipped\n")?;
    Ok(())
}

fn search_and_print<W: Write>(
    tree: &CompactSuffixTree,
    sources: &[Source],
    pattern: String,
    out: &mut W,
) -> Result<PatternReport> {
    let found: Vec<usize> = tree.search(&pattern).into_iter().collect();
    if found.is_empty() {
        writeln!(out, "Pattern '{pattern}' not found\n")?;
    } else {
        writeln!(out, "Pattern '{pattern}' found in:")?;
        for &index in &found {
            writeln!(out, "\t{}", sources[index].label)?;
        }
        writeln!(out)?;
    }
    Ok(PatternReport {
        pattern,
        sources: found,
    })
}

fn write_maximals<W: Write>(out: &mut W, repeats: &[String]) -> Result<()> {
    if repeats.is_empty() {
        writeln!(out, "No maximal repeats\n")?;
        return Ok(());
    }
    writeln!(out, "Maximal repeats:")?;
    for row in repeats.chunks(5) {
        writeln!(out, "\t{}", row.join(", "))?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_timing_table<W: Write>(out: &mut W, timings: &[TimingReport]) -> Result<()> {
    const RULE: &str = "+-----------+----------+--------------+-----------------+";
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "| {:<9} | {:>8} | {:>12} | {:>15} |",
        "STRATEGY", "ms", "us", "ns"
    )?;
    writeln!(out, "{RULE}")?;
    for timing in timings {
        match timing.elapsed_ns {
            Some(ns) => writeln!(
                out,
                "| {:<9} | {:>8} | {:>12} | {:>15} |",
                timing.strategy,
                ns / 1_000_000,
                ns / 1_000,
                ns
            )?,
            None => writeln!(
                out,
                "| {:<9} | {:>42} |",
                timing.strategy, "resource limit exceeded"
            )?,
        }
    }
    writeln!(out, "{RULE}\n")?;
    Ok(())
}

fn write_json(path: &Path, report: &Report) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    writeln!(file, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
