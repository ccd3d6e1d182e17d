use anyhow::{Context, Result, bail};
use clap::Parser;
use fern::colors::{Color, ColoredLevelConfig};
use isometric_projection::consts::DEFAULT_ORTHO_ANGLE;
use isometric_projection::document::Document;
use isometric_projection::{ProjectionOptions, SelectionReport, project_selection};
use log::LevelFilter;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "isometric-projection")]
#[command(about = "Convert a flat 2D drawing to one of the three visible sides of an isometric projection, and vice versa")]
struct Args {
	/// Document to transform (JSON), or `-` to read from stdin
	input: PathBuf,

	/// Where to write the transformed document (defaults to overwriting the input, `-` for stdout)
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Conversion to perform: top, left or right
	#[arg(long, default_value = "top")]
	conversion: String,

	/// Reverse the transformation from isometric projection to flat 2D
	#[arg(long)]
	reverse: bool,

	/// Isometric angle in degrees
	#[arg(long, default_value_t = DEFAULT_ORTHO_ANGLE, allow_negative_numbers = true)]
	orthoangle: f64,

	/// Project these shapes instead of the selection stored in the document
	#[arg(short, long = "select", value_name = "ID")]
	select: Vec<String>,

	/// Increase logging verbosity (repeatable)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Only log errors
	#[arg(short, long, conflicts_with = "verbose")]
	quiet: bool,
}

impl Args {
	fn log_level(&self) -> LevelFilter {
		if self.quiet {
			return LevelFilter::Error;
		}
		match self.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	}

	fn options(&self) -> ProjectionOptions {
		ProjectionOptions {
			conversion: self.conversion.clone(),
			reverse: self.reverse,
			orthoangle: self.orthoangle,
		}
	}
}

/// What a run leaves for `main` to report.
#[derive(Debug, PartialEq)]
enum Run {
	/// Nothing was projected and nothing should be written, only this message shown.
	Notice(&'static str),
	/// The transformed document and how many of its selected shapes failed.
	Projected { json: String, failures: usize, shapes: usize },
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_logger(args.log_level())?;

	let json = read_input(&args.input)?;
	match run(&args, &json)? {
		Run::Notice(message) => eprintln!("{message}"),
		Run::Projected { json, failures, shapes } => {
			let output = args.output.as_deref().unwrap_or(args.input.as_path());
			write_output(output, &json)?;

			if failures > 0 {
				bail!("{failures} of {shapes} selected shape(s) could not be projected");
			}
		}
	}
	Ok(())
}

fn run(args: &Args, json: &str) -> Result<Run> {
	let mut document = Document::from_json(json).with_context(|| format!("Failed to parse document {}", args.input.display()))?;
	if !args.select.is_empty() {
		document.select(args.select.iter().cloned());
	}

	let report = project_selection(&args.options(), document.selected_mut())?;
	if let SelectionReport::EmptySelection { message } = report {
		return Ok(Run::Notice(message));
	}

	Ok(Run::Projected {
		json: document.to_json().context("Failed to serialize document")?,
		failures: report.failures().count(),
		shapes: report.outcomes().len(),
	})
}

fn init_logger(level: LevelFilter) -> Result<()> {
	let colors = ColoredLevelConfig::new().debug(Color::Magenta).info(Color::Green).error(Color::Red);

	// Stdout may carry the document, so logs go to stderr
	fern::Dispatch::new()
		.chain(io::stderr())
		.level(level)
		.format(move |out, message, record| {
			out.finish(format_args!(
				"[{}]{} {}",
				// This will color the log level only, not the whole line. Just a touch.
				colors.color(record.level()),
				chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
				message
			))
		})
		.apply()
		.context("Failed to install logger")
}

fn is_stdio(path: &Path) -> bool {
	path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
	if is_stdio(path) {
		let mut json = String::new();
		io::stdin().read_to_string(&mut json).context("Failed to read document from stdin")?;
		return Ok(json);
	}
	fs::read_to_string(path).with_context(|| format!("Failed to read document {}", path.display()))
}

fn write_output(path: &Path, json: &str) -> Result<()> {
	if is_stdio(path) {
		let mut stdout = io::stdout().lock();
		writeln!(stdout, "{json}").context("Failed to write document to stdout")?;
		return Ok(());
	}
	fs::write(path, json).with_context(|| format!("Failed to write document {}", path.display()))
}
