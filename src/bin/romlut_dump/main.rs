use anyhow::{Context, Result, bail};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use dialoguer::Confirm;
use encoding::all::encodings;
use encoding::types::EncodingRef;
use indoc::indoc;
use log::{Level, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use romlut::{BlobLayout, DumpSettings, TableSummary, dump_blob, read_blob};

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::exit;

mod table;

/// A blob that was loaded and has an output file waiting for its report.
struct BlobJob {
    layout: BlobLayout,
    input: PathBuf,
    output_path: PathBuf,
    data: Vec<u8>,
    output: BufWriter<File>,
}

impl BlobJob {
    fn run(mut self, settings: &DumpSettings) -> (String, Result<Vec<TableSummary>>) {
        let res = dump_blob(&self.data, &self.layout, settings, &mut self.output).with_context(
            || {
                format!(
                    "failed to dump `{}` into `{}`",
                    self.input.display(),
                    self.output_path.display()
                )
            },
        );
        (self.layout.name.to_owned(), res)
    }
}

struct RomLutDump {
    settings: DumpSettings,
    blobs: Vec<(BlobLayout, PathBuf)>,
    output_dir: PathBuf,
    confirm_overwrite: bool,
}

impl RomLutDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let only: Vec<&String> = matches
            .get_many::<String>("only")
            .map(|values| values.collect())
            .unwrap_or_default();

        let layouts = if only.is_empty() {
            BlobLayout::builtin()
        } else {
            let mut layouts: Vec<BlobLayout> = vec![];
            for name in only {
                let layout = BlobLayout::by_name(name)
                    .with_context(|| format!("unknown blob `{}`", name))?;
                if !layouts.iter().any(|l| l.name == layout.name) {
                    layouts.push(layout);
                }
            }
            layouts
        };

        let blobs = layouts
            .into_iter()
            .map(|layout| {
                let input = matches
                    .get_one::<PathBuf>(layout.name)
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(layout.default_input));
                (layout, input)
            })
            .collect();

        let output_dir = matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("Dumped"));

        Ok(RomLutDump {
            settings: settings_from_matches(matches)?,
            blobs,
            output_dir,
            confirm_overwrite: !matches.get_flag("no-confirm-overwrite"),
        })
    }

    /// Main entry point for `RomLutDump`
    pub fn run(self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create output directory `{}`",
                self.output_dir.display()
            )
        })?;

        let mut failures = vec![];
        let mut jobs = vec![];

        // Inputs are loaded and outputs created (and confirmed) before any dump starts.
        for (layout, input) in &self.blobs {
            println!("Dumping {} constants..", input.display());
            match self.prepare(layout, input) {
                Ok(job) => jobs.push(job),
                Err(e) => failures.push((layout.name.to_owned(), e)),
            }
        }

        for (name, res) in run_jobs(jobs, &self.settings)? {
            if let Err(e) = res {
                failures.push((name, e));
            }
        }

        if failures.is_empty() {
            println!("Done!");
            return Ok(());
        }

        for (name, e) in &failures {
            eprintln!("{}: {:?}", name, e);
        }
        bail!("{} of {} blobs failed", failures.len(), self.blobs.len())
    }

    fn prepare(&self, layout: &BlobLayout, input: &Path) -> Result<BlobJob> {
        let data = read_blob(input)?;
        let output_path = self.output_dir.join(layout.report_name);
        let output = create_output_file(&output_path, self.confirm_overwrite)?;

        Ok(BlobJob {
            layout: layout.clone(),
            input: input.to_path_buf(),
            output_path,
            data,
            output: BufWriter::new(output),
        })
    }
}

#[cfg(feature = "multithreading")]
fn run_jobs(
    jobs: Vec<BlobJob>,
    settings: &DumpSettings,
) -> Result<Vec<(String, Result<Vec<TableSummary>>)>> {
    use rayon::prelude::*;

    if settings.get_num_threads() == 1 {
        return Ok(jobs.into_iter().map(|job| job.run(settings)).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.get_num_threads())
        .build()
        .context("failed to build thread pool")?;

    Ok(pool.install(|| jobs.into_par_iter().map(|job| job.run(settings)).collect()))
}

#[cfg(not(feature = "multithreading"))]
fn run_jobs(
    jobs: Vec<BlobJob>,
    settings: &DumpSettings,
) -> Result<Vec<(String, Result<Vec<TableSummary>>)>> {
    Ok(jobs.into_iter().map(|job| job.run(settings)).collect())
}

fn settings_from_matches(matches: &ArgMatches) -> Result<DumpSettings> {
    // `table` has no `--threads`.
    let num_threads = matches
        .try_get_one::<usize>("num-threads")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(1);
    let num_threads = match (cfg!(feature = "multithreading"), num_threads) {
        (true, number) => number,
        (false, 1) => 1,
        (false, _) => {
            eprintln!(
                "turned on threads, but binary was compiled without `multithreading` feature! processing blobs sequentially"
            );
            1
        }
    };

    let codec_name = matches
        .get_one::<String>("ansi-codec")
        .map(String::as_str)
        .unwrap_or("iso-8859-1");
    let ansi_codec: EncodingRef = *encodings()
        .iter()
        .find(|c| c.name() == codec_name)
        .with_context(|| format!("unknown codec `{}`", codec_name))?;

    Ok(DumpSettings::new()
        .num_threads(num_threads)
        .ansi_codec(ansi_codec))
}

/// If `prompt` is passed, will display a confirmation prompt before overwriting files.
pub(crate) fn create_output_file(path: impl AsRef<Path>, prompt: bool) -> Result<File> {
    let p = path.as_ref();

    if p.is_dir() {
        bail!(
            "There is a directory at {}, refusing to overwrite",
            p.display()
        );
    }

    if p.exists() {
        if prompt {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Are you sure you want to override output file at {}",
                    p.display()
                ))
                .default(false)
                .interact()
                .context("Failed to write confirmation prompt to term")?;
            if !confirmed {
                bail!("Cancelled");
            }
        }
        warn!("overwriting {}", p.display());
    } else if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    File::create(p).with_context(|| format!("failed to create output file `{}`", p.display()))
}

fn try_to_initialize_logging(matches: &ArgMatches) {
    let verbosity_level = match matches.get_count("verbose") {
        0 => None,
        1 => Some(Level::Info),
        2 => Some(Level::Debug),
        3 => Some(Level::Trace),
        _ => {
            eprintln!("using more than -vvv does not affect verbosity level");
            Some(Level::Trace)
        }
    };

    if let Some(level) = verbosity_level {
        if let Err(e) = TermLogger::init(
            level.to_level_filter(),
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ) {
            eprintln!("Failed to initialize logging: {}", e);
        }
    }
}

fn codec_names() -> Vec<&'static str> {
    encodings()
        .iter()
        .filter(|&e| e.raw_decoder().is_ascii_compatible())
        .map(|e| e.name())
        .collect()
}

fn cli() -> Command {
    Command::new("romlut_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dumps the lookup tables of arm9.bin and overlay_0011.bin")
        .long_about(indoc!(r#"
            Dumps the lookup tables of arm9.bin and overlay_0011.bin.

            Each blob gets a text report in the output directory with one line per
            table entry, its string pointer resolved, and value statistics per field.
        "#))
        .subcommand(table::command())
        .arg(
            Arg::new("arm9")
                .long("arm9")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .default_value("arm9.bin")
                .help("Path to arm9.bin."),
        )
        .arg(
            Arg::new("overlay_0011")
                .long("overlay")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .default_value("overlay_0011.bin")
                .help("Path to overlay_0011.bin."),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value("Dumped")
                .help("Directory to write the reports into. Created if missing."),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .action(ArgAction::Append)
                .value_parser(["arm9", "overlay_0011"])
                .help("Only dump the given blob. Can be passed multiple times."),
        )
        .arg(
            Arg::new("num-threads")
                .long("threads")
                .short('t')
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Sets the number of worker threads, defaults to number of CPU cores."),
        )
        .arg(
            Arg::new("ansi-codec")
                .long("ansi-codec")
                .global(true)
                .value_parser(PossibleValuesParser::new(codec_names()))
                .default_value("iso-8859-1")
                .help("Controls the codec used to decode strings in the blob."),
        )
        .arg(
            Arg::new("no-confirm-overwrite")
                .long("no-confirm-overwrite")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("When set, will not ask for confirmation before overwriting files, useful for automation"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace."),
        )
}

fn main() {
    let matches = cli().get_matches();
    try_to_initialize_logging(&matches);

    let res = match matches.subcommand() {
        Some(("table", sub_matches)) => table::run(sub_matches),
        _ => RomLutDump::from_cli_matches(&matches).and_then(RomLutDump::run),
    };

    if let Err(e) = res {
        eprintln!("{:?}", e);
        exit(1);
    }
}
