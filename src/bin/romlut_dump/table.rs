use anyhow::{Context, Result, bail};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches, Command, value_parser};
use indoc::indoc;

use romlut::{EntryKind, TableLayout, dump_table_kind, read_blob};

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

pub fn command() -> Command {
    Command::new("table")
        .about("Dump a single table from any blob")
        .long_about(indoc!(r#"
            Dump a single table from any blob.

            Useful to look at a table that is not one of the built-in ones. The
            start offset and load address take either decimal or `0x`-prefixed hex.
        "#))
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Blob to read the table from."),
        )
        .arg(
            Arg::new("kind")
                .long("kind")
                .short('k')
                .required(true)
                .value_parser(PossibleValuesParser::new(EntryKind::ALL.map(EntryKind::name)))
                .help("Record layout of the table."),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .required(true)
                .value_parser(parse_number)
                .help("File offset of the first entry."),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .required(true)
                .value_parser(parse_number)
                .help("Number of entries."),
        )
        .arg(
            Arg::new("load-address")
                .long("load-address")
                .required(true)
                .value_parser(parse_address)
                .help("Address the blob is loaded at, subtracted from string pointers."),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .default_value("Table")
                .help("Title written in the banner."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('f')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Writes the report to the file specified instead of stdout."),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let settings = crate::settings_from_matches(matches)?;

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing `--input`")?;
    let kind: EntryKind = matches
        .get_one::<String>("kind")
        .context("missing `--kind`")?
        .parse()
        .map_err(anyhow::Error::msg)?;
    let offset = *matches.get_one::<usize>("offset").context("missing `--offset`")?;
    let count = *matches.get_one::<usize>("count").context("missing `--count`")?;
    let load_address = *matches
        .get_one::<u32>("load-address")
        .context("missing `--load-address`")?;
    let title = matches
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_else(|| "Table".to_owned());

    let data = read_blob(input)?;
    let table = TableLayout::new(title, kind, offset, count);
    check_fits(&table, data.len())
        .with_context(|| format!("table does not fit in `{}`", input.display()))?;

    let mut output: Box<dyn Write> = match matches.get_one::<PathBuf>("output") {
        Some(path) => Box::new(BufWriter::new(crate::create_output_file(
            path,
            !matches.get_flag("no-confirm-overwrite"),
        )?)),
        None => Box::new(io::stdout().lock()),
    };

    dump_table_kind(&data, &table, load_address, &settings, &mut output)
        .with_context(|| format!("failed to dump table from `{}`", input.display()))?;
    output.flush()?;

    Ok(())
}

/// Rejects a table running past the end of the blob before anything is written.
fn check_fits(table: &TableLayout, blob_len: usize) -> Result<()> {
    match table.end_offset() {
        Some(end) if end <= blob_len => Ok(()),
        Some(end) => bail!(
            "{} `{}` entries at 0x{:X} end at 0x{:X}, blob is 0x{:X} bytes",
            table.entry_count,
            table.kind,
            table.start_offset,
            end,
            blob_len
        ),
        None => bail!("{} entries overflow the address space", table.entry_count),
    }
}

pub(crate) fn parse_number(value: &str) -> std::result::Result<usize, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => value.parse::<usize>(),
    };
    parsed.map_err(|e| format!("`{}` is not a valid number: {}", value, e))
}

fn parse_address(value: &str) -> std::result::Result<u32, String> {
    let n = parse_number(value)?;
    u32::try_from(n).map_err(|_| format!("`{}` does not fit in 32 bits", value))
}
