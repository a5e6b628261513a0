use std::{
    fs,
    io::{self, Read, Write},
    ops::ControlFlow,
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, Subcommand};

use chtml::{
    diagnostic::Diagnostic,
    event::{Event, Kind},
    ParseOptions, Visitor,
};

#[derive(Debug, Parser)]
struct Args {
    /// File to parse. Reads stdin if not given.
    path: Option<PathBuf>,

    /// Print diagnostics for abandoned tags to stderr.
    #[arg(long)]
    diagnostics: bool,

    /// Stop at the first NUL byte.
    #[arg(long)]
    nul_terminated: bool,

    /// Allow `<` and `>` inside quoted attribute values.
    #[arg(long)]
    brackets_in_quotes: bool,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Cmd {
    /// Print every event with its offset.
    Dump,
    /// Print opening tag names and their attributes.
    Tags,
    /// Print the number of events of each kind.
    Count,
}

#[derive(Debug, Default)]
struct EventCounters {
    tag_enter: usize,
    tag_exit: usize,
    attribute: usize,
    other: usize,
    diagnostics: usize,
}

struct Printer<W> {
    cmd: Cmd,
    out: W,
    show_diagnostics: bool,
    counters: EventCounters,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    fn write_event(&mut self, event: Event<'_>) -> io::Result<()> {
        match self.cmd {
            Cmd::Dump => {
                writeln!(
                    self.out,
                    "{:>8} {:<9} {:?}",
                    event.offset(),
                    event.kind(),
                    String::from_utf8_lossy(event.as_bytes())
                )?;
            }
            Cmd::Tags => match event.kind() {
                Kind::TagEnter if !event.is_closing_tag() => {
                    if let Some(tag) = event.tag() {
                        self.out.write_all(tag)?;
                        self.out.write_all(b"\n")?;
                    }
                }
                Kind::Attribute => {
                    self.out.write_all(b"\t")?;
                    if let Some(name) = event.attribute_name() {
                        self.out.write_all(name)?;
                    }
                    if let Some(value) = event.attribute_value() {
                        self.out.write_all(b" = ")?;
                        self.out.write_all(value)?;
                    }
                    self.out.write_all(b"\n")?;
                }
                Kind::TagEnter | Kind::TagExit | Kind::Other => {}
            },
            Cmd::Count => match event.kind() {
                Kind::TagEnter => self.counters.tag_enter += 1,
                Kind::TagExit => self.counters.tag_exit += 1,
                Kind::Attribute => self.counters.attribute += 1,
                Kind::Other => self.counters.other += 1,
            },
        }

        Ok(())
    }
}

impl<'a, W: Write> Visitor<'a> for Printer<W> {
    fn event(&mut self, event: Event<'a>) -> ControlFlow<()> {
        match self.write_event(event) {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => {
                self.error = Some(error);
                ControlFlow::Break(())
            }
        }
    }

    fn malformed(&mut self, diagnostic: Diagnostic) -> ControlFlow<()> {
        self.counters.diagnostics += 1;
        if self.show_diagnostics {
            eprintln!("warning: {diagnostic}");
        }
        ControlFlow::Continue(())
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("could not read `{}`", path.display()))
        }
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("could not read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let input = read_input(args.path.as_ref())?;

    let opts = ParseOptions::new()
        .nul_terminated(args.nul_terminated)
        .brackets_in_quoted_values(args.brackets_in_quotes);

    let cmd = args.cmd.unwrap_or(Cmd::Dump);
    let mut printer = Printer {
        cmd,
        out: io::BufWriter::new(io::stdout().lock()),
        show_diagnostics: args.diagnostics,
        counters: EventCounters::default(),
        error: None,
    };

    let outcome = chtml::Parser::from_slice(&input)
        .with_options(opts)
        .parse(&mut printer);

    if let Some(error) = printer.error.take() {
        return Err(error).context("could not write output");
    }
    anyhow::ensure!(outcome.is_finished(), "parse stopped early: {outcome:?}");

    if let Cmd::Count = cmd {
        let c = &printer.counters;
        writeln!(printer.out, "Tag Enter: {}", c.tag_enter)?;
        writeln!(printer.out, "Tag Exit: {}", c.tag_exit)?;
        writeln!(printer.out, "Attribute: {}", c.attribute)?;
        writeln!(printer.out, "Other: {}", c.other)?;
        writeln!(printer.out, "Diagnostics: {}", c.diagnostics)?;
    }

    printer.out.flush()?;

    Ok(())
}
