use std::io::stdin;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use midi_note_editor::config::{Config, DEFAULT_CONFIG_FILE};
use midi_note_editor::general::command::Command;
use midi_note_editor::general::status::{print_note_list, print_success};
use midi_note_editor::general::stdin_handler::{handle_command, run_console};
use midi_note_editor::Session;

/// Transpose every note of a MIDI file by an interval given as two note names.
///
/// Without an interval the editor opens an interactive console.
#[derive(Parser, Debug)]
#[command(name = "midi-note-editor", version, about)]
struct Cli {
    /// MIDI file to load
    input: Option<PathBuf>,

    /// Note to transpose from (e.g. C3)
    #[arg(long, requires = "to", requires = "input")]
    from: Option<String>,

    /// Note to transpose to (e.g. E3)
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Transpose by a raw number of semitones instead of from/to
    #[arg(long, allow_hyphen_values = true, conflicts_with = "from", requires = "input")]
    semitones: Option<i32>,

    /// Where to save (default: <name>_transposed.mid beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the notes found in the input and exit
    #[arg(long, requires = "input")]
    list: bool,

    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    match run() {
        Ok(_) => (),
        Err(err) => println!("Error: {:#}", err),
    }
}

fn init_logging(debug: bool) {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .parse_default_env()
        .init();
    // Runtime 'debug on/off' moves the global cap unless RUST_LOG is in charge
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_logging(cli.debug || config.debug);

    let mut session = Session::new(config);

    let Some(input) = cli.input.as_ref() else {
        return Ok(run_console(&mut session, stdin().lock())?);
    };

    let batch = cli.list || cli.from.is_some() || cli.semitones.is_some();
    if !batch {
        handle_command(&mut session, Command::Load(input.display().to_string()));
        return Ok(run_console(&mut session, stdin().lock())?);
    }

    session
        .load(input)
        .with_context(|| format!("loading {}", input.display()))?;

    if cli.list {
        print_note_list("Notes in file:", &session.available_notes(), 12);
        if cli.from.is_none() && cli.semitones.is_none() {
            return Ok(());
        }
    }

    let applied = match (&cli.from, &cli.to, cli.semitones) {
        (Some(from), Some(to), None) => {
            session.select_from(from)?;
            session.select_to(to)?;
            session.apply()?
        }
        (None, None, Some(semitones)) => session.shift(semitones)?,
        _ => bail!("give either --from and --to, or --semitones"),
    };
    log::info!(
        "shifted {} events by {:+} semitones",
        applied.events,
        applied.semitones
    );

    let saved = session.save(cli.output.as_deref())?;
    print_success(&format!("MIDI file saved to: {}", saved.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_semitones_parse() {
        let cli = Cli::try_parse_from(["midi-note-editor", "song.mid", "--semitones", "-5"]).unwrap();
        assert_eq!(cli.semitones, Some(-5));
    }

    #[test]
    fn from_requires_to() {
        assert!(Cli::try_parse_from(["midi-note-editor", "song.mid", "--from", "C3"]).is_err());
    }
}
