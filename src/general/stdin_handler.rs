use std::io::{BufRead, Write};
use std::path::Path;

use crate::general::status::{print_error, print_note_list, print_quick_help, print_success};
use crate::general::command::{parse_command, Command, HELP};
use crate::general::forwarder::audition;
use crate::general::notes::{full_note_range, note_name_to_number};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read commands from `input` until exit or end of input.
pub fn run_console<R: BufRead>(session: &mut Session, mut input: R) -> std::io::Result<()> {
    print_quick_help();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if handle_command(session, parse_command(&line)) == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Execute one command against the session and report the outcome.
pub fn handle_command(session: &mut Session, command: Command) -> Flow {
    match command {
        Command::Exit => return Flow::Exit,
        Command::Help => println!("{}", HELP),
        Command::Load(path) => match session.load(&path) {
            Ok(doc) => {
                let tpb = doc
                    .ticks_per_beat()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "timecode".to_string());
                print_success(&format!(
                    "MIDI file loaded: {}\nTicks per beat: {}",
                    doc.path().display(),
                    tpb
                ));
                print_note_list("Notes in file:", &session.available_notes(), 12);
            }
            Err(e) => print_error(&e.to_string()),
        },
        Command::Info => print_info(session),
        Command::Notes => {
            for usage in session.summary().iter() {
                println!(
                    "  {:<5} key {:>3}  velocity {:>3}  events {}",
                    usage.name,
                    usage.key,
                    usage.velocity,
                    usage.count()
                );
            }
            if session.summary().is_empty() {
                println!("  (no notes)");
            }
        }
        Command::Range => print_note_list("Transposition targets:", &full_note_range(), 12),
        Command::From(note) => match session.select_from(&note) {
            Ok(name) => println!("Transpose from: {}", name),
            Err(e) => print_error(&e.to_string()),
        },
        Command::To(note) => match session.select_to(&note) {
            Ok(name) => println!("Transpose to: {}", name),
            Err(e) => print_error(&e.to_string()),
        },
        Command::Apply => match session.apply() {
            Ok(applied) => print_success(&format!(
                "Transposition applied: {:+} semitones on {} events (total {:+})",
                applied.semitones, applied.events, applied.total_offset
            )),
            Err(e) => print_error(&format!("transposition failed: {}", e)),
        },
        Command::Shift(semitones) => match session.shift(semitones) {
            Ok(applied) => print_success(&format!(
                "Shifted {:+} semitones on {} events (total {:+})",
                applied.semitones, applied.events, applied.total_offset
            )),
            Err(e) => print_error(&format!("transposition failed: {}", e)),
        },
        Command::Audition(note) => {
            let keys: Vec<u8> = match note {
                Some(name) => match note_name_to_number(&name) {
                    Ok(key) => vec![key],
                    Err(e) => {
                        print_error(&e.to_string());
                        return Flow::Continue;
                    }
                },
                None => session.summary().iter().map(|u| u.key).collect(),
            };
            let semitones = session.pending_interval().unwrap_or(0);
            if let Err(e) = audition(&keys, semitones, &session.config().audition) {
                print_error(&e.to_string());
            }
        }
        Command::Save(path) => match session.save(path.as_deref().map(Path::new)) {
            Ok(saved) => print_success(&format!("MIDI file saved to: {}", saved.display())),
            Err(e) => print_error(&e.to_string()),
        },
        Command::Debug(on) => {
            log::set_max_level(if on {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            });
            println!("Debug {}", if on { "enabled" } else { "disabled" });
        }
        Command::Unknown(text) => {
            println!("Unrecognized command: '{}'. Type 'help' for available commands.", text)
        }
    }
    Flow::Continue
}

fn print_info(session: &Session) {
    match session.document() {
        Some(doc) => {
            println!("File: {}", doc.path().display());
            println!("Tracks: {}", doc.track_count());
            match doc.ticks_per_beat() {
                Some(tpb) => println!("Ticks per beat: {}", tpb),
                None => println!("Ticks per beat: timecode"),
            }
        }
        None => println!("No MIDI file loaded"),
    }
    if let Some(saved) = session.last_saved() {
        println!("Last saved: {}", saved.display());
    }
    let (from, to) = session.selection();
    println!("From: {}  To: {}", from.unwrap_or("-"), to.unwrap_or("-"));
    if let Some(interval) = session.pending_interval() {
        println!("Pending interval: {:+} semitones", interval);
    }
    println!("Applied so far: {:+} semitones", session.total_offset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::io::midi_file::tests::sample_smf;
    use crate::io::midi_file::MidiDocument;

    #[test]
    fn console_script_transposes_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mid");
        MidiDocument::from_smf(sample_smf(), &source).save(&source).unwrap();

        let script = format!("load {}\nfrom C3\nto A2\napply\nsave\nexit\n", source.display());
        let mut session = Session::new(Config::default());
        run_console(&mut session, script.as_bytes()).unwrap();

        let saved = MidiDocument::load(dir.path().join("song_transposed.mid")).unwrap();
        let names = saved.note_summary().names();
        assert_eq!(names, vec!["A0", "A2", "C#3"]);
    }

    #[test]
    fn debug_toggle_moves_log_level() {
        let mut session = Session::new(Config::default());
        assert_eq!(handle_command(&mut session, Command::Debug(true)), Flow::Continue);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert_eq!(handle_command(&mut session, Command::Debug(false)), Flow::Continue);
        assert_eq!(log::max_level(), log::LevelFilter::Info);
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let mut session = Session::new(Config::default());
        assert_eq!(handle_command(&mut session, Command::Apply), Flow::Continue);
        assert_eq!(handle_command(&mut session, Command::From("nope".into())), Flow::Continue);
        assert_eq!(handle_command(&mut session, Command::Save(None)), Flow::Continue);
        assert_eq!(handle_command(&mut session, Command::Exit), Flow::Exit);
    }
}
