/// A single console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(String),
    Info,
    Notes,
    Range,
    From(String),
    To(String),
    Apply,
    Shift(i32),
    Audition(Option<String>),
    Save(Option<String>),
    Debug(bool),
    Help,
    Exit,
    Unknown(String),
}

/// Parse one input line. An empty line means exit.
pub fn parse_command(line: &str) -> Command {
    let cmd = line.trim();
    if cmd.is_empty() {
        return Command::Exit;
    }

    let (word, rest) = match cmd.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (cmd, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_ascii_lowercase().as_str() {
        "exit" | "quit" | "q" if arg.is_none() => Command::Exit,
        "help" | "h" if arg.is_none() => Command::Help,
        "info" if arg.is_none() => Command::Info,
        "notes" if arg.is_none() => Command::Notes,
        "range" if arg.is_none() => Command::Range,
        "apply" if arg.is_none() => Command::Apply,
        "load" | "open" => match arg {
            Some(path) => Command::Load(path),
            None => Command::Unknown(cmd.to_string()),
        },
        "from" => match arg {
            Some(note) => Command::From(note),
            None => Command::Unknown(cmd.to_string()),
        },
        "to" => match arg {
            Some(note) => Command::To(note),
            None => Command::Unknown(cmd.to_string()),
        },
        "shift" => match rest.parse::<i32>() {
            Ok(v) => Command::Shift(v),
            Err(_) => Command::Unknown(cmd.to_string()),
        },
        "audition" | "play" => Command::Audition(arg),
        "save" => Command::Save(arg),
        "debug" => match rest.to_ascii_lowercase().as_str() {
            "on" | "enable" => Command::Debug(true),
            "off" | "disable" => Command::Debug(false),
            _ => Command::Unknown(cmd.to_string()),
        },
        _ => match cmd.parse::<i32>() {
            Ok(v) => Command::Shift(v),
            Err(_) => Command::Unknown(cmd.to_string()),
        },
    }
}

pub const HELP: &str = "\
Commands:
  load <path>      - Load a MIDI file
  info             - Show file, selection and offset
  notes            - List notes found in the file
  range            - List every transposition target
  from <note>      - Set the note to transpose from (e.g. C3)
  to <note>        - Set the note to transpose to (e.g. E3)
  apply            - Transpose by the from/to interval
  shift <n> | <n>  - Transpose by n semitones
  audition [note]  - Play the file's notes (or one note) with the pending interval
  save [path]      - Save (default: <name>_transposed.mid)
  debug on/off     - Enable/Disable verbose debug logging
  help/h           - Show this help
  exit/quit/q      - Exit program";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_forms() {
        for line in ["", "   ", "exit", "QUIT", "q"] {
            assert_eq!(parse_command(line), Command::Exit);
        }
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(parse_command("load  my song.mid "), Command::Load("my song.mid".into()));
        assert_eq!(parse_command("from C3"), Command::From("C3".into()));
        assert_eq!(parse_command("To f#4"), Command::To("f#4".into()));
        assert_eq!(parse_command("save"), Command::Save(None));
        assert_eq!(parse_command("save out.mid"), Command::Save(Some("out.mid".into())));
        assert_eq!(parse_command("audition"), Command::Audition(None));
        assert_eq!(parse_command("play A3"), Command::Audition(Some("A3".into())));
    }

    #[test]
    fn numeric_shifts() {
        assert_eq!(parse_command("shift -12"), Command::Shift(-12));
        assert_eq!(parse_command("7"), Command::Shift(7));
        assert_eq!(parse_command("+3"), Command::Shift(3));
    }

    #[test]
    fn debug_toggle() {
        assert_eq!(parse_command("debug on"), Command::Debug(true));
        assert_eq!(parse_command("debug disable"), Command::Debug(false));
        assert_eq!(parse_command("debug maybe"), Command::Unknown("debug maybe".into()));
    }

    #[test]
    fn unknown_input() {
        assert_eq!(parse_command("from"), Command::Unknown("from".into()));
        assert_eq!(parse_command("shift up"), Command::Unknown("shift up".into()));
        assert_eq!(parse_command("apply now"), Command::Unknown("apply now".into()));
        assert_eq!(parse_command("transpose"), Command::Unknown("transpose".into()));
    }
}
