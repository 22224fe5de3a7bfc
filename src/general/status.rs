use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// Colours stay on even when piped (works on Windows CMD via termcolor)
pub const COLOR_CHOICE: ColorChoice = ColorChoice::Always;

/// Write one line in `color`, then reset the terminal colour.
pub fn write_colored<W: WriteColor>(out: &mut W, color: Color, text: &str) -> std::io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))?;
    writeln!(out, "{}", text)?;
    out.reset()
}

fn print_colored(color: Color, text: &str) {
    let mut stdout = StandardStream::stdout(COLOR_CHOICE);
    let _ = write_colored(&mut stdout, color, text);
}

// Print the quick help line in blue
pub fn print_quick_help() {
    print_colored(Color::Blue, "Type 'help' for commands, 'exit' to quit");
}

pub fn print_success(text: &str) {
    print_colored(Color::Green, text);
}

pub fn print_error(text: &str) {
    let mut stderr = StandardStream::stderr(COLOR_CHOICE);
    let _ = write_colored(&mut stderr, Color::Red, &format!("Error: {}", text));
}

/// Print a list of note names, wrapped at `per_line` entries.
pub fn print_note_list(title: &str, names: &[String], per_line: usize) {
    print_colored(Color::Cyan, title);
    if names.is_empty() {
        println!("  (none)");
        return;
    }
    for chunk in names.chunks(per_line.max(1)) {
        println!("  {}", chunk.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    #[test]
    fn colours_are_always_on() {
        assert_eq!(COLOR_CHOICE, ColorChoice::Always);
    }

    #[test]
    fn colored_line_is_wrapped_in_escapes() {
        let mut buf = Buffer::ansi();
        write_colored(&mut buf, Color::Green, "saved").unwrap();
        let text = String::from_utf8(buf.into_inner()).unwrap();

        assert!(text.starts_with("\x1b["));
        assert!(text.contains("saved\n"));
        assert!(text.ends_with("\x1b[0m"));
    }
}
