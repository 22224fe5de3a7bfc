use std::io::{stdin, stdout, Write};

use crate::error::{Error, Result};

/// Index of the first port whose name contains `substr`. An empty substring matches nothing.
pub fn match_port(names: &[String], substr: &str) -> Option<usize> {
    if substr.is_empty() {
        return None;
    }
    names.iter().position(|name| name.contains(substr))
}

/// Select a MIDI output port. Prefers a port whose name contains
/// `output_port_name_substr`, then the only port, then asks on stdin.
pub fn choose_output_port(midi_out: &midir::MidiOutput, output_port_name_substr: &str) -> Result<usize> {
    let ports = midi_out.ports();
    if ports.is_empty() {
        return Err(Error::Port("no output port found".to_string()));
    }
    let names: Vec<String> = ports
        .iter()
        .map(|p| midi_out.port_name(p).unwrap_or_else(|_| "<unknown>".to_string()))
        .collect();

    if let Some(i) = match_port(&names, output_port_name_substr) {
        println!("Choosing output port matching '{}': {}", output_port_name_substr, names[i]);
        return Ok(i);
    }

    // Fallbacks: single port or interactive selection
    if names.len() == 1 {
        println!("Choosing the only available output port: {}", names[0]);
        return Ok(0);
    }

    println!("\nAvailable output ports:");
    for (i, name) in names.iter().enumerate() {
        println!("{}: {}", i, name);
    }

    print!("Please select output port: ");
    stdout().flush().map_err(|e| Error::io("<stdout>", e))?;
    let mut choice = String::new();
    stdin()
        .read_line(&mut choice)
        .map_err(|e| Error::io("<stdin>", e))?;
    match choice.trim().parse::<usize>() {
        Ok(idx) if idx < names.len() => Ok(idx),
        _ => Err(Error::InvalidPortSelection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_first_containing_port() {
        let names = vec![
            "Midi Through Port-0".to_string(),
            "IAC Driver Bus 1".to_string(),
            "IAC Driver Bus 2".to_string(),
        ];
        assert_eq!(match_port(&names, "IAC"), Some(1));
        assert_eq!(match_port(&names, "Bus 2"), Some(2));
        assert_eq!(match_port(&names, "Loopback"), None);
        assert_eq!(match_port(&names, ""), None);
    }
}
