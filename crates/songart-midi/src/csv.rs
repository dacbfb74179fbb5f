//! Notes table: one note per line as `instrument,start_tick,pitch,duration_ticks`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use songart_core::NoteEvent;

use crate::error::MidiError;

/// Header line of the notes table.
pub const HEADER: &str = "instrument,start_tick,pitch,duration_ticks";

const FIELD_COUNT: usize = 4;

/// Write notes as a table with a header row.
pub fn write_notes_csv<W: Write>(notes: &[NoteEvent], mut writer: W) -> Result<(), MidiError> {
    writeln!(writer, "{}", HEADER)?;
    for note in notes {
        writeln!(
            writer,
            "{},{},{},{}",
            note.instrument(),
            note.start_tick(),
            note.pitch(),
            note.duration_ticks()
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write notes to a table file.
pub fn write_notes_csv_to_path(notes: &[NoteEvent], path: &Path) -> Result<(), MidiError> {
    let file = File::create(path)?;
    write_notes_csv(notes, BufWriter::new(file))
}

/// Read a notes table.
///
/// The first non-blank line must be the header. Blank lines are skipped.
/// Line numbers in errors are 1-based.
pub fn read_notes_csv<R: BufRead>(reader: R) -> Result<Vec<NoteEvent>, MidiError> {
    let mut notes = Vec::new();
    let mut seen_header = false;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !seen_header {
            if line != HEADER {
                return Err(MidiError::csv(
                    line_no,
                    format!("expected header '{}', got '{}'", HEADER, line),
                ));
            }
            seen_header = true;
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(MidiError::csv(
                line_no,
                format!("expected {} fields, got {}", FIELD_COUNT, fields.len()),
            ));
        }

        let instrument = parse_field(line_no, "instrument", fields[0])?;
        let start_tick = parse_field(line_no, "start_tick", fields[1])?;
        let pitch = parse_field(line_no, "pitch", fields[2])?;
        let duration = parse_field(line_no, "duration_ticks", fields[3])?;
        let pitch = i32::try_from(pitch)
            .map_err(|_| MidiError::csv(line_no, format!("pitch out of range: {}", pitch)))?;

        notes.push(NoteEvent::new(instrument, start_tick, pitch, duration)?);
    }

    if !seen_header {
        return Err(MidiError::csv(1, "missing header"));
    }

    Ok(notes)
}

/// Read a notes table file.
pub fn read_notes_csv_from_path(path: &Path) -> Result<Vec<NoteEvent>, MidiError> {
    let file = File::open(path)?;
    read_notes_csv(BufReader::new(file))
}

fn parse_field(line: usize, name: &str, value: &str) -> Result<i64, MidiError> {
    value
        .parse::<i64>()
        .map_err(|_| MidiError::csv(line, format!("{} is not an integer: '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use songart_core::ArtError;

    fn note(instrument: i64, start: i64, pitch: i32, duration: i64) -> NoteEvent {
        NoteEvent::new(instrument, start, pitch, duration).unwrap()
    }

    #[test]
    fn test_write_format() {
        let mut out = Vec::new();
        write_notes_csv(&[note(0, 0, 60, 2), note(1, 5, 72, 3)], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "instrument,start_tick,pitch,duration_ticks\n0,0,60,2\n1,5,72,3\n"
        );
    }

    #[test]
    fn test_written_table_reads_back() {
        let notes = vec![note(0, 0, 60, 2), note(3, 17, 45, 0), note(1, 5, 72, 3)];
        let mut out = Vec::new();
        write_notes_csv(&notes, &mut out).unwrap();
        assert_eq!(read_notes_csv(out.as_slice()).unwrap(), notes);
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let input = "\n instrument,start_tick,pitch,duration_ticks \n\n2, 4 ,61,1\n\n";
        assert_eq!(read_notes_csv(input.as_bytes()).unwrap(), vec![note(2, 4, 61, 1)]);
    }

    #[test]
    fn test_header_required() {
        let err = read_notes_csv("0,0,60,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MidiError::Csv { line: 1, .. }));

        let err = read_notes_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, MidiError::Csv { line: 1, ref message } if message == "missing header"));
    }

    #[test]
    fn test_bad_rows_report_line() {
        let input = format!("{}\n0,0,60,1\n0,0,sixty,1\n", HEADER);
        let err = read_notes_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, MidiError::Csv { line: 3, ref message } if message.contains("pitch")));

        let input = format!("{}\n0,0,60\n", HEADER);
        let err = read_notes_csv(input.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "notes table line 2: expected 4 fields, got 3");
    }

    #[test]
    fn test_negative_duration_is_invalid_input() {
        let input = format!("{}\n0,0,60,-2\n", HEADER);
        let err = read_notes_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, MidiError::Note(ArtError::InvalidInput(_))));
    }

    #[test]
    fn test_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        let notes = vec![note(0, 1, 50, 4)];
        write_notes_csv_to_path(&notes, &path).unwrap();
        assert_eq!(read_notes_csv_from_path(&path).unwrap(), notes);
    }
}
