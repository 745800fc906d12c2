use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Line prefix marking a sequence header.
const HEADER_MARKER: char = '>';

/// Reads residue content from a FASTA-style reader.
///
/// Header lines (starting with `>`) are dropped; every other line is
/// concatenated with all whitespace stripped, and the result is uppercased.
/// Emptiness is not an error at this layer; the loader decides what an empty
/// result means for the file it names.
pub fn read_residues(reader: &mut impl BufRead) -> io::Result<String> {
    let mut residues = String::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim_start().starts_with(HEADER_MARKER) {
            continue;
        }
        residues.extend(line.chars().filter(|c| !c.is_whitespace()));
    }
    Ok(residues.to_uppercase())
}

pub fn read_residues_path<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_residues(&mut reader)
}
