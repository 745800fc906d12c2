use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Reads a freeform small-molecule description.
///
/// The whole content is treated as a single string; every whitespace
/// character, internal newlines included, is stripped. Emptiness is decided by
/// the caller.
pub fn read_freeform(reader: &mut impl Read) -> io::Result<String> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content.chars().filter(|c| !c.is_whitespace()).collect())
}

pub fn read_freeform_path<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_freeform(&mut reader)
}
