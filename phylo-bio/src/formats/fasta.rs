use crate::sequence::Sequence;
use flate2::read::GzDecoder;
use memmap2::Mmap;
use nom::{
    bytes::complete::take_till,
    character::complete::{char, space0},
    combinator::opt,
    sequence::{preceded, terminated},
    IResult,
};
use phylo_core::{LoaderConfig, PhyloError, PhyloResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// One raw line, without its terminating newline
fn line(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(take_till(|c: u8| c == b'\n'), opt(char('\n')))(input)
}

/// `>` followed by the identifier; the remaining input is the description
fn header(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(
        char('>'),
        preceded(space0, take_till(|c: u8| c.is_ascii_whitespace())),
    )(input)
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|c| !c.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|c| !c.is_ascii_whitespace())
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

fn parse_error(line_no: usize, message: impl std::fmt::Display) -> PhyloError {
    PhyloError::Parse(format!("FASTA line {}: {}", line_no, message))
}

/// Parse FASTA from bytes with the default loader settings
pub fn parse_fasta_from_bytes(data: &[u8]) -> PhyloResult<Vec<Sequence>> {
    parse_fasta_from_bytes_with(data, &LoaderConfig::default())
}

/// Parse FASTA from bytes.
///
/// Records are returned in file order. Sequence lines are concatenated with
/// all whitespace removed and blank lines are skipped. Anything other than
/// blank lines before the first header is an error, as is a header without
/// an identifier.
pub fn parse_fasta_from_bytes_with(
    data: &[u8],
    options: &LoaderConfig,
) -> PhyloResult<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut current: Option<Sequence> = None;
    let mut input = data;
    let mut line_no = 0;

    let finish = |seq: Sequence, sequences: &mut Vec<Sequence>| {
        if seq.is_empty() && !options.keep_empty {
            debug!("Skipping empty record {}", seq.id);
        } else {
            sequences.push(seq);
        }
    };

    while !input.is_empty() {
        let (rest, raw) = line(input).map_err(|e| parse_error(line_no + 1, e))?;
        input = rest;
        line_no += 1;

        let text = trim(raw);
        if text.is_empty() {
            continue;
        }

        if text[0] == b'>' {
            let (description, id) = header(text).map_err(|e| parse_error(line_no, e))?;
            if id.is_empty() {
                return Err(parse_error(line_no, "header has no identifier"));
            }
            let id = std::str::from_utf8(id)
                .map_err(|_| parse_error(line_no, "identifier is not valid UTF-8"))?;

            let mut seq = Sequence::new(id.to_string(), Vec::new());
            let description = trim(description);
            if !description.is_empty() {
                seq = seq.with_description(String::from_utf8_lossy(description).into_owned());
            }

            if let Some(done) = current.replace(seq) {
                finish(done, &mut sequences);
            }
        } else {
            let Some(seq) = current.as_mut() else {
                return Err(parse_error(line_no, "sequence data before the first '>' header"));
            };
            let residues = text.iter().filter(|c| !c.is_ascii_whitespace());
            if options.uppercase {
                seq.sequence.extend(residues.map(u8::to_ascii_uppercase));
            } else {
                seq.sequence.extend(residues);
            }
        }
    }

    if let Some(done) = current {
        finish(done, &mut sequences);
    }

    Ok(sequences)
}

/// Parse a FASTA file into sequences (supports .gz compression)
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> PhyloResult<Vec<Sequence>> {
    parse_fasta_with(path, &LoaderConfig::default())
}

/// Parse a FASTA file with explicit loader settings
pub fn parse_fasta_with<P: AsRef<Path>>(
    path: P,
    options: &LoaderConfig,
) -> PhyloResult<Vec<Sequence>> {
    let path = path.as_ref();

    let sequences = if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        parse_fasta_gzip(path, options)?
    } else {
        parse_fasta_uncompressed(path, options)?
    };

    debug!("Loaded {} sequences from {}", sequences.len(), path.display());
    Ok(sequences)
}

fn parse_fasta_uncompressed(path: &Path, options: &LoaderConfig) -> PhyloResult<Vec<Sequence>> {
    let file = File::open(path)?;
    // Zero-length files cannot be mapped on every platform
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before this function returns;
    // the file is not modified by this process while mapped.
    let mmap = unsafe { Mmap::map(&file)? };
    parse_fasta_from_bytes_with(&mmap[..], options)
}

fn parse_fasta_gzip(path: &Path, options: &LoaderConfig) -> PhyloResult<Vec<Sequence>> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer)?;

    parse_fasta_from_bytes_with(&buffer, options)
}
