use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;

use log::{debug, info};

use crate::encoder::{EncodeStats, Encoder};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::{CodeTable, LeafCode, TreeBuilder};

pub const SUCCESS_STATUS: &str = "Encoding Successful";
pub const FAILURE_STATUS: &str = "Something went wrong, refer to error message above";
pub const INCOMPLETE_NOTE: &str = "Your input file contained some characters the encoding file did not so these characters were not included in the output encoding";

/// Code listing and size statistics of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub leaves: Vec<LeafCode>,
    pub stats: EncodeStats,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leaf in &self.leaves {
            writeln!(f, "{leaf}")?;
        }
        writeln!(f, "Input File Size: {} bits", self.stats.input_bits)?;
        writeln!(f, "Output File Size: {} bits", self.stats.output_bits)?;
        write!(f, "Savings: {} bits", self.stats.savings())
    }
}

/// Result of a run that reached the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every input character was encoded.
    Success(Report),
    /// Some input characters had no code and were left out of the output.
    Incomplete(Report),
}

impl Outcome {
    pub fn report(&self) -> &Report {
        match self {
            Outcome::Success(report) | Outcome::Incomplete(report) => report,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Human-readable status lines.
    pub fn status(&self) -> String {
        match self {
            Outcome::Success(_) => SUCCESS_STATUS.to_string(),
            Outcome::Incomplete(_) => format!("{INCOMPLETE_NOTE}\n{SUCCESS_STATUS}"),
        }
    }
}

/// Builds a code from `reference` and writes the encoding of `input` to
/// `output` as `'0'`/`'1'` text.
///
/// `output` must not exist or be empty. The reference is read in full and
/// the input is opened before `output` is created; the input itself is
/// streamed once the output is open.
pub fn encode_files(
    input: impl AsRef<Path>,
    reference: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<Outcome> {
    let (input, reference, output) = (input.as_ref(), reference.as_ref(), output.as_ref());

    let codes = build_codes(reference)?;
    info!("built {} codes from {}", codes.len(), reference.display());

    let source = open_input(input)?;

    ensure_empty_target(output)?;
    let sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .map_err(|e| Error::io(output, e))?;

    let stats = Encoder::new(&codes).encode(source, sink)?;
    debug!(
        "wrote {} bits to {} ({} input bits)",
        stats.output_bits,
        output.display(),
        stats.input_bits
    );

    let report = Report {
        leaves: codes.into_leaves(),
        stats,
    };
    Ok(if report.stats.is_complete() {
        Outcome::Success(report)
    } else {
        Outcome::Incomplete(report)
    })
}

/// Scans `reference` and derives its code table.
pub fn build_codes(reference: impl AsRef<Path>) -> Result<CodeTable> {
    let reference = reference.as_ref();
    let frequencies = FrequencyTable::from_reader(open_input(reference)?)?;
    debug!(
        "{} distinct characters, {} total in {}",
        frequencies.len(),
        frequencies.total(),
        reference.display()
    );

    let root = TreeBuilder::new(frequencies.into_leaves()).build()?;
    Ok(CodeTable::from_tree(&root))
}

/// Opens a file for reading, rejecting directories up front.
fn open_input(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let meta = file.metadata().map_err(|e| Error::io(path, e))?;
    if meta.is_dir() {
        return Err(Error::io(
            path,
            io::Error::new(ErrorKind::IsADirectory, "expected a file"),
        ));
    }

    Ok(file)
}

fn ensure_empty_target(output: &Path) -> Result<()> {
    match fs::metadata(output) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => {
            Err(Error::OutputNotEmpty(output.to_path_buf()))
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(output, e)),
    }
}
