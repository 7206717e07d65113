use std::collections::BTreeSet;
use std::io::{BufWriter, Read, Write};

use log::warn;

use crate::error::Result;
use crate::frequency::for_each_char;
use crate::huffman::CodeTable;

/// Size accounting for one encoding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// 8 bits per input character.
    pub input_bits: u64,
    /// Total length of the emitted codes.
    pub output_bits: u64,
    /// Input characters that had no code, by occurrence.
    pub missing_count: u64,
    /// Distinct input characters that had no code.
    pub missing_chars: BTreeSet<char>,
}

impl EncodeStats {
    /// Bits saved; negative when the output is larger than the input.
    pub fn savings(&self) -> i128 {
        i128::from(self.input_bits) - i128::from(self.output_bits)
    }

    /// True when every input character had a code.
    pub fn is_complete(&self) -> bool {
        self.missing_count == 0
    }
}

/// Writes the code of every input character as `'0'`/`'1'` text.
#[derive(Debug)]
pub struct Encoder<'a> {
    codes: &'a CodeTable,
}

impl<'a> Encoder<'a> {
    pub fn new(codes: &'a CodeTable) -> Self {
        Self { codes }
    }

    /// Decodes `input` line by line and writes each code as soon as its
    /// character is read. Invalid UTF-8 is read as U+FFFD.
    pub fn encode<R: Read, W: Write>(&self, input: R, output: W) -> Result<EncodeStats> {
        let mut out = BufWriter::new(output);
        let mut stats = EncodeStats::default();

        for_each_char(input, |symbol| {
            if let Some(code) = self.lookup(symbol, &mut stats) {
                out.write_all(code.as_bytes())?;
            }
            Ok(())
        })?;
        out.flush()?;

        if !stats.is_complete() {
            warn!(
                "{} input characters ({} distinct) have no code: {:?}",
                stats.missing_count,
                stats.missing_chars.len(),
                stats.missing_chars
            );
        }

        Ok(stats)
    }

    pub fn encode_str(&self, input: &str) -> (String, EncodeStats) {
        let mut encoded = String::new();
        let mut stats = EncodeStats::default();

        for symbol in input.chars() {
            if let Some(code) = self.lookup(symbol, &mut stats) {
                encoded += code;
            }
        }

        (encoded, stats)
    }

    fn lookup(&self, symbol: char, stats: &mut EncodeStats) -> Option<&'a str> {
        stats.input_bits += 8;
        let code = self.codes.get(symbol);
        match code {
            Some(code) => stats.output_bits += code.len() as u64,
            None => {
                stats.missing_count += 1;
                stats.missing_chars.insert(symbol);
            }
        }
        code
    }
}
