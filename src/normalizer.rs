use crate::line_ending::LineEnding;
use serde::Serialize;
use std::io::{self, ErrorKind, Read, Write};
use std::ops::AddAssign;
use tracing::debug;

/// Read buffer size used when streaming a file through the normalizer
pub const CHUNK_SIZE: usize = 8192;

/// Line endings seen in one input, by kind
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EolStats {
    /// `\n` not preceded by `\r`
    pub unix: u64,
    /// `\r` not followed by `\n`
    pub mac: u64,
    /// `\r\n` pairs
    pub dos: u64,
}

impl EolStats {
    pub fn total(&self) -> u64 {
        self.unix + self.mac + self.dos
    }
}

impl AddAssign for EolStats {
    fn add_assign(&mut self, other: Self) {
        self.unix += other.unix;
        self.mac += other.mac;
        self.dos += other.dos;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between tokens
    Scanning,
    /// Last byte was `\r`; the next byte decides Mac vs DOS
    SawCr,
    /// Input exhausted, pending `\r` flushed
    Done,
}

/// Push-style line-ending normalizer.
///
/// Feed input with [`Normalizer::push`] in chunks of any size and call
/// [`Normalizer::finish`] at end of input. The pending `\r` lookahead is carried in the
/// state, so a `\r\n` split across two chunks is still one DOS terminator. Output is
/// optional: with `None` only the statistics are gathered.
#[derive(Debug)]
pub struct Normalizer {
    terminator: &'static [u8],
    state: ScanState,
    stats: EolStats,
}

impl Normalizer {
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            terminator: line_ending.as_bytes(),
            state: ScanState::Scanning,
            stats: EolStats::default(),
        }
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> EolStats {
        self.stats
    }

    /// Process one chunk of input
    pub fn push(&mut self, chunk: &[u8], mut out: Option<&mut (dyn Write + '_)>) -> io::Result<()> {
        debug_assert!(self.state != ScanState::Done, "push after finish");

        let mut rest = chunk;
        while !rest.is_empty() {
            if self.state == ScanState::SawCr {
                if rest[0] == b'\n' {
                    self.stats.dos += 1;
                    rest = &rest[1..];
                } else {
                    // Lone `\r`; the current byte starts the next token
                    self.stats.mac += 1;
                }
                self.state = ScanState::Scanning;
                self.emit_terminator(out.as_deref_mut())?;
                continue;
            }

            match rest.iter().position(|&b| b == b'\r' || b == b'\n') {
                None => {
                    write_to(out.as_deref_mut(), rest)?;
                    rest = &[];
                }
                Some(pos) => {
                    write_to(out.as_deref_mut(), &rest[..pos])?;
                    if rest[pos] == b'\r' {
                        self.state = ScanState::SawCr;
                    } else {
                        self.stats.unix += 1;
                        self.emit_terminator(out.as_deref_mut())?;
                    }
                    rest = &rest[pos + 1..];
                }
            }
        }
        Ok(())
    }

    /// Signal end of input and return the final statistics.
    /// A trailing lone `\r` counts as one Mac terminator.
    pub fn finish(mut self, out: Option<&mut (dyn Write + '_)>) -> io::Result<EolStats> {
        if self.state == ScanState::SawCr {
            self.stats.mac += 1;
            self.emit_terminator(out)?;
        }
        self.state = ScanState::Done;
        Ok(self.stats)
    }

    fn emit_terminator(&self, out: Option<&mut (dyn Write + '_)>) -> io::Result<()> {
        write_to(out, self.terminator)
    }
}

fn write_to(out: Option<&mut (dyn Write + '_)>, bytes: &[u8]) -> io::Result<()> {
    match out {
        Some(writer) if !bytes.is_empty() => writer.write_all(bytes),
        _ => Ok(()),
    }
}

/// Stream `input` through the normalizer, writing to `output` when attached.
///
/// Returns the line-ending statistics of the input. Any read or write failure aborts
/// with that error; whatever was already written to `output` is left as is.
pub fn normalize<R: Read>(
    mut input: R,
    mut output: Option<&mut (dyn Write + '_)>,
    line_ending: LineEnding,
) -> io::Result<EolStats> {
    let mut normalizer = Normalizer::new(line_ending);
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut bytes_read = 0u64;

    loop {
        let n = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        bytes_read += n as u64;
        normalizer.push(&buffer[..n], output.as_deref_mut())?;
    }

    let stats = normalizer.finish(output)?;
    debug!(
        bytes_read,
        unix = stats.unix,
        mac = stats.mac,
        dos = stats.dos,
        "Normalized input"
    );
    Ok(stats)
}

/// Normalize an in-memory buffer
pub fn normalize_bytes(input: &[u8], line_ending: LineEnding) -> (Vec<u8>, EolStats) {
    let mut output = Vec::with_capacity(input.len());
    let mut normalizer = Normalizer::new(line_ending);
    // Writes into a Vec cannot fail
    let stats = normalizer
        .push(input, Some(&mut output))
        .and_then(|()| normalizer.finish(Some(&mut output)))
        .unwrap_or_default();
    (output, stats)
}
