//! Streaming event rewriter
//!
//! This module provides the primary interface of the library. The
//! [`EventRewriter`] consumes an event-record file line by line, buffers one
//! event at a time, and writes it back out with the generator weight
//! replaced by the first weight of the event's weights block.
//!
//! Lines outside any event record are copied through unchanged.

use crate::config::RewriterConfig;
use crate::markup::{extract_weight, rewrite_header, LineKind};
use crate::types::{FormatError, Replacement, Result, RewriteError, RewriteStats};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Index of the event header line within a record (0 is the start marker)
const HEADER_LINE: usize = 1;

/// One buffered event record
#[derive(Debug, Default)]
struct EventRecord {
    lines: Vec<String>,
    weight: Option<String>,
}

/// Position of the cursor in the nested markup
#[derive(Debug)]
enum State {
    /// Preamble, epilogue or between records
    Outside,
    /// Inside an event record, outside its weights block
    InEvent(EventRecord),
    /// Inside the weights block of an event record
    InEventInWeights(EventRecord),
}

/// Line-at-a-time rewriter state machine
///
/// A rewriter that returned an error must not be fed further lines; the run
/// is over and its output is invalid.
#[derive(Debug)]
pub struct EventRewriter {
    config: RewriterConfig,
    state: State,
    events_seen: u64,
    stats: RewriteStats,
}

impl EventRewriter {
    /// Create a rewriter for the given markers
    pub fn new(config: RewriterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: State::Outside,
            events_seen: 0,
            stats: RewriteStats::default(),
        })
    }

    /// Number of event start markers seen so far
    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }

    /// Counters for everything written so far
    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    /// Process a single input line, including its terminator
    ///
    /// Writes to `out` only when the line lies outside an event record or
    /// completes one. Returns the substitution made when a record was
    /// finalized.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Option<Replacement>> {
        let kind = LineKind::classify(line, &self.config);

        if kind == LineKind::EventStart {
            if !matches!(self.state, State::Outside) {
                log::warn!(
                    "Event {}: {} before {}, discarding unfinished record",
                    self.events_seen,
                    self.config.event_start,
                    self.config.event_end
                );
            }
            self.events_seen += 1;
            self.state = State::InEvent(EventRecord::default());
            log::debug!("Event {}: record opened", self.events_seen);
        }

        let event = self.events_seen;
        match std::mem::replace(&mut self.state, State::Outside) {
            State::Outside => {
                out.write_all(line.as_bytes())?;
                self.stats.passthrough_lines += 1;
                Ok(None)
            }
            State::InEvent(mut record) => {
                record.lines.push(line.to_string());
                match kind {
                    LineKind::EventEnd => self.finalize(record, out).map(Some),
                    LineKind::WeightsStart => {
                        self.state = State::InEventInWeights(record);
                        Ok(None)
                    }
                    _ => {
                        self.state = State::InEvent(record);
                        Ok(None)
                    }
                }
            }
            State::InEventInWeights(mut record) => match kind {
                LineKind::EventEnd => Err(FormatError::UnclosedWeights { event }.into()),
                LineKind::WeightsEnd => {
                    record.lines.push(line.to_string());
                    self.state = State::InEvent(record);
                    Ok(None)
                }
                LineKind::Content if record.weight.is_none() => {
                    record.weight = extract_weight(line, &self.config, event)?;
                    if let Some(weight) = &record.weight {
                        log::trace!("Event {}: captured weight {}", event, weight);
                    }
                    record.lines.push(line.to_string());
                    self.state = State::InEventInWeights(record);
                    Ok(None)
                }
                _ => {
                    record.lines.push(line.to_string());
                    self.state = State::InEventInWeights(record);
                    Ok(None)
                }
            },
        }
    }

    /// Check that the input did not stop in the middle of a record
    pub fn finish(self) -> Result<RewriteStats> {
        match self.state {
            State::Outside => Ok(self.stats),
            State::InEvent(_) | State::InEventInWeights(_) => {
                Err(FormatError::UnterminatedEvent {
                    event: self.events_seen,
                }
                .into())
            }
        }
    }

    /// Splice the captured weight into the header and write the record
    fn finalize<W: Write>(&mut self, mut record: EventRecord, out: &mut W) -> Result<Replacement> {
        let event = self.events_seen;
        let weight = record.weight.take().ok_or(FormatError::NoWeight { event })?;

        let (header, old_value) = rewrite_header(
            &record.lines[HEADER_LINE],
            &weight,
            self.config.header_field,
            event,
        )?;
        record.lines[HEADER_LINE] = header;

        for line in &record.lines {
            out.write_all(line.as_bytes())?;
        }
        self.stats.events += 1;
        self.stats.event_lines += record.lines.len() as u64;

        let replacement = Replacement {
            event,
            old_value,
            new_value: weight,
        };
        log::trace!("{}", replacement);
        Ok(replacement)
    }
}

impl Default for EventRewriter {
    fn default() -> Self {
        Self {
            config: RewriterConfig::default(),
            state: State::Outside,
            events_seen: 0,
            stats: RewriteStats::default(),
        }
    }
}

/// Rewrite a whole event-record stream
///
/// Reads `input` to the end, writing the rewritten stream to `output`.
/// `on_replacement` is called once per finalized event, in order. The first
/// error aborts the run; whatever was written to `output` by then must be
/// discarded.
///
/// # Example
/// ```
/// use lhe_rewriter::{rewrite_stream, RewriterConfig};
///
/// let input = "<event>\n 1 2 3.5 4\n<weights>\n1.23\n</weights>\n</event>\n";
/// let mut output = Vec::new();
/// let stats = rewrite_stream(input.as_bytes(), &mut output, RewriterConfig::new(), |_| {}).unwrap();
///
/// assert_eq!(stats.events, 1);
/// assert!(String::from_utf8(output).unwrap().contains("1 2 1.23 4\n"));
/// ```
pub fn rewrite_stream<R, W, F>(
    mut input: R,
    mut output: W,
    config: RewriterConfig,
    mut on_replacement: F,
) -> Result<RewriteStats>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Replacement),
{
    let mut rewriter = EventRewriter::new(config)?;
    let mut line = String::new();

    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if let Some(replacement) = rewriter.process_line(&line, &mut output)? {
            on_replacement(&replacement);
        }
    }

    let stats = rewriter.finish()?;
    output.flush()?;
    Ok(stats)
}

/// Rewrite an event-record file into a new file
///
/// Both files are open only for the duration of the call. If the run fails,
/// the partially written output file is removed.
pub fn rewrite_file<F>(
    input: &Path,
    output: &Path,
    config: RewriterConfig,
    on_replacement: F,
) -> Result<RewriteStats>
where
    F: FnMut(&Replacement),
{
    if same_file(input, output) {
        return Err(RewriteError::OutputPath(format!(
            "output {:?} would overwrite input {:?}",
            output, input
        )));
    }

    log::info!("Reading events from {:?}", input);
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    log::info!("Writing events to {:?}", output);

    let result = rewrite_stream(reader, writer, config, on_replacement);

    match &result {
        Ok(stats) => log::info!(
            "Rewrote {} events ({} lines written)",
            stats.events,
            stats.total_lines()
        ),
        Err(_) => match fs::remove_file(output) {
            Ok(()) => log::info!("Removed partial output {:?}", output),
            Err(e) => log::warn!("Could not remove partial output {:?}: {}", output, e),
        },
    }

    result
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
