//! Destinations for solutions as the search discovers them

use crate::board::Solution;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom, Write};

/// Default number of buffered bytes before a flush to scratch storage
pub const DEFAULT_BUFFER_CAPACITY: usize = 65536;

/// Receives solutions in discovery order.
///
/// Implementations must keep every record and preserve the order of calls to
/// [`SolutionSink::record`].
pub trait SolutionSink {
    /// Formatted records handed back by [`SolutionSink::finalize`]
    type Records: Read;

    /// Append one placement (1-indexed columns, top row first)
    fn record(&mut self, columns: &[u32]) -> io::Result<()>;

    /// Number of records accepted so far
    fn recorded(&self) -> u64;

    /// Finish writing and return the total with a reader over every record
    fn finalize(self) -> io::Result<Finalized<Self::Records>>
    where
        Self: Sized;
}

/// Output of a finished sink
#[derive(Debug)]
pub struct Finalized<R> {
    pub total: u64,
    pub records: R,
}

/// Append `columns` as one record line: space-separated, newline-terminated
pub fn write_record(buffer: &mut Vec<u8>, columns: &[u32]) {
    for (i, &column) in columns.iter().enumerate() {
        if i > 0 {
            buffer.push(b' ');
        }
        push_number(buffer, column);
    }
    buffer.push(b'\n');
}

#[inline]
fn push_number(buffer: &mut Vec<u8>, mut value: u32) {
    let mut digits = [0u8; 10];
    let mut len = 0;
    loop {
        digits[len] = b'0' + (value % 10) as u8;
        len += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    buffer.extend(digits[..len].iter().rev());
}

/// Buffers formatted records in memory and flushes them to an anonymous
/// scratch file whenever the buffer reaches its capacity
pub struct BufferedFileSink {
    scratch: File,
    buffer: Vec<u8>,
    capacity: usize,
    recorded: u64,
    flushes: u64,
}

impl BufferedFileSink {
    /// Create a sink backed by a fresh temporary file
    pub fn new(capacity: usize) -> io::Result<Self> {
        Ok(Self::with_scratch(tempfile::tempfile()?, capacity))
    }

    /// Create a sink writing to an existing empty file
    pub fn with_scratch(scratch: File, capacity: usize) -> Self {
        Self {
            scratch,
            buffer: Vec::with_capacity(capacity),
            capacity,
            recorded: 0,
            flushes: 0,
        }
    }

    /// Number of times the buffer has been written out
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    fn flush_buffer(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.scratch.write_all(&self.buffer)?;
            self.buffer.clear();
            self.flushes += 1;
        }
        Ok(())
    }
}

impl SolutionSink for BufferedFileSink {
    type Records = BufReader<File>;

    fn record(&mut self, columns: &[u32]) -> io::Result<()> {
        write_record(&mut self.buffer, columns);
        self.recorded += 1;
        if self.buffer.len() >= self.capacity {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn recorded(&self) -> u64 {
        self.recorded
    }

    fn finalize(mut self) -> io::Result<Finalized<Self::Records>> {
        self.flush_buffer()?;
        self.scratch.flush()?;
        self.scratch.seek(SeekFrom::Start(0))?;
        Ok(Finalized {
            total: self.recorded,
            records: BufReader::new(self.scratch),
        })
    }
}

/// Keeps every solution in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    solutions: Vec<Solution>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}

impl SolutionSink for MemorySink {
    type Records = Cursor<Vec<u8>>;

    fn record(&mut self, columns: &[u32]) -> io::Result<()> {
        self.solutions.push(Solution::new(columns.to_vec()));
        Ok(())
    }

    fn recorded(&self) -> u64 {
        self.solutions.len() as u64
    }

    fn finalize(self) -> io::Result<Finalized<Self::Records>> {
        let mut bytes = Vec::new();
        for solution in &self.solutions {
            write_record(&mut bytes, solution.columns());
        }
        Ok(Finalized {
            total: self.solutions.len() as u64,
            records: Cursor::new(bytes),
        })
    }
}

/// Counts solutions and discards them
#[derive(Debug, Default)]
pub struct CountingSink {
    recorded: u64,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SolutionSink for CountingSink {
    type Records = io::Empty;

    fn record(&mut self, _columns: &[u32]) -> io::Result<()> {
        self.recorded += 1;
        Ok(())
    }

    fn recorded(&self) -> u64 {
        self.recorded
    }

    fn finalize(self) -> io::Result<Finalized<Self::Records>> {
        Ok(Finalized {
            total: self.recorded,
            records: io::empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all<R: Read>(mut records: R) -> String {
        let mut content = String::new();
        records.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_write_record() {
        let mut buffer = Vec::new();
        write_record(&mut buffer, &[2, 4, 1, 3]);
        write_record(&mut buffer, &[10, 1, 120]);
        assert_eq!(buffer, b"2 4 1 3\n10 1 120\n");
    }

    #[test]
    fn test_buffered_sink_preserves_order_across_flushes() {
        let mut sink = BufferedFileSink::new(64).unwrap();
        let mut expected = String::new();
        for i in 1..=50u32 {
            sink.record(&[i, i + 1, i + 2]).unwrap();
            expected.push_str(&format!("{} {} {}\n", i, i + 1, i + 2));
        }

        assert!(sink.flushes() > 1);
        assert_eq!(sink.recorded(), 50);

        let finalized = sink.finalize().unwrap();
        assert_eq!(finalized.total, 50);
        assert_eq!(read_all(finalized.records), expected);
    }

    #[test]
    fn test_buffered_sink_empty() {
        let sink = BufferedFileSink::new(DEFAULT_BUFFER_CAPACITY).unwrap();
        let finalized = sink.finalize().unwrap();
        assert_eq!(finalized.total, 0);
        assert_eq!(read_all(finalized.records), "");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.record(&[2, 4, 1, 3]).unwrap();
        sink.record(&[3, 1, 4, 2]).unwrap();
        assert_eq!(sink.solutions()[1], Solution::new(vec![3, 1, 4, 2]));

        let finalized = sink.finalize().unwrap();
        assert_eq!(finalized.total, 2);
        assert_eq!(read_all(finalized.records), "2 4 1 3\n3 1 4 2\n");
    }

    #[test]
    fn test_counting_sink() {
        let mut sink = CountingSink::new();
        for _ in 0..7 {
            sink.record(&[1]).unwrap();
        }
        let finalized = sink.finalize().unwrap();
        assert_eq!(finalized.total, 7);
        assert_eq!(read_all(finalized.records), "");
    }
}
