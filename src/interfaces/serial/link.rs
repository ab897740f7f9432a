use crate::error::Result;
use serialport::{ClearBuffer, DataBits, Parity, SerialPort, StopBits};
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

/// Line-oriented transport to a card reader.
///
/// Implement this trait for each way a reader can be attached.
pub trait CardLink: Send {
    /// Number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Reads one line without its terminator. Returns `None` when the
    /// per-attempt timeout elapses before a full line arrives.
    ///
    /// This call blocks the calling task until a line or the timeout arrives,
    /// so a shutdown requested meanwhile is only seen once it returns.
    fn read_line(&mut self) -> Result<Option<String>>;

    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

/// Where the reader is attached and how the line is driven. Framing is fixed at 8N1.
#[derive(Debug, Clone)]
pub struct SerialSettings {
    pub device: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
}

/// A reader attached to a serial device.
pub struct SerialLink {
    port: BufReader<Box<dyn SerialPort>>,
    /// Bytes of a line whose newline has not arrived yet.
    pending: Vec<u8>,
}

impl SerialLink {
    /// Opens the device and discards anything already sitting in its input buffer.
    pub fn open(settings: &SerialSettings) -> Result<Self> {
        let port = serialport::new(&settings.device, settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(settings.read_timeout)
            .open()?;
        port.clear(ClearBuffer::Input)?;

        Ok(Self {
            port: BufReader::new(port),
            pending: Vec::new(),
        })
    }
}

impl CardLink for SerialLink {
    fn bytes_available(&mut self) -> Result<usize> {
        let buffered = self.port.buffer().len() + self.pending.len();
        let waiting = self.port.get_ref().bytes_to_read()? as usize;
        Ok(buffered + waiting)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        match self.port.read_until(b'\n', &mut self.pending) {
            Ok(0) => Ok(None),
            Ok(_) => {
                let raw = std::mem::take(&mut self.pending);
                let line = String::from_utf8_lossy(&raw);
                Ok(Some(line.trim_end().to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.get_mut();
        port.write_all(data)?;
        port.flush()?;
        Ok(())
    }
}

/// An in-memory reader that plays back a fixed list of lines and records
/// everything written to it.
#[derive(Debug, Default)]
pub struct ScriptedLink {
    lines: VecDeque<String>,
    written: Vec<Vec<u8>>,
}

impl ScriptedLink {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            written: Vec::new(),
        }
    }

    /// Every `write_all` payload, in order.
    pub fn written(&self) -> &[Vec<u8>] {
        &self.written
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl CardLink for ScriptedLink {
    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.lines.front().map_or(0, |line| line.len() + 1))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.written.push(data.to_vec());
        Ok(())
    }
}
