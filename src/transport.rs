use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serialport::SerialPort;
use tracing::info;

/// Write-only byte stream the controller frames are handed to.
///
/// The controller calls [`initialize`](ByteSink::initialize) exactly once, at
/// construction, and never reads back.
pub trait ByteSink {
    fn initialize(&mut self, baud_rate: u32) -> io::Result<()>;

    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

/// Opens a serial port in the 8N1, no flow control layout the controller
/// expects. Baud rate is applied again by [`ByteSink::initialize`].
pub fn open_serial(
    port_name: &str,
    baud_rate: u32,
) -> Result<Box<dyn SerialPort>, serialport::Error> {
    let port = serialport::new(port_name, baud_rate)
        .timeout(Duration::from_millis(100))
        .data_bits(serialport::DataBits::Eight)
        .stop_bits(serialport::StopBits::One)
        .parity(serialport::Parity::None)
        .flow_control(serialport::FlowControl::None)
        .open()?;
    info!(port = port_name, baud_rate, "serial port opened");
    Ok(port)
}

impl ByteSink for Box<dyn SerialPort> {
    fn initialize(&mut self, baud_rate: u32) -> io::Result<()> {
        self.set_baud_rate(baud_rate)?;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)?;
        self.flush()
    }
}

/// Lets several controllers on different threads share one port. Each frame
/// is written under the lock, so frames never interleave.
impl<T: ByteSink + ?Sized> ByteSink for Arc<Mutex<T>> {
    fn initialize(&mut self, baud_rate: u32) -> io::Result<()> {
        self.lock().initialize(baud_rate)
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.lock().write_byte(byte)
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.lock().write_frame(bytes)
    }
}

impl ByteSink for Vec<u8> {
    fn initialize(&mut self, _baud_rate: u32) -> io::Result<()> {
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.push(byte);
        Ok(())
    }
}

/// In-memory sink that remembers how it was driven. Used for dry runs and
/// tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub baud_rate: Option<u32>,
    pub initializations: usize,
    pub bytes: Vec<u8>,
    pub writes: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.writes = 0;
    }
}

impl ByteSink for RecordingSink {
    fn initialize(&mut self, baud_rate: u32) -> io::Result<()> {
        self.baud_rate = Some(baud_rate);
        self.initializations += 1;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.bytes.push(byte);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_recording_sink_tracks_writes() {
        let mut sink = RecordingSink::new();
        sink.initialize(9600).unwrap();
        sink.write_frame(&[1, 2, 3]).unwrap();
        assert_eq!(sink.baud_rate, Some(9600));
        assert_eq!(sink.initializations, 1);
        assert_eq!(sink.bytes, vec![1, 2, 3]);
        assert_eq!(sink.writes, 3);

        sink.clear();
        assert!(sink.bytes.is_empty());
        assert_eq!(sink.writes, 0);
        assert_eq!(sink.initializations, 1);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<u8> = Vec::new();
        sink.initialize(40_000).unwrap();
        sink.write_frame(&[0x80, 0x02, 0x10]).unwrap();
        assert_eq!(sink, vec![0x80, 0x02, 0x10]);
    }

    #[test]
    fn test_shared_sink_keeps_frames_whole() {
        let shared = Arc::new(Mutex::new(RecordingSink::new()));
        let handles: Vec<_> = (0..4u8)
            .map(|n| {
                let mut sink = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..50 {
                        sink.write_frame(&[0x80, n, n, n]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let sink = shared.lock();
        assert_eq!(sink.bytes.len(), 4 * 50 * 4);
        for chunk in sink.bytes.chunks(4) {
            assert_eq!(chunk[0], 0x80);
            assert!(chunk[1..].iter().all(|&b| b == chunk[1]));
        }
    }
}
