//! Forwards formatted `tracing` events to the worker console.

use std::io;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use web_sys::console;

/// Buffers one formatted event and logs it on drop.
pub struct ConsoleWriter {
	level: Level,
	buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
	fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
		self.buf.extend_from_slice(bytes);
		Ok(bytes.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Drop for ConsoleWriter {
	fn drop(&mut self) {
		let line = String::from_utf8_lossy(&self.buf);
		let line = line.trim_end();
		if line.is_empty() {
			return;
		}
		match self.level {
			Level::ERROR => console::error_1(&line.into()),
			Level::WARN => console::warn_1(&line.into()),
			Level::INFO => console::info_1(&line.into()),
			_ => console::log_1(&line.into()),
		}
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
	type Writer = ConsoleWriter;

	fn make_writer(&'a self) -> Self::Writer {
		ConsoleWriter {
			level: Level::INFO,
			buf: Vec::new(),
		}
	}

	fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
		ConsoleWriter {
			level: *meta.level(),
			buf: Vec::new(),
		}
	}
}

/// Installs the console subscriber. No timestamps: the console adds its own.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_writer(ConsoleMakeWriter)
		.without_time()
		.with_max_level(Level::DEBUG)
		.try_init();
}
