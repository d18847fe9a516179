// Copyright 2025 The Pigweed Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

//! Sinks provided out of the box.  Most embedders implement [`Sink`] on
//! their own transport instead.

use core::fmt;

use crate::handle::{Error, Result, Sink};

/// Renders messages into any [`embedded_io::Write`] byte writer.
///
/// Fragments are formatted directly into the writer, with no intermediate
/// buffer.  A writer error surfaces as [`Error::Unavailable`].
pub struct WriteSink<W: embedded_io::Write> {
    writer: W,
}

impl<W: embedded_io::Write> WriteSink<W> {
    /// Wraps `writer` in a sink.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: embedded_io::Write> Sink for WriteSink<W> {
    fn write(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        let mut adapter = FmtAdapter {
            writer: &mut self.writer,
        };
        fmt::write(&mut adapter, args).map_err(|_| Error::Unavailable)
    }
}

// Bridges `core::fmt` output onto an `embedded_io` writer.
struct FmtAdapter<'a, W: embedded_io::Write> {
    writer: &'a mut W,
}

impl<W: embedded_io::Write> fmt::Write for FmtAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Host-side sink writing to standard output.
#[cfg(feature = "std")]
pub struct StdoutSink;

#[cfg(feature = "std")]
impl Sink for StdoutSink {
    fn write(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        use std::io::Write as _;

        std::io::stdout()
            .write_fmt(args)
            .map_err(|_| Error::Unavailable)
    }
}
