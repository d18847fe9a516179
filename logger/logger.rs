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

//! `logger` is a minimal, embeddable logging facility for code that cannot
//! assume a standard output stream or a heap allocator: drivers, firmware,
//! and small libraries.  The embedder supplies the transport as a [`Sink`];
//! the facility decides per call-site, with two bitmask tests and no lock
//! traffic, whether a message is emitted at all, and serializes emission
//! through a spin lock so multi-part messages are never interleaved.
//!
//! A handle is one independently configurable sink plus its filters.  It can
//! live in a `static`:
//!
//! ```
//! use logger::{LogHandle, ModuleMask, PriorityMask, Sink};
//!
//! struct Uart;
//!
//! impl Sink for Uart {
//!     fn write(&mut self, args: core::fmt::Arguments<'_>) -> logger::Result<()> {
//!         // Push the rendered fragment at the hardware here.
//!         # let _ = args;
//!         Ok(())
//!     }
//! }
//!
//! static LOG: LogHandle<Uart> = LogHandle::with_sink(
//!     Uart,
//!     ModuleMask::ALL,
//!     PriorityMask::ERROR.union(PriorityMask::WARN),
//! );
//!
//! logger::log_warn!(LOG, ModuleMask::CORE, "charge pump at {} mV", 4100);
//! logger::log_info!(LOG, ModuleMask::CORE, "filtered out, never reaches the sink");
//! ```
//!
//! Messages carry a priority bit and a module bit; a handle emits a message
//! only if both intersect its filters.  Embedders extend both vocabularies
//! with their own bits above the reserved ones (see [`PriorityMask`] and
//! [`ModuleMask`]).
//!
//! Building with `--no-default-features` removes the `logging` feature and
//! with it every macro call site, filter checks included, for builds that
//! must not pay any logging overhead.
//!
//! The handle's lock busy-waits and is not reentrant: a sink that logs back
//! into its own handle deadlocks.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]

mod handle;
mod mask;
mod sink;

pub use handle::{Error, LogHandle, Result, Sink};
pub use mask::{ModuleMask, PriorityMask};
#[cfg(feature = "std")]
pub use sink::StdoutSink;
pub use sink::WriteSink;

/// Emits an undecorated message if (`module`, `priority`) passes the
/// handle's filters.
///
/// Unlike the leveled macros, nothing is prepended or appended: the sink
/// receives exactly one fragment.  The result of the write is discarded.
///
/// ```
/// use logger::{LogHandle, ModuleMask, PriorityMask};
/// # struct Null;
/// # impl logger::Sink for Null {
/// #     fn write(&mut self, _: core::fmt::Arguments<'_>) -> logger::Result<()> { Ok(()) }
/// # }
/// let log = LogHandle::with_sink(Null, ModuleMask::ALL, PriorityMask::ALL);
/// logger::log!(log, ModuleMask::CORE, PriorityMask::DEBUG, "raw page map: {:#x}", 0x8000u32);
/// ```
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log {
  ($handle:expr, $module:expr, $priority:expr, $($arg:tt)+) => {{
    let handle = &$handle;
    if handle.enabled($module, $priority) {
        let _ = handle.write(::core::format_args!($($arg)+));
    }
  }};
}

/// Stripped no-op: built without the `logging` feature.
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log {
  ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
#[doc(hidden)]
#[macro_export]
macro_rules! __log_leveled {
  ($handle:expr, $module:expr, $priority:expr, $tag:expr, $($arg:tt)+) => {{
    (&$handle).write_leveled(
        $module,
        $priority,
        $tag,
        ::core::file!(),
        ::core::line!(),
        ::core::format_args!($($arg)+),
    )
  }};
}

/// Emits an error-priority message with a `"(<file>:<line>) [ERROR] "`
/// prefix and a line terminator.
///
/// ```
/// use logger::{LogHandle, ModuleMask, PriorityMask};
/// # struct Null;
/// # impl logger::Sink for Null {
/// #     fn write(&mut self, _: core::fmt::Arguments<'_>) -> logger::Result<()> { Ok(()) }
/// # }
/// let log = LogHandle::with_sink(Null, ModuleMask::ALL, PriorityMask::ALL);
/// logger::log_error!(log, ModuleMask::CORE, "page walk failed: {:#x}", 0xdead_0000u32);
/// ```
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
  ($handle:expr, $module:expr, $($arg:tt)+) => {
    $crate::__log_leveled!($handle, $module, $crate::PriorityMask::ERROR, "ERROR", $($arg)+)
  };
}

/// Stripped no-op: built without the `logging` feature.
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
  ($($arg:tt)*) => {};
}

/// Emits a warn-priority message with a `"(<file>:<line>) [WARN] "` prefix
/// and a line terminator.
///
/// ```
/// use logger::{LogHandle, ModuleMask, PriorityMask};
/// # struct Null;
/// # impl logger::Sink for Null {
/// #     fn write(&mut self, _: core::fmt::Arguments<'_>) -> logger::Result<()> { Ok(()) }
/// # }
/// let log = LogHandle::with_sink(Null, ModuleMask::ALL, PriorityMask::ALL);
/// logger::log_warn!(log, ModuleMask::CORE, "retrying transfer, attempt {}", 2);
/// ```
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
  ($handle:expr, $module:expr, $($arg:tt)+) => {
    $crate::__log_leveled!($handle, $module, $crate::PriorityMask::WARN, "WARN", $($arg)+)
  };
}

/// Stripped no-op: built without the `logging` feature.
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
  ($($arg:tt)*) => {};
}

/// Emits an info-priority message with a `"(<file>:<line>) [INFO] "` prefix
/// and a line terminator.
///
/// ```
/// use logger::{LogHandle, ModuleMask, PriorityMask};
/// # struct Null;
/// # impl logger::Sink for Null {
/// #     fn write(&mut self, _: core::fmt::Arguments<'_>) -> logger::Result<()> { Ok(()) }
/// # }
/// let log = LogHandle::with_sink(Null, ModuleMask::ALL, PriorityMask::ALL);
/// logger::log_info!(log, ModuleMask::CORE, "link up at {} Mbit/s", 100);
/// ```
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
  ($handle:expr, $module:expr, $($arg:tt)+) => {
    $crate::__log_leveled!($handle, $module, $crate::PriorityMask::INFO, "INFO", $($arg)+)
  };
}

/// Stripped no-op: built without the `logging` feature.
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
  ($($arg:tt)*) => {};
}

/// Emits a debug-priority message with a `"(<file>:<line>) [DEBUG] "`
/// prefix and a line terminator.  See [`log_error!`] for an example.
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
  ($handle:expr, $module:expr, $($arg:tt)+) => {
    $crate::__log_leveled!($handle, $module, $crate::PriorityMask::DEBUG, "DEBUG", $($arg)+)
  };
}

/// Stripped no-op: built without the `logging` feature.
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
  ($($arg:tt)*) => {};
}

/// Emits a trace-priority message with a `"(<file>:<line>) [TRACE] "`
/// prefix and a line terminator.  See [`log_error!`] for an example.
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_trace {
  ($handle:expr, $module:expr, $($arg:tt)+) => {
    $crate::__log_leveled!($handle, $module, $crate::PriorityMask::TRACE, "TRACE", $($arg)+)
  };
}

/// Stripped no-op: built without the `logging` feature.
#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_trace {
  ($($arg:tt)*) => {};
}

#[cfg(all(test, feature = "logging"))]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::{LogHandle, ModuleMask, PriorityMask, Sink};

    struct CaptureSink(Rc<RefCell<Vec<String>>>);

    impl CaptureSink {
        fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
            let fragments = Rc::new(RefCell::new(Vec::new()));
            (Self(fragments.clone()), fragments)
        }
    }

    impl Sink for CaptureSink {
        fn write(&mut self, args: core::fmt::Arguments<'_>) -> crate::Result<()> {
            self.0.borrow_mut().push(args.to_string());
            Ok(())
        }
    }

    #[test]
    fn log_macro_is_filtered_but_undecorated() {
        let (sink, fragments) = CaptureSink::new();
        let log = LogHandle::with_sink(sink, ModuleMask::CORE, PriorityMask::DEBUG);

        log!(log, ModuleMask::CORE, PriorityMask::TRACE, "rejected");
        assert!(fragments.borrow().is_empty());

        log!(log, ModuleMask::CORE, PriorityMask::DEBUG, "pte[{}]", 4);
        assert_eq!(*fragments.borrow(), ["pte[4]"]);
    }

    #[test]
    fn leveled_macro_prefixes_location_and_tag() {
        let (sink, fragments) = CaptureSink::new();
        let log = LogHandle::with_sink(sink, ModuleMask::ALL, PriorityMask::ALL);

        log_warn!(log, ModuleMask::CORE, "attempt {}", 2);

        let fragments = fragments.borrow();
        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].starts_with('('));
        assert!(fragments[0].contains("logger.rs:"));
        assert!(fragments[0].ends_with(") [WARN] "));
        assert_eq!(fragments[1], "attempt 2");
        assert_eq!(fragments[2], "\r\n");
    }

    #[test]
    fn each_leveled_macro_carries_its_own_priority_bit() {
        let (sink, fragments) = CaptureSink::new();
        let log = LogHandle::with_sink(sink, ModuleMask::ALL, PriorityMask::DEBUG);

        log_error!(log, ModuleMask::CORE, "no");
        log_warn!(log, ModuleMask::CORE, "no");
        log_info!(log, ModuleMask::CORE, "no");
        log_trace!(log, ModuleMask::CORE, "no");
        assert!(fragments.borrow().is_empty());

        log_debug!(log, ModuleMask::CORE, "yes");
        let fragments = fragments.borrow();
        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].contains("[DEBUG]"));
    }

    #[test]
    fn macro_arguments_are_evaluated_once() {
        let (sink, fragments) = CaptureSink::new();
        let log = LogHandle::with_sink(sink, ModuleMask::ALL, PriorityMask::ALL);
        let counter = core::cell::Cell::new(0);

        log_info!(log, ModuleMask::CORE, "n={}", {
            counter.set(counter.get() + 1);
            counter.get()
        });

        assert_eq!(counter.get(), 1);
        assert_eq!(fragments.borrow()[1], "n=1");
    }
}

#[cfg(all(test, not(feature = "logging")))]
mod strip_tests {
    use crate::{LogHandle, ModuleMask, PriorityMask, Result, Sink};

    struct PanicSink;

    impl Sink for PanicSink {
        fn write(&mut self, _: core::fmt::Arguments<'_>) -> Result<()> {
            panic!("sink invoked in a stripped build");
        }
    }

    #[test]
    fn stripped_macros_expand_to_nothing() {
        let _log = LogHandle::with_sink(PanicSink, ModuleMask::ALL, PriorityMask::ALL);
        let evaluated = core::cell::Cell::new(false);

        log!(_log, ModuleMask::CORE, PriorityMask::ERROR, "{}", {
            evaluated.set(true);
            1
        });
        log_error!(_log, ModuleMask::CORE, "gone");
        log_warn!(_log, ModuleMask::CORE, "gone");
        log_info!(_log, ModuleMask::CORE, "gone");
        log_debug!(_log, ModuleMask::CORE, "gone");
        log_trace!(_log, ModuleMask::CORE, "gone");

        assert!(!evaluated.get());
    }
}
