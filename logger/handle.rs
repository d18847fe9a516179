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

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use spinlock::SpinLock;

use crate::mask::{ModuleMask, PriorityMask};

/// Errors reported by log writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Write attempted on a handle with no sink installed.
    FailedPrecondition,
    /// The sink could not deliver the message.
    Unavailable,
}

/// Result type for log operations.
pub type Result<T> = core::result::Result<T, Error>;

/// A message transport supplied by the embedder.
///
/// The core never formats, inspects, or retains the arguments pack; it is
/// relayed to the sink unchanged.  Any state the transport needs (a port
/// address, a file, a buffer) lives inside the implementation.  Calls are
/// serialized by the owning handle's lock, so implementations need no
/// locking of their own, but a sink must never log back into the handle
/// that owns it: the lock is not reentrant and doing so deadlocks.
pub trait Sink {
    /// Emits one message fragment.
    fn write(&mut self, args: fmt::Arguments<'_>) -> Result<()>;
}

/// One independently configurable logging sink.
///
/// The handle holds the sink behind a spin lock, plus a module filter and a
/// priority filter.  The filters are plain atomic words read outside the
/// lock, so a filtered-out message costs two relaxed loads and two bitwise
/// tests.  The lock's critical section bounds exactly one logical message:
/// the single fragment of a raw [`write`](Self::write), or all three
/// fragments of a leveled write.
///
/// Handles are created either fully configured ([`with_sink`](Self::with_sink),
/// `const`, suitable for `static` placement) or empty ([`new`](Self::new))
/// and populated once via [`init`](Self::init) before any write call-sites
/// run.  An empty handle rejects raw writes and silently drops leveled ones
/// without ever invoking a sink.
pub struct LogHandle<S: Sink> {
    sink: SpinLock<Option<S>>,
    module_filter: AtomicU32,
    priority_filter: AtomicU32,
}

impl<S: Sink> LogHandle<S> {
    /// Creates an empty handle: no sink, both filters matching nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sink: SpinLock::new(None),
            module_filter: AtomicU32::new(ModuleMask::empty().bits()),
            priority_filter: AtomicU32::new(PriorityMask::empty().bits()),
        }
    }

    /// Creates a fully configured handle.
    #[must_use]
    pub const fn with_sink(sink: S, modules: ModuleMask, priorities: PriorityMask) -> Self {
        Self {
            sink: SpinLock::new(Some(sink)),
            module_filter: AtomicU32::new(modules.bits()),
            priority_filter: AtomicU32::new(priorities.bits()),
        }
    }

    /// Installs the sink and both filters, replacing any prior configuration.
    ///
    /// Touches nothing but the handle's own fields and never spins on the
    /// lock; the exclusive borrow already guarantees no write is in flight.
    pub fn init(&mut self, sink: S, modules: ModuleMask, priorities: PriorityMask) {
        *self.sink.get_mut() = Some(sink);
        *self.module_filter.get_mut() = modules.bits();
        *self.priority_filter.get_mut() = priorities.bits();
    }

    /// Replaces the module filter.
    ///
    /// Takes effect for subsequent filter checks; a concurrent write that
    /// already passed its check is unaffected.
    pub fn set_module_filter(&self, modules: ModuleMask) {
        self.module_filter.store(modules.bits(), Ordering::Relaxed);
    }

    /// Replaces the priority filter.
    ///
    /// Takes effect for subsequent filter checks; a concurrent write that
    /// already passed its check is unaffected.
    pub fn set_priority_filter(&self, priorities: PriorityMask) {
        self.priority_filter.store(priorities.bits(), Ordering::Relaxed);
    }

    /// Returns the current module filter.
    pub fn module_filter(&self) -> ModuleMask {
        ModuleMask::from_bits_retain(self.module_filter.load(Ordering::Relaxed))
    }

    /// Returns the current priority filter.
    pub fn priority_filter(&self) -> PriorityMask {
        PriorityMask::from_bits_retain(self.priority_filter.load(Ordering::Relaxed))
    }

    /// Returns whether a message tagged (`module`, `priority`) would be
    /// emitted.
    ///
    /// Pure bitwise test; does not touch the lock.
    #[inline]
    pub fn enabled(&self, module: ModuleMask, priority: PriorityMask) -> bool {
        self.priority_filter.load(Ordering::Relaxed) & priority.bits() != 0
            && self.module_filter.load(Ordering::Relaxed) & module.bits() != 0
    }

    /// Writes one undecorated fragment to the sink.
    ///
    /// Performs no filtering; the macros and [`write_leveled`](Self::write_leveled)
    /// are responsible for that.  Acquires the lock, invokes the sink exactly
    /// once, and returns the sink's own result.  On an empty handle, returns
    /// [`Error::FailedPrecondition`] without invoking anything.
    #[inline]
    pub fn write(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let mut sink = self.sink.lock();
        match sink.as_mut() {
            Some(sink) => sink.write(args),
            None => Err(Error::FailedPrecondition),
        }
    }

    /// Writes a decorated message: a `"(<file>:<line>) [<tag>] "` prefix,
    /// the caller's fragment, and a `"\r\n"` terminator, as three sink calls
    /// under one lock acquisition.
    ///
    /// Messages rejected by the filter check cost no lock traffic and no
    /// sink calls.  Delivery is best effort: fragment failures are not
    /// reported.  The level macros are the intended call sites; they supply
    /// `tag`, `file`, and `line`.
    pub fn write_leveled(
        &self,
        module: ModuleMask,
        priority: PriorityMask,
        tag: &str,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) {
        if !self.enabled(module, priority) {
            return;
        }
        let mut guard = self.sink.lock();
        if let Some(sink) = guard.as_mut() {
            let _ = sink.write(format_args!("({}:{}) [{}] ", file, line, tag));
            let _ = sink.write(args);
            let _ = sink.write(format_args!("\r\n"));
        }
    }
}

impl<S: Sink> Default for LogHandle<S> {
    fn default() -> Self {
        Self::new()
    }
}
