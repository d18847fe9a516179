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

use bitflags::bitflags;

bitflags! {
    /// Bitmask over message priorities.
    ///
    /// Bits 0 through 4 are reserved for the built-in priorities below.
    /// Embedders defining their own priorities must start at bit 5:
    ///
    /// ```
    /// use logger::PriorityMask;
    ///
    /// const AUDIT: PriorityMask = PriorityMask::from_bits_retain(1 << 5);
    /// assert!(!AUDIT.intersects(PriorityMask::TRACE));
    /// ```
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct PriorityMask: u32 {
        /// Unrecoverable failures.
        const ERROR = 1 << 0;
        /// Suspicious conditions the caller can survive.
        const WARN = 1 << 1;
        /// Routine operational messages.
        const INFO = 1 << 2;
        /// Diagnostics for development builds.
        const DEBUG = 1 << 3;
        /// Per-operation tracing, the noisiest built-in priority.
        const TRACE = 1 << 4;
        /// Matches every priority, including embedder-defined ones.
        const ALL = u32::MAX;
    }
}

bitflags! {
    /// Bitmask over logical modules (subsystems) of the embedding program.
    ///
    /// Bit 0 is reserved; embedder-defined modules must start at bit 1 and
    /// are created with [`ModuleMask::from_bits_retain`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ModuleMask: u32 {
        /// The reserved built-in module bit.
        const CORE = 1 << 0;
        /// Matches every module, including embedder-defined ones.
        const ALL = u32::MAX;
    }
}
