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

//! Busy-wait mutual exclusion for contexts where blocking primitives are
//! unavailable (interrupt handlers, early boot, bare-metal libraries).
//!
//! [`RawSpinLock`] is the lock capability itself; [`AtomicSpinLock`] is the
//! portable implementation.  [`SpinLock`] wraps a value and hands out RAII
//! guards.  `lock()` spins until the lock is free; there is no queueing, no
//! fairness, and no timeout.  Locks are not reentrant: acquiring a lock
//! already held by the current thread of control deadlocks.

#![cfg_attr(not(test), no_std)]

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// A bare mutual-exclusion primitive with spin-wait acquire semantics.
pub trait RawSpinLock {
    /// Sentinel releasing the lock when dropped.
    type Guard<'a>
    where
        Self: 'a;

    /// An unlocked lock, usable as a `static` initializer.
    const NEW: Self;

    /// Attempts to acquire the lock without spinning.
    fn try_lock(&self) -> Option<Self::Guard<'_>>;

    /// Acquires the lock, busy-waiting until it is free.
    #[inline(always)]
    fn lock(&self) -> Self::Guard<'_> {
        loop {
            if let Some(guard) = self.try_lock() {
                return guard;
            }
        }
    }
}

/// Releases an [`AtomicSpinLock`] on drop.
pub struct AtomicSpinLockGuard<'a> {
    lock: &'a AtomicSpinLock,
}

impl Drop for AtomicSpinLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

/// [`RawSpinLock`] implemented with a single atomic word.
///
/// Portable to any target with atomic byte swaps.  On uniprocessor targets
/// that take interrupts, pair it with interrupt masking at the call site if
/// the protected section must also exclude interrupt handlers.
pub struct AtomicSpinLock {
    locked: AtomicBool,
}

impl AtomicSpinLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    // Only to be called by AtomicSpinLockGuard::drop().
    fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl Default for AtomicSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

impl RawSpinLock for AtomicSpinLock {
    type Guard<'a> = AtomicSpinLockGuard<'a>;

    #[allow(clippy::declare_interior_mutable_const)]
    const NEW: AtomicSpinLock = Self::new();

    fn try_lock(&self) -> Option<Self::Guard<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| AtomicSpinLockGuard { lock: self })
            .ok()
    }
}

/// Grants access to a [`SpinLock`]'s value until dropped.
pub struct SpinLockGuard<'lock, T, R: RawSpinLock> {
    lock: &'lock SpinLock<T, R>,
    _inner_guard: R::Guard<'lock>,
}

impl<T, R: RawSpinLock> Deref for SpinLockGuard<'_, T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T, R: RawSpinLock> DerefMut for SpinLockGuard<'_, T, R> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

/// A value guarded by a [`RawSpinLock`].
pub struct SpinLock<T, R: RawSpinLock = AtomicSpinLock> {
    data: UnsafeCell<T>,
    inner: R,
}

// As long as the inner type is `Send` and the bare lock is `Sync`, the lock
// can be shared between threads.
unsafe impl<T: Send, R: RawSpinLock + Sync> Sync for SpinLock<T, R> {}

impl<T, R: RawSpinLock> SpinLock<T, R> {
    pub const fn new(initial_value: T) -> Self {
        Self {
            data: UnsafeCell::new(initial_value),
            inner: R::NEW,
        }
    }

    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T, R>> {
        self.inner.try_lock().map(|guard| SpinLockGuard {
            lock: self,
            _inner_guard: guard,
        })
    }

    pub fn lock(&self) -> SpinLockGuard<'_, T, R> {
        let inner_guard = self.inner.lock();
        SpinLockGuard {
            lock: self,
            _inner_guard: inner_guard,
        }
    }

    /// Accesses the value without locking.
    ///
    /// The exclusive borrow guarantees no guard is outstanding.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn bare_try_lock_returns_correct_value() {
        let lock = AtomicSpinLock::new();

        {
            let _guard = lock.lock();
            assert!(lock.try_lock().is_none());
        }

        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn try_lock_returns_correct_value() {
        let lock = SpinLock::<_>::new(false);

        {
            let mut guard = lock.lock();
            *guard = true;
            assert!(lock.try_lock().is_none());
        }

        let guard = lock.lock();
        assert!(*guard);
    }

    #[test]
    fn get_mut_bypasses_lock() {
        let mut lock = SpinLock::<_>::new(0u32);
        *lock.get_mut() = 7;
        assert_eq!(*lock.lock(), 7);
    }

    #[test]
    fn concurrent_increments_are_mutually_exclusive() {
        const THREADS: usize = 4;
        const ITERATIONS: usize = 1000;

        let lock = Arc::new(SpinLock::<_>::new(0usize));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let lock = lock.clone();
                thread::spawn(move || {
                    for _ in 0..ITERATIONS {
                        *lock.lock() += 1;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*lock.lock(), THREADS * ITERATIONS);
    }
}
