/*
 * Hardware Abstraction Layer (HAL)
 *
 * Provides the platform pieces the PS/2 driver sits on:
 * - Open-drain clock/data line abstraction
 * - GPIO bank backend over x86 port I/O
 * - Microsecond busy delays
 * - Serial console
 */

#![cfg_attr(not(test), no_std)]

pub mod cpu;
pub mod lines;
pub mod serial;

#[cfg(target_arch = "x86_64")]
pub mod io;

#[cfg(target_arch = "x86_64")]
pub use io::{GpioBank, PortLines};
pub use lines::{LineError, Ps2Lines, MAX_PIN};
pub use serial::{init_serial, serial_print};
