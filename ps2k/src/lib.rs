/*
 * Polled PS/2 Keyboard Driver
 *
 * Bit-bangs the PS/2 clock/data pair without interrupts:
 * - frame: device-to-host framing, one line sample per poll
 * - scancode: E0/F0 prefix folding into key identifiers
 * - translate: pluggable key identifier -> byte maps
 * - transmit: blocking host-to-device byte transfer
 * - command: keyboard command set on top of transmit
 * - driver: the Keyboard instance tying it together
 * - global: flat ps2k_* entry points for C callers
 */

#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod frame;
pub mod scancode;
pub mod translate;
pub mod transmit;

#[cfg(target_arch = "x86_64")]
pub mod global;

#[cfg(test)]
mod sim;

pub use command::Leds;
pub use config::Config;
pub use driver::{Keyboard, ReceiveStats};
pub use error::Ps2Error;
pub use frame::{FrameError, FrameReceiver, Poll};
pub use scancode::{KeyAssembler, KeyCode, KeyEvent};
pub use translate::{KeyMap, TableMap, US_LAYOUT};

/* Added to a scancode that arrived behind the E0 prefix */
pub const EXTEND: u16 = 0x100;

/* "Nothing to report" from every polling call and from translate */
pub const NO_KEY: u8 = 0xFF;
