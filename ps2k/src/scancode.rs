/*
 * Scan Set 2 Key Assembly
 *
 * Most keys arrive as one byte. Keys that share a base code with the
 * original 84-key layout are sent behind an E0 prefix, and releases are
 * sent behind F0, so a single key event may span up to three bytes:
 * make "1C", break "F0 1C", extended make "E0 75", extended break "E0 F0 75".
 */

use core::fmt;

use crate::EXTEND;

pub const EXTENDED_PREFIX: u8 = 0xE0;
pub const RELEASE_PREFIX: u8 = 0xF0;

/*
 * struct KeyCode - Key identifier
 *
 * A base scancode, or a base scancode with EXTEND set when it followed E0.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(u16);

impl KeyCode {
	pub const fn new(base: u8, extended: bool) -> Self {
		if extended {
			KeyCode(base as u16 | EXTEND)
		} else {
			KeyCode(base as u16)
		}
	}

	/*
	 * from_raw - Accept only values the driver can produce
	 * @raw: base scancode, optionally with EXTEND
	 */
	pub const fn from_raw(raw: u16) -> Option<Self> {
		if raw & !(EXTEND | 0xFF) != 0 {
			return None;
		}
		Some(KeyCode(raw))
	}

	pub const fn raw(self) -> u16 {
		self.0
	}

	pub const fn base(self) -> u8 {
		(self.0 & 0xFF) as u8
	}

	pub const fn is_extended(self) -> bool {
		self.0 & EXTEND != 0
	}
}

impl fmt::Display for KeyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_extended() {
			write!(f, "E0 {:02X}", self.base())
		} else {
			write!(f, "{:02X}", self.base())
		}
	}
}

/*
 * struct KeyEvent - One complete key transition
 * @key: which key
 * @pressed: make (true) or break (false)
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
	pub key: KeyCode,
	pub pressed: bool,
}

/*
 * struct KeyAssembler - Prefix state carried between polls
 * @extended: E0 seen, waiting for the rest of the sequence
 * @release: F0 seen, waiting for the base code
 */
#[derive(Debug, Clone, Default)]
pub struct KeyAssembler {
	extended: bool,
	release: bool,
}

impl KeyAssembler {
	pub const fn new() -> Self {
		KeyAssembler { extended: false, release: false }
	}

	pub fn is_pending(&self) -> bool {
		self.extended || self.release
	}

	pub fn reset(&mut self) {
		self.extended = false;
		self.release = false;
	}

	/*
	 * push - Fold one received byte into the current sequence
	 * @byte: scancode byte from the receiver
	 *
	 * Returns the event once the sequence is complete.
	 */
	pub fn push(&mut self, byte: u8) -> Option<KeyEvent> {
		match byte {
			EXTENDED_PREFIX => {
				self.extended = true;
				None
			}
			RELEASE_PREFIX => {
				self.release = true;
				None
			}
			base => {
				let event = KeyEvent {
					key: KeyCode::new(base, self.extended),
					pressed: !self.release,
				};
				self.reset();
				Some(event)
			}
		}
	}

	/*
	 * push_code - Fold only the E0 prefix, as the flat key API does
	 * @byte: scancode byte from the receiver
	 *
	 * F0 comes back as itself and leaves a pending E0 in place, so
	 * "E0 F0 75" reads as F0 then E0 75.
	 */
	pub fn push_code(&mut self, byte: u8) -> Option<KeyCode> {
		match byte {
			EXTENDED_PREFIX => {
				self.extended = true;
				None
			}
			RELEASE_PREFIX => Some(KeyCode::new(RELEASE_PREFIX, false)),
			base => {
				let key = KeyCode::new(base, self.extended);
				self.reset();
				Some(key)
			}
		}
	}
}
