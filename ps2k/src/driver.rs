/*
 * Keyboard Driver Instance
 *
 * One Keyboard owns one pair of lines. Nothing here is global, so
 * several keyboards (or several tests) never share state.
 */

use hal::{serial_println, Ps2Lines};

use crate::config::Config;
use crate::error::Ps2Error;
use crate::frame::{FrameError, FrameReceiver, Poll};
use crate::scancode::{KeyAssembler, KeyCode, KeyEvent};
use crate::translate::KeyMap;
use crate::transmit;
use crate::NO_KEY;

/*
 * struct ReceiveStats - Receive counters since init
 * @frames: validly framed bytes
 * @frame_errors: frames dropped for parity or stop bit
 * @stalls: frames dropped because the clock stopped
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiveStats {
	pub frames: u32,
	pub frame_errors: u32,
	pub stalls: u32,
}

pub struct Keyboard<L, M> {
	pub(crate) lines: L,
	pub(crate) map: M,
	pub(crate) config: Config,
	pub(crate) receiver: FrameReceiver,
	pub(crate) assembler: KeyAssembler,
	pub(crate) stats: ReceiveStats,
}

impl<L: Ps2Lines, M: KeyMap> Keyboard<L, M> {
	pub fn new(lines: L, map: M) -> Self {
		Self::with_config(lines, map, Config::DEFAULT)
	}

	/*
	 * with_config - Take over the lines and start from idle
	 * @lines: clock/data backend, already bound to its pins
	 * @map: translation collaborator
	 * @config: timing limits
	 */
	pub fn with_config(mut lines: L, map: M, config: Config) -> Self {
		lines.release_all();
		Keyboard {
			lines,
			map,
			config,
			receiver: FrameReceiver::new(config.stall_limit),
			assembler: KeyAssembler::new(),
			stats: ReceiveStats::default(),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn stats(&self) -> ReceiveStats {
		self.stats
	}

	pub fn lines_mut(&mut self) -> &mut L {
		&mut self.lines
	}

	pub fn map(&self) -> &M {
		&self.map
	}

	/*
	 * release - Give the lines back, released
	 */
	pub fn release(mut self) -> L {
		self.lines.release_all();
		self.lines
	}

	/*
	 * poll_raw - Sample the lines once
	 */
	pub fn poll_raw(&mut self) -> Poll {
		let clock = self.lines.clock_is_high();
		let data = self.lines.data_is_high();
		let poll = self.receiver.sample(clock, data);
		match poll {
			Poll::Byte(_) => self.stats.frames = self.stats.frames.wrapping_add(1),
			Poll::FrameError(FrameError::Stalled) => {
				self.stats.stalls = self.stats.stalls.wrapping_add(1);
				serial_println!("[ps2k] clock stalled mid-frame, frame dropped");
			}
			Poll::FrameError(err) => {
				self.stats.frame_errors = self.stats.frame_errors.wrapping_add(1);
				serial_println!("[ps2k] frame dropped: {}", err);
			}
			Poll::NoData => {}
		}
		poll
	}

	/*
	 * get_raw_code - Next raw byte, or NO_KEY
	 */
	pub fn get_raw_code(&mut self) -> u8 {
		self.poll_raw().or_no_key()
	}

	/*
	 * poll_event - Next complete key event
	 *
	 * A dropped frame also drops any pending prefix; the lost byte may
	 * have belonged to it.
	 */
	pub fn poll_event(&mut self) -> Result<Option<KeyEvent>, FrameError> {
		match self.poll_raw() {
			Poll::NoData => Ok(None),
			Poll::Byte(byte) => Ok(self.assembler.push(byte)),
			Poll::FrameError(err) => {
				self.assembler.reset();
				Err(err)
			}
		}
	}

	/*
	 * get_key - Next key identifier, or NO_KEY
	 *
	 * Only E0 is folded in. The F0 release prefix is returned as a code
	 * of its own, ahead of the key it releases.
	 */
	pub fn get_key(&mut self) -> u16 {
		match self.poll_raw() {
			Poll::Byte(byte) => self
				.assembler
				.push_code(byte)
				.map_or(u16::from(NO_KEY), KeyCode::raw),
			Poll::FrameError(_) => {
				self.assembler.reset();
				u16::from(NO_KEY)
			}
			Poll::NoData => u16::from(NO_KEY),
		}
	}

	/*
	 * translate - Map a key identifier through the layout
	 * @key: value previously returned by get_key or get_raw_code
	 */
	pub fn translate(&self, key: u16) -> u8 {
		KeyCode::from_raw(key)
			.and_then(|key| self.map.translate(key))
			.unwrap_or(NO_KEY)
	}

	/*
	 * send_byte - Blocking transfer of one byte to the keyboard
	 *
	 * The receiver restarts from idle afterwards since the transfer
	 * moved the clock under it.
	 */
	pub fn send_byte(&mut self, byte: u8) -> Result<(), Ps2Error> {
		let result = transmit::send_byte(&mut self.lines, byte, &self.config);
		self.receiver.reset();
		result
	}
}
