/*
 * Keyboard Command Set
 *
 * Commands go out with transmit::send_byte. The keyboard answers every
 * command and parameter byte with ACK, or with RESEND when it did not
 * like the transfer. Answers come back as ordinary frames, so waiting for
 * them means polling the receiver.
 */

use bitflags::bitflags;
use hal::{serial_println, Ps2Lines};

use crate::driver::Keyboard;
use crate::error::Ps2Error;
use crate::frame::Poll;
use crate::translate::KeyMap;

pub const SET_LEDS: u8 = 0xED;
pub const ECHO: u8 = 0xEE;
pub const SCANCODE_SET: u8 = 0xF0;
pub const IDENTIFY: u8 = 0xF2;
pub const SET_TYPEMATIC: u8 = 0xF3;
pub const ENABLE_SCANNING: u8 = 0xF4;
pub const DISABLE_SCANNING: u8 = 0xF5;
pub const SET_DEFAULTS: u8 = 0xF6;
pub const RESEND: u8 = 0xFE;
pub const RESET: u8 = 0xFF;

pub mod response {
	pub const ACK: u8 = 0xFA;
	pub const RESEND: u8 = 0xFE;
	pub const ECHO: u8 = 0xEE;
	pub const BAT_OK: u8 = 0xAA;
	pub const BAT_FAILED: u8 = 0xFC;
}

bitflags! {
	/* Parameter byte of SET_LEDS */
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct Leds: u8 {
		const SCROLL_LOCK = 1 << 0;
		const NUM_LOCK = 1 << 1;
		const CAPS_LOCK = 1 << 2;
	}
}

impl<L: Ps2Lines, M: KeyMap> Keyboard<L, M> {
	/*
	 * wait_response - Poll until a byte arrives
	 * @polls: poll budget
	 */
	fn wait_response(&mut self, polls: u32) -> Result<u8, Ps2Error> {
		for _ in 0..polls {
			match self.poll_raw() {
				Poll::Byte(byte) => return Ok(byte),
				Poll::FrameError(err) => return Err(err.into()),
				Poll::NoData => {}
			}
		}
		Err(Ps2Error::Timeout)
	}

	/*
	 * send_command - Send one byte and wait for its ACK
	 * @byte: command or parameter byte
	 *
	 * Resends on RESEND up to config.command_retries more times.
	 */
	pub fn send_command(&mut self, byte: u8) -> Result<(), Ps2Error> {
		let polls = self.config.response_polls;
		for attempt in 0..=self.config.command_retries {
			self.send_byte(byte)?;
			match self.wait_response(polls)? {
				response::ACK => return Ok(()),
				response::RESEND => {
					serial_println!("[ps2k] resend requested for {:#04x} (try {})", byte, attempt + 1);
				}
				other => return Err(Ps2Error::UnexpectedResponse(other)),
			}
		}
		Err(Ps2Error::CommandFailed)
	}

	pub fn set_leds(&mut self, leds: Leds) -> Result<(), Ps2Error> {
		self.send_command(SET_LEDS)?;
		self.send_command(leds.bits())
	}

	/*
	 * set_typematic - Program repeat rate and delay
	 * @rate: bits 0-4 rate, bits 5-6 delay; bit 7 must be zero
	 */
	pub fn set_typematic(&mut self, rate: u8) -> Result<(), Ps2Error> {
		self.send_command(SET_TYPEMATIC)?;
		self.send_command(rate & 0x7F)
	}

	pub fn enable_scanning(&mut self) -> Result<(), Ps2Error> {
		self.send_command(ENABLE_SCANNING)
	}

	pub fn disable_scanning(&mut self) -> Result<(), Ps2Error> {
		self.send_command(DISABLE_SCANNING)
	}

	pub fn set_defaults(&mut self) -> Result<(), Ps2Error> {
		self.send_command(SET_DEFAULTS)
	}

	/*
	 * echo - Check the keyboard is alive; it answers ECHO, not ACK
	 */
	pub fn echo(&mut self) -> Result<(), Ps2Error> {
		self.send_byte(ECHO)?;
		match self.wait_response(self.config.response_polls)? {
			response::ECHO => Ok(()),
			other => Err(Ps2Error::UnexpectedResponse(other)),
		}
	}

	/*
	 * reset - Reset the keyboard and wait for its self test
	 */
	pub fn reset(&mut self) -> Result<(), Ps2Error> {
		//Whatever prefix was pending belongs to the keyboard we are resetting
		self.assembler.reset();
		self.send_command(RESET)?;
		match self.wait_response(self.config.reset_polls)? {
			response::BAT_OK => Ok(()),
			response::BAT_FAILED => Err(Ps2Error::SelfTestFailed),
			other => Err(Ps2Error::UnexpectedResponse(other)),
		}
	}
}
