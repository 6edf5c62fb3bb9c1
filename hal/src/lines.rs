/*
 * PS/2 Line Abstraction
 *
 * Both PS/2 lines are open-drain: either side may pull a line low, and a
 * released line floats high through the pull-up. Drivers talk to the bus
 * only through this trait so the same protocol code runs on any backend.
 */

use core::fmt;

/* Highest pin index a GPIO bank register can address */
pub const MAX_PIN: u8 = 7;

/*
 * trait Ps2Lines - Clock and data line access
 *
 * Reads report the wired-AND level of the line (host and device).
 * Writes only ever control the host side.
 */
pub trait Ps2Lines {
	fn clock_is_high(&mut self) -> bool;
	fn data_is_high(&mut self) -> bool;

	fn pull_clock_low(&mut self);
	fn release_clock(&mut self);
	fn pull_data_low(&mut self);
	fn release_data(&mut self);

	//Busy wait, roughly microsecond granularity
	fn delay_us(&mut self, us: u32);

	/*
	 * release_all - Let both lines float high
	 */
	fn release_all(&mut self) {
		self.release_clock();
		self.release_data();
	}
}

impl<L: Ps2Lines + ?Sized> Ps2Lines for &mut L {
	fn clock_is_high(&mut self) -> bool {
		(**self).clock_is_high()
	}

	fn data_is_high(&mut self) -> bool {
		(**self).data_is_high()
	}

	fn pull_clock_low(&mut self) {
		(**self).pull_clock_low()
	}

	fn release_clock(&mut self) {
		(**self).release_clock()
	}

	fn pull_data_low(&mut self) {
		(**self).pull_data_low()
	}

	fn release_data(&mut self) {
		(**self).release_data()
	}

	fn delay_us(&mut self, us: u32) {
		(**self).delay_us(us)
	}
}

/*
 * enum LineError - Rejected pin configuration
 * @InvalidPin: pin index does not exist in the bank
 * @SharedPin: clock and data were given the same pin
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
	InvalidPin(u8),
	SharedPin(u8),
}

impl LineError {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::InvalidPin(_) => "pin index out of range",
			Self::SharedPin(_) => "clock and data share a pin",
		}
	}
}

impl fmt::Display for LineError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidPin(pin) | Self::SharedPin(pin) => write!(f, "{} ({})", self.as_str(), pin),
		}
	}
}

/*
 * check_pins - Validate a clock/data pin pair
 * @clock: clock pin index
 * @data: data pin index
 */
pub fn check_pins(clock: u8, data: u8) -> Result<(), LineError> {
	if clock > MAX_PIN {
		return Err(LineError::InvalidPin(clock));
	}
	if data > MAX_PIN {
		return Err(LineError::InvalidPin(data));
	}
	if clock == data {
		return Err(LineError::SharedPin(clock));
	}
	Ok(())
}
