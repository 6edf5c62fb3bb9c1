/*
 * GPIO Bank Lines
 *
 * Drives the PS/2 lines through an open-drain GPIO bank reached with x86
 * port I/O. A bank has an input register (current pin levels) and a drive
 * register where a set bit pulls that pin low.
 */

use x86_64::instructions::port::{Port, PortReadOnly};

use crate::cpu::io_delay;
use crate::lines::{check_pins, LineError, Ps2Lines};

/*
 * struct GpioBank - Register ports of one GPIO bank
 * @input: port whose bits report the pin levels
 * @drive: port whose set bits pull the pins low
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioBank {
	pub input: u16,
	pub drive: u16,
}

impl GpioBank {
	//Parallel port control register, open-collector outputs read back in place
	pub const DEFAULT: GpioBank = GpioBank { input: 0x37A, drive: 0x37A };
}

impl Default for GpioBank {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/*
 * struct PortLines - Ps2Lines over a GpioBank
 * @bank: register ports
 * @clock_mask: bit of the clock pin
 * @data_mask: bit of the data pin
 * @drive: shadow of the bits this driver pulls low
 */
pub struct PortLines {
	bank: GpioBank,
	clock_mask: u8,
	data_mask: u8,
	drive: u8,
}

impl PortLines {
	/*
	 * new - Claim two pins of a bank and release them
	 * @bank: register ports
	 * @clock: clock pin index
	 * @data: data pin index
	 *
	 * Safety: the bank ports must exist and nothing else may drive them.
	 */
	pub unsafe fn new(bank: GpioBank, clock: u8, data: u8) -> Result<Self, LineError> {
		check_pins(clock, data)?;
		let mut lines = PortLines {
			bank,
			clock_mask: 1 << clock,
			data_mask: 1 << data,
			drive: 0,
		};
		lines.release_all();
		Ok(lines)
	}

	pub fn bank(&self) -> GpioBank {
		self.bank
	}

	fn level(&self, mask: u8) -> bool {
		let mut port: PortReadOnly<u8> = PortReadOnly::new(self.bank.input);
		unsafe { port.read() & mask != 0 }
	}

	fn set_drive(&mut self, mask: u8, low: bool) {
		if low {
			self.drive |= mask;
		} else {
			self.drive &= !mask;
		}
		let mut port: Port<u8> = Port::new(self.bank.drive);
		unsafe {
			port.write(self.drive);
		}
	}
}

impl Ps2Lines for PortLines {
	fn clock_is_high(&mut self) -> bool {
		self.level(self.clock_mask)
	}

	fn data_is_high(&mut self) -> bool {
		self.level(self.data_mask)
	}

	fn pull_clock_low(&mut self) {
		self.set_drive(self.clock_mask, true);
	}

	fn release_clock(&mut self) {
		self.set_drive(self.clock_mask, false);
	}

	fn pull_data_low(&mut self) {
		self.set_drive(self.data_mask, true);
	}

	fn release_data(&mut self) {
		self.set_drive(self.data_mask, false);
	}

	fn delay_us(&mut self, us: u32) {
		io_delay(us);
	}
}
