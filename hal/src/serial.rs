/*
 * Serial Console
 *
 * COM1 at 115200 baud, 8N1. Output is dropped until init_serial() runs,
 * so code that logs can run before (or without) the console.
 */

#[cfg(target_arch = "x86_64")]
mod com {
	use spin::{Mutex, Once};
	use x86_64::instructions::port::{Port, PortReadOnly};

	//COM1 serial port base address
	const COM1: u16 = 0x3F8;

	//Register offsets
	const DATA_REG: u16 = 0;
	const INT_EN_REG: u16 = 1;
	const FIFO_REG: u16 = 2;
	const LINE_CTRL_REG: u16 = 3;
	const MODEM_CTRL_REG: u16 = 4;
	const LINE_STATUS_REG: u16 = 5;

	//Line status: transmit holding register empty
	const LSR_THR_EMPTY: u8 = 0x20;

	pub struct SerialPort {
		base: u16,
	}

	impl SerialPort {
		pub fn new() -> Self {
			let port = SerialPort { base: COM1 };
			unsafe {
				port.init();
			}
			port
		}

		unsafe fn write_reg(&self, reg: u16, value: u8) {
			let mut port: Port<u8> = Port::new(self.base + reg);
			unsafe { port.write(value) };
		}

		unsafe fn init(&self) {
			unsafe {
				self.write_reg(INT_EN_REG, 0x00); //No interrupts, we poll
				self.write_reg(LINE_CTRL_REG, 0x80); //DLAB on
				self.write_reg(DATA_REG, 0x01); //Divisor low: 115200
				self.write_reg(INT_EN_REG, 0x00); //Divisor high
				self.write_reg(LINE_CTRL_REG, 0x03); //8N1, DLAB off
				self.write_reg(FIFO_REG, 0xC7);
				self.write_reg(MODEM_CTRL_REG, 0x03); //DTR + RTS
			}
		}

		fn is_transmit_empty(&self) -> bool {
			let mut status: PortReadOnly<u8> = PortReadOnly::new(self.base + LINE_STATUS_REG);
			unsafe { status.read() & LSR_THR_EMPTY != 0 }
		}

		pub fn write_byte(&self, byte: u8) {
			while !self.is_transmit_empty() {
				core::hint::spin_loop();
			}
			unsafe {
				self.write_reg(DATA_REG, byte);
			}
		}

		pub fn write_str(&self, s: &str) {
			for byte in s.bytes() {
				self.write_byte(byte);
			}
		}
	}

	pub static SERIAL_PORT: Once<Mutex<SerialPort>> = Once::new();
}

/*
 * init_serial - Bring up COM1 and start accepting output
 */
#[cfg(target_arch = "x86_64")]
pub fn init_serial() {
	com::SERIAL_PORT.call_once(|| spin::Mutex::new(com::SerialPort::new()));
}

#[cfg(not(target_arch = "x86_64"))]
pub fn init_serial() {}

/*
 * serial_print - Write a string to the console if it is up
 * @s: text to write
 */
#[cfg(target_arch = "x86_64")]
pub fn serial_print(s: &str) {
	if let Some(serial) = com::SERIAL_PORT.get() {
		serial.lock().write_str(s);
	}
}

#[cfg(not(target_arch = "x86_64"))]
pub fn serial_print(_s: &str) {}

#[macro_export]
macro_rules! serial_print {
	($($arg:tt)*) => {
		$crate::serial::_serial_print(format_args!($($arg)*))
	};
}

#[macro_export]
macro_rules! serial_println {
	() => ($crate::serial_print!("\n"));
	($($arg:tt)*) => {
		$crate::serial_print!("{}\n", format_args!($($arg)*))
	};
}

#[doc(hidden)]
pub fn _serial_print(args: core::fmt::Arguments) {
	use core::fmt::Write;

	struct SerialWriter;

	impl Write for SerialWriter {
		fn write_str(&mut self, s: &str) -> core::fmt::Result {
			serial_print(s);
			Ok(())
		}
	}
	SerialWriter.write_fmt(args).ok();
}
