/*
 * Host-to-Device Transfer
 *
 * The host cannot clock the bus. To send, it inhibits the device by
 * holding clock low, puts the start bit on data, and lets go of the
 * clock. The device then generates the clock and samples data on each
 * rising edge; the host changes data while the clock is low. After the
 * stop bit the device acks by pulling data low for one clock.
 *
 * Everything here blocks. Every wait is bounded by Config.
 */

use hal::{serial_println, Ps2Lines};

use crate::config::Config;
use crate::error::Ps2Error;
use crate::frame::parity_bit;

/*
 * wait_for - Spin until @cond holds, 1us per try
 * @limit: tries before giving up
 */
fn wait_for<L: Ps2Lines>(lines: &mut L, limit: u32, mut cond: impl FnMut(&mut L) -> bool) -> bool {
	for _ in 0..limit {
		if cond(lines) {
			return true;
		}
		lines.delay_us(1);
	}
	false
}

fn wait_clock<L: Ps2Lines>(lines: &mut L, high: bool, limit: u32) -> Result<(), Ps2Error> {
	if wait_for(lines, limit, |l| l.clock_is_high() == high) {
		Ok(())
	} else {
		Err(Ps2Error::Timeout)
	}
}

fn put_data<L: Ps2Lines>(lines: &mut L, bit: bool) {
	if bit {
		lines.release_data();
	} else {
		lines.pull_data_low();
	}
}

/*
 * send_byte - Transmit one byte to the device
 * @lines: bus lines
 * @byte: command or data byte
 * @config: timing limits
 *
 * Both lines are released on return, success or not.
 */
pub fn send_byte<L: Ps2Lines>(lines: &mut L, byte: u8, config: &Config) -> Result<(), Ps2Error> {
	let result = clock_out(lines, byte, config);
	lines.release_all();
	if let Err(err) = result {
		serial_println!("[ps2k] send {:#04x} failed: {}", byte, err);
	}
	result
}

fn clock_out<L: Ps2Lines>(lines: &mut L, byte: u8, config: &Config) -> Result<(), Ps2Error> {
	//Request to send
	lines.pull_clock_low();
	lines.delay_us(config.inhibit_us);
	lines.pull_data_low();
	lines.release_clock();

	wait_clock(lines, false, config.request_timeout)?;

	for i in 0..8 {
		put_data(lines, byte & (1 << i) != 0);
		wait_clock(lines, true, config.bit_timeout)?;
		wait_clock(lines, false, config.bit_timeout)?;
	}

	put_data(lines, parity_bit(byte));
	wait_clock(lines, true, config.bit_timeout)?;
	wait_clock(lines, false, config.bit_timeout)?;

	//Stop bit
	lines.release_data();
	wait_clock(lines, true, config.bit_timeout)?;
	wait_clock(lines, false, config.bit_timeout)?;

	if !wait_for(lines, config.ack_timeout, |l| !l.data_is_high()) {
		return Err(Ps2Error::NoAck);
	}
	wait_clock(lines, false, config.bit_timeout)?;

	//Device lets go of both lines once the ack clock ends
	if !wait_for(lines, config.bit_timeout, |l| l.clock_is_high() && l.data_is_high()) {
		return Err(Ps2Error::Timeout);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sim::{Received, SimDevice};

	fn quick() -> Config {
		Config {
			request_timeout: 50,
			bit_timeout: 50,
			ack_timeout: 50,
			..Config::DEFAULT
		}
	}

	#[test]
	fn device_receives_byte_with_odd_parity() {
		let mut dev = SimDevice::new();
		assert_eq!(send_byte(&mut dev, 0xED, &quick()), Ok(()));
		assert_eq!(dev.received, vec![Received { byte: 0xED, parity_ok: true, stop_ok: true }]);
		assert!(!dev.host_is_driving());
	}

	#[test]
	fn inhibit_time_is_honoured() {
		let mut dev = SimDevice::new();
		let config = Config { inhibit_us: 150, ..quick() };
		send_byte(&mut dev, 0xF4, &config).unwrap();
		assert!(dev.delayed_us >= 150);
	}

	#[test]
	fn several_bytes_in_a_row() {
		let mut dev = SimDevice::new();
		for byte in [0x00, 0xFF, 0x55, 0xF3] {
			send_byte(&mut dev, byte, &quick()).unwrap();
		}
		let bytes: Vec<u8> = dev.received.iter().map(|r| r.byte).collect();
		assert_eq!(bytes, vec![0x00, 0xFF, 0x55, 0xF3]);
		assert!(dev.received.iter().all(|r| r.parity_ok && r.stop_ok));
	}

	#[test]
	fn missing_ack_is_reported() {
		let mut dev = SimDevice::new();
		dev.acks = false;
		assert_eq!(send_byte(&mut dev, 0xED, &quick()), Err(Ps2Error::NoAck));
		assert_eq!(dev.received.len(), 1);
		assert!(!dev.host_is_driving());
	}

	#[test]
	fn silent_device_times_out() {
		let mut dev = SimDevice::new();
		dev.responsive = false;
		assert_eq!(send_byte(&mut dev, 0xFF, &quick()), Err(Ps2Error::Timeout));
		assert!(dev.received.is_empty());
		assert!(!dev.host_is_driving());
	}
}
