/*
 * CPU Delay Helpers
 *
 * Busy waits used to pace bit-banged protocols.
 */

/* Port 0x80 is the POST diagnostic port; a write takes about 1us on the ISA bus */
#[cfg(target_arch = "x86_64")]
const IO_DELAY_PORT: u16 = 0x80;

/*
 * io_delay - Busy wait for roughly @us microseconds
 * @us: delay in microseconds
 */
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn io_delay(us: u32) {
	use x86_64::instructions::port::PortWriteOnly;

	let mut port: PortWriteOnly<u8> = PortWriteOnly::new(IO_DELAY_PORT);
	for _ in 0..us {
		unsafe {
			port.write(0);
		}
	}
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn io_delay(us: u32) {
	//No calibrated timebase here, spin instead
	for _ in 0..us.saturating_mul(64) {
		core::hint::spin_loop();
	}
}

