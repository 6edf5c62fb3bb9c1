/*
 * Flat Driver Interface
 *
 * One process-wide keyboard on the default GPIO bank with the US layout,
 * reachable through C-linkage entry points. Every failure collapses into
 * NO_KEY, or into a log line where there is nothing to return.
 */

use core::ffi::c_int;
use core::sync::atomic::{AtomicU8, Ordering};

use hal::{serial_println, GpioBank, PortLines};
use spin::Mutex;

use crate::driver::Keyboard;
use crate::scancode::KeyCode;
use crate::translate::{KeyMap, TableMap, US_LAYOUT};
use crate::NO_KEY;

/* Marks the pin globals before a successful init */
const NO_PIN: u8 = 0xFF;

static CLOCK_PIN: AtomicU8 = AtomicU8::new(NO_PIN);
static DATA_PIN: AtomicU8 = AtomicU8::new(NO_PIN);

static KEYBOARD: Mutex<Option<Keyboard<PortLines, TableMap>>> = Mutex::new(None);

/*
 * ps2k_init - Bind the keyboard to two pins of the default bank
 * @clock: clock pin index
 * @data: data pin index
 *
 * Replaces any earlier instance. Invalid pins leave no instance behind.
 *
 * Safety: the default bank must exist and nothing else may drive it.
 */
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ps2k_init(clock: u8, data: u8) {
	let mut slot = KEYBOARD.lock();
	if let Some(old) = slot.take() {
		old.release();
	}
	CLOCK_PIN.store(NO_PIN, Ordering::Relaxed);
	DATA_PIN.store(NO_PIN, Ordering::Relaxed);

	match unsafe { PortLines::new(GpioBank::DEFAULT, clock, data) } {
		Ok(lines) => {
			*slot = Some(Keyboard::new(lines, US_LAYOUT));
			CLOCK_PIN.store(clock, Ordering::Relaxed);
			DATA_PIN.store(data, Ordering::Relaxed);
			serial_println!("[ps2k] keyboard on clock pin {}, data pin {}", clock, data);
		}
		Err(err) => {
			serial_println!("[ps2k] init rejected: {}", err);
		}
	}
}

/*
 * ps2k_getcode - Poll once for a raw scancode byte
 */
#[unsafe(no_mangle)]
pub extern "C" fn ps2k_getcode() -> u8 {
	match KEYBOARD.lock().as_mut() {
		Some(kbd) => kbd.get_raw_code(),
		None => NO_KEY,
	}
}

/*
 * ps2k_getkey - Poll once for a key identifier (F0 passes through)
 */
#[unsafe(no_mangle)]
pub extern "C" fn ps2k_getkey() -> c_int {
	match KEYBOARD.lock().as_mut() {
		Some(kbd) => c_int::from(kbd.get_key()),
		None => c_int::from(NO_KEY),
	}
}

/*
 * ps2k_sendbyte - Blocking send of one byte to the keyboard
 */
#[unsafe(no_mangle)]
pub extern "C" fn ps2k_sendbyte(byte: u8) {
	if let Some(kbd) = KEYBOARD.lock().as_mut() {
		//Failures are already logged by the transmitter
		let _ = kbd.send_byte(byte);
	}
}

/*
 * ps2k_translate - Key identifier to application byte
 * @key: value from ps2k_getkey or ps2k_getcode
 */
#[unsafe(no_mangle)]
pub extern "C" fn ps2k_translate(key: c_int) -> u8 {
	let Some(key) = u16::try_from(key).ok().and_then(KeyCode::from_raw) else {
		return NO_KEY;
	};
	let translated = match KEYBOARD.lock().as_ref() {
		Some(kbd) => kbd.map().translate(key),
		None => US_LAYOUT.translate(key),
	};
	translated.unwrap_or(NO_KEY)
}

/*
 * pins - Clock and data pins of the live instance
 */
pub fn pins() -> Option<(u8, u8)> {
	let clock = CLOCK_PIN.load(Ordering::Relaxed);
	let data = DATA_PIN.load(Ordering::Relaxed);
	if clock == NO_PIN || data == NO_PIN {
		return None;
	}
	Some((clock, data))
}
