/*
 * Key Translation
 *
 * Maps key identifiers to the byte an application wants: ASCII for
 * printable keys, symbolic codes above 0x7F for navigation and function
 * keys. The map is a collaborator of the driver, so layouts can be
 * swapped without touching the protocol code.
 */

use crate::scancode::KeyCode;

pub trait KeyMap {
	/* None when the map has nothing for this key */
	fn translate(&self, key: KeyCode) -> Option<u8>;
}

impl<M: KeyMap + ?Sized> KeyMap for &M {
	fn translate(&self, key: KeyCode) -> Option<u8> {
		(**self).translate(key)
	}
}

/*
 * struct FnMap - Use a closure as a KeyMap
 */
pub struct FnMap<F>(pub F);

impl<F: Fn(KeyCode) -> Option<u8>> KeyMap for FnMap<F> {
	fn translate(&self, key: KeyCode) -> Option<u8> {
		(self.0)(key)
	}
}

//Symbolic codes for keys without an ASCII meaning
pub const KEY_UP: u8 = 0x80;
pub const KEY_DOWN: u8 = 0x81;
pub const KEY_LEFT: u8 = 0x82;
pub const KEY_RIGHT: u8 = 0x83;
pub const KEY_HOME: u8 = 0x84;
pub const KEY_END: u8 = 0x85;
pub const KEY_PAGE_UP: u8 = 0x86;
pub const KEY_PAGE_DOWN: u8 = 0x87;
pub const KEY_INSERT: u8 = 0x88;
pub const KEY_DELETE: u8 = 0x7F;
pub const KEY_F1: u8 = 0x90; //F1..F12 are consecutive

/*
 * struct TableMap - Two 256-entry lookup tables
 * @base: codes received without a prefix
 * @extended: codes received behind E0
 *
 * Any byte, 0x00 included, can be an output. An output of 0xFF reads the
 * same as NO_KEY through the flat translate call.
 */
#[derive(Clone, PartialEq, Eq)]
pub struct TableMap {
	base: [Option<u8>; 256],
	extended: [Option<u8>; 256],
}

impl TableMap {
	pub const EMPTY: TableMap = TableMap { base: [None; 256], extended: [None; 256] };

	/*
	 * from_pairs - Build tables from (scancode, output) pairs
	 * @base: pairs for unprefixed codes
	 * @extended: pairs for E0 codes
	 */
	pub const fn from_pairs(base: &[(u8, u8)], extended: &[(u8, u8)]) -> Self {
		TableMap {
			base: fill(base),
			extended: fill(extended),
		}
	}

	pub const fn lookup(&self, key: KeyCode) -> Option<u8> {
		let table = if key.is_extended() { &self.extended } else { &self.base };
		table[key.base() as usize]
	}

	/*
	 * set - Remap one key, None unmaps it
	 */
	pub fn set(&mut self, key: KeyCode, out: Option<u8>) {
		let table = if key.is_extended() { &mut self.extended } else { &mut self.base };
		table[key.base() as usize] = out;
	}
}

impl KeyMap for TableMap {
	fn translate(&self, key: KeyCode) -> Option<u8> {
		self.lookup(key)
	}
}

const fn fill(pairs: &[(u8, u8)]) -> [Option<u8>; 256] {
	let mut table = [None; 256];
	let mut i = 0;
	while i < pairs.len() {
		table[pairs[i].0 as usize] = Some(pairs[i].1);
		i += 1;
	}
	table
}

const US_BASE: &[(u8, u8)] = &[
	//Letters
	(0x1C, b'a'), (0x32, b'b'), (0x21, b'c'), (0x23, b'd'), (0x24, b'e'),
	(0x2B, b'f'), (0x34, b'g'), (0x33, b'h'), (0x43, b'i'), (0x3B, b'j'),
	(0x42, b'k'), (0x4B, b'l'), (0x3A, b'm'), (0x31, b'n'), (0x44, b'o'),
	(0x4D, b'p'), (0x15, b'q'), (0x2D, b'r'), (0x1B, b's'), (0x2C, b't'),
	(0x3C, b'u'), (0x2A, b'v'), (0x1D, b'w'), (0x22, b'x'), (0x35, b'y'),
	(0x1A, b'z'),
	//Number row
	(0x45, b'0'), (0x16, b'1'), (0x1E, b'2'), (0x26, b'3'), (0x25, b'4'),
	(0x2E, b'5'), (0x36, b'6'), (0x3D, b'7'), (0x3E, b'8'), (0x46, b'9'),
	//Punctuation
	(0x0E, b'`'), (0x4E, b'-'), (0x55, b'='), (0x54, b'['), (0x5B, b']'),
	(0x5D, b'\\'), (0x4C, b';'), (0x52, b'\''), (0x41, b','), (0x49, b'.'),
	(0x4A, b'/'),
	//Whitespace and editing
	(0x29, b' '), (0x5A, b'\n'), (0x66, 0x08), (0x0D, b'\t'), (0x76, 0x1B),
	//Keypad
	(0x70, b'0'), (0x69, b'1'), (0x72, b'2'), (0x7A, b'3'), (0x6B, b'4'),
	(0x73, b'5'), (0x74, b'6'), (0x6C, b'7'), (0x75, b'8'), (0x7D, b'9'),
	(0x71, b'.'), (0x79, b'+'), (0x7B, b'-'), (0x7C, b'*'),
	//Function keys
	(0x05, KEY_F1), (0x06, KEY_F1 + 1), (0x04, KEY_F1 + 2), (0x0C, KEY_F1 + 3),
	(0x03, KEY_F1 + 4), (0x0B, KEY_F1 + 5), (0x83, KEY_F1 + 6), (0x0A, KEY_F1 + 7),
	(0x01, KEY_F1 + 8), (0x09, KEY_F1 + 9), (0x78, KEY_F1 + 10), (0x07, KEY_F1 + 11),
];

const US_EXTENDED: &[(u8, u8)] = &[
	(0x75, KEY_UP), (0x72, KEY_DOWN), (0x6B, KEY_LEFT), (0x74, KEY_RIGHT),
	(0x6C, KEY_HOME), (0x69, KEY_END), (0x7D, KEY_PAGE_UP), (0x7A, KEY_PAGE_DOWN),
	(0x70, KEY_INSERT), (0x71, KEY_DELETE),
	(0x5A, b'\n'), (0x4A, b'/'),
];

/* US layout, unshifted */
pub const US_LAYOUT: TableMap = TableMap::from_pairs(US_BASE, US_EXTENDED);

#[cfg(test)]
mod tests {
	use super::*;

	fn us(base: u8, extended: bool) -> Option<u8> {
		US_LAYOUT.translate(KeyCode::new(base, extended))
	}

	#[test]
	fn letters_and_controls() {
		assert_eq!(us(0x1C, false), Some(b'a'));
		assert_eq!(us(0x1A, false), Some(b'z'));
		assert_eq!(us(0x5A, false), Some(b'\n'));
		assert_eq!(us(0x66, false), Some(0x08));
		assert_eq!(us(0x76, false), Some(0x1B));
	}

	#[test]
	fn extended_keys_differ_from_keypad() {
		assert_eq!(us(0x75, false), Some(b'8'));
		assert_eq!(us(0x75, true), Some(KEY_UP));
		assert_eq!(us(0x71, true), Some(KEY_DELETE));
		assert_eq!(us(0x4A, true), Some(b'/'));
	}

	#[test]
	fn function_keys_are_consecutive() {
		assert_eq!(us(0x05, false), Some(0x90));
		assert_eq!(us(0x83, false), Some(0x96));
		assert_eq!(us(0x07, false), Some(0x9B));
	}

	#[test]
	fn unmapped_keys_are_none() {
		assert_eq!(us(0x12, false), None); //Left shift
		assert_eq!(us(0x1C, true), None);
		assert_eq!(us(0xFA, false), None);
	}

	#[test]
	fn nul_is_a_valid_output() {
		let ctrl_at = TableMap::from_pairs(&[(0x1E, 0x00)], &[]);
		assert_eq!(ctrl_at.translate(KeyCode::new(0x1E, false)), Some(0x00));
		assert_eq!(ctrl_at.translate(KeyCode::new(0x1C, false)), None);
		assert_eq!(TableMap::EMPTY.translate(KeyCode::new(0x1E, false)), None);
	}

	#[test]
	fn remap_and_custom_maps() {
		let mut dvorak_ish = US_LAYOUT.clone();
		dvorak_ish.set(KeyCode::new(0x15, false), Some(b'\''));
		assert_eq!(dvorak_ish.translate(KeyCode::new(0x15, false)), Some(b'\''));
		dvorak_ish.set(KeyCode::new(0x15, false), None);
		assert_eq!(dvorak_ish.translate(KeyCode::new(0x15, false)), None);

		let upper = FnMap(|key: KeyCode| US_LAYOUT.lookup(key).map(|b| b.to_ascii_uppercase()));
		assert_eq!(upper.translate(KeyCode::new(0x1C, false)), Some(b'A'));
		assert_eq!((&upper).translate(KeyCode::new(0x12, false)), None);
	}
}
