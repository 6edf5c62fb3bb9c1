/*
 * Device-to-Host Framing
 *
 * A PS/2 frame is 11 bits clocked by the device: start (0), eight data
 * bits LSB first, odd parity, stop (1). The device changes data while the
 * clock is high and the host latches it on the falling edge.
 *
 * The receiver never blocks. Each sample() call looks at the lines once;
 * the caller keeps polling until a frame completes.
 */

use core::fmt;

/*
 * enum FrameError - Why a frame was dropped
 * @Parity: data bits plus parity bit had an even number of ones
 * @StopBit: the stop bit was low
 * @Stalled: the clock stopped moving in the middle of a frame
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
	Parity,
	StopBit,
	Stalled,
}

impl FrameError {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Parity => "parity error",
			Self::StopBit => "missing stop bit",
			Self::Stalled => "clock stalled mid-frame",
		}
	}
}

impl fmt::Display for FrameError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/*
 * enum Poll - Outcome of a single poll
 * @NoData: nothing complete yet (or the line is idle)
 * @Byte: a validly framed byte
 * @FrameError: a frame was dropped; the receiver is idle again
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
	NoData,
	Byte(u8),
	FrameError(FrameError),
}

impl Poll {
	pub fn byte(self) -> Option<u8> {
		match self {
			Poll::Byte(byte) => Some(byte),
			_ => None,
		}
	}

	/*
	 * or_no_key - Collapse to the single-byte sentinel convention
	 */
	pub fn or_no_key(self) -> u8 {
		self.byte().unwrap_or(crate::NO_KEY)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Idle,
	Data(u8), //Number of data bits already shifted in
	Parity,
	Stop,
}

/*
 * struct FrameReceiver - Falling-edge framing state machine
 * @state: position inside the current frame
 * @shift: data bits received so far
 * @parity_ok: parity verdict, valid once past the parity bit
 * @last_clock: clock level seen on the previous sample
 * @quiet: samples since the last edge while a frame is open
 * @stall_limit: quiet samples tolerated before dropping the frame
 */
#[derive(Debug, Clone)]
pub struct FrameReceiver {
	state: State,
	shift: u8,
	parity_ok: bool,
	last_clock: bool,
	quiet: u32,
	stall_limit: Option<u32>,
}

impl FrameReceiver {
	pub const fn new(stall_limit: Option<u32>) -> Self {
		FrameReceiver {
			state: State::Idle,
			shift: 0,
			parity_ok: false,
			last_clock: true,
			quiet: 0,
			stall_limit,
		}
	}

	pub fn is_idle(&self) -> bool {
		self.state == State::Idle
	}

	/*
	 * reset - Forget any partial frame and assume a released clock
	 */
	pub fn reset(&mut self) {
		self.drop_frame();
		self.last_clock = true;
	}

	fn drop_frame(&mut self) {
		self.state = State::Idle;
		self.shift = 0;
		self.parity_ok = false;
		self.quiet = 0;
	}

	/*
	 * sample - Feed one observation of both lines
	 * @clock_high: current clock level
	 * @data_high: current data level
	 */
	pub fn sample(&mut self, clock_high: bool, data_high: bool) -> Poll {
		let falling = self.last_clock && !clock_high;
		self.last_clock = clock_high;

		if falling {
			self.quiet = 0;
			return self.feed_bit(data_high);
		}
		if self.state == State::Idle {
			return Poll::NoData;
		}

		self.quiet = self.quiet.saturating_add(1);
		match self.stall_limit {
			Some(limit) if self.quiet >= limit => {
				self.drop_frame();
				Poll::FrameError(FrameError::Stalled)
			}
			_ => Poll::NoData,
		}
	}

	/*
	 * feed_bit - Advance the frame by one latched bit
	 * @bit: data level at the falling edge
	 */
	pub fn feed_bit(&mut self, bit: bool) -> Poll {
		match self.state {
			State::Idle => {
				//A high start bit is line noise; stay idle
				if !bit {
					self.drop_frame();
					self.state = State::Data(0);
				}
				Poll::NoData
			}
			State::Data(n) => {
				if bit {
					self.shift |= 1 << n;
				}
				self.state = if n == 7 { State::Parity } else { State::Data(n + 1) };
				Poll::NoData
			}
			State::Parity => {
				self.parity_ok = parity_bit(self.shift) == bit;
				self.state = State::Stop;
				Poll::NoData
			}
			State::Stop => {
				let byte = self.shift;
				let parity_ok = self.parity_ok;
				self.drop_frame();
				if !parity_ok {
					Poll::FrameError(FrameError::Parity)
				} else if !bit {
					Poll::FrameError(FrameError::StopBit)
				} else {
					Poll::Byte(byte)
				}
			}
		}
	}
}

/*
 * parity_bit - Odd parity bit for a data byte
 *
 * Returns the bit that makes the total count of ones odd.
 */
pub const fn parity_bit(byte: u8) -> bool {
	byte.count_ones() % 2 == 0
}
