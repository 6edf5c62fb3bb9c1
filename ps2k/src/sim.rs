/*
 * Bus Simulation
 *
 * Test doubles for the PS/2 bus: waveform builders and a scripted
 * keyboard that answers host transfers.
 */

use std::collections::VecDeque;

use hal::Ps2Lines;

use crate::frame::parity_bit;

/*
 * frame_bits - Start, 8 data bits LSB first, odd parity, stop
 */
pub fn frame_bits(byte: u8) -> [bool; 11] {
	let mut bits = [false; 11];
	for i in 0..8 {
		bits[1 + i] = byte & (1 << i) != 0;
	}
	bits[9] = parity_bit(byte);
	bits[10] = true;
	bits
}

/*
 * samples_for - (clock, data) samples for a bit sequence
 *
 * One sample per half clock, data settled before each falling edge,
 * followed by an idle sample.
 */
pub fn samples_for(bits: &[bool]) -> Vec<(bool, bool)> {
	let mut samples = Vec::with_capacity(bits.len() * 2 + 1);
	for &bit in bits {
		samples.push((true, bit));
		samples.push((false, bit));
	}
	samples.push((true, true));
	samples
}

pub fn frame_samples(byte: u8) -> Vec<(bool, bool)> {
	samples_for(&frame_bits(byte))
}

/*
 * struct Received - A byte the simulated keyboard clocked in from the host
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Received {
	pub byte: u8,
	pub parity_ok: bool,
	pub stop_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	//Replaying queued device-to-host samples
	Idle,
	//Host holds the clock low
	Inhibited,
	//Generating the clock for a host-to-device byte
	Clocking,
	//Holding data and clock low after the stop bit
	Ack,
	//Lines released after the ack, before replies start
	Settling,
}

type Responder = Box<dyn FnMut(u8) -> Vec<u8>>;

/*
 * struct SimDevice - Keyboard model on the far side of the lines
 * @acks: device acks host transfers
 * @responsive: device starts clocking when the host requests to send
 * @received: bytes clocked in from the host
 * @delayed_us: total busy wait requested by the host
 */
pub struct SimDevice {
	host_clock_low: bool,
	host_data_low: bool,
	mode: Mode,
	phase: u32,
	latched: Vec<bool>,
	ack_ticks: u32,
	settle_reads: u32,
	tx: VecDeque<(bool, bool)>,
	current: (bool, bool),
	responder: Responder,
	pub acks: bool,
	pub responsive: bool,
	pub received: Vec<Received>,
	pub delayed_us: u64,
}

impl SimDevice {
	pub fn new() -> Self {
		SimDevice {
			host_clock_low: false,
			host_data_low: false,
			mode: Mode::Idle,
			phase: 0,
			latched: Vec::new(),
			ack_ticks: 0,
			settle_reads: 0,
			tx: VecDeque::new(),
			current: (true, true),
			responder: Box::new(|_| Vec::new()),
			acks: true,
			responsive: true,
			received: Vec::new(),
			delayed_us: 0,
		}
	}

	//Answer each received byte with the bytes f returns
	pub fn with_responder(mut self, f: impl FnMut(u8) -> Vec<u8> + 'static) -> Self {
		self.responder = Box::new(f);
		self
	}

	pub fn queue_samples(&mut self, samples: &[(bool, bool)]) {
		self.tx.extend(samples.iter().copied());
	}

	pub fn queue_bytes(&mut self, bytes: &[u8]) {
		for &byte in bytes {
			self.queue_samples(&frame_samples(byte));
		}
	}

	pub fn host_is_driving(&self) -> bool {
		self.host_clock_low || self.host_data_low
	}

	fn finish_clocking(&mut self) {
		let mut byte = 0u8;
		for i in 0..8 {
			if self.latched[i] {
				byte |= 1 << i;
			}
		}
		self.received.push(Received {
			byte,
			parity_ok: parity_bit(byte) == self.latched[8],
			stop_ok: self.latched[9],
		});
		self.latched.clear();
		self.current = (true, true);
		if self.acks {
			self.mode = Mode::Ack;
			self.ack_ticks = 0;
		} else {
			self.mode = Mode::Idle;
		}
	}

	fn ack_tick(&mut self) -> bool {
		self.ack_ticks += 1;
		if self.ack_ticks <= 3 {
			return false;
		}
		let byte = self.received[self.received.len() - 1].byte;
		let replies = (self.responder)(byte);
		self.queue_bytes(&replies);
		self.mode = Mode::Settling;
		self.settle_reads = 1;
		true
	}

	fn settle_tick(&mut self) -> bool {
		self.settle_reads -= 1;
		if self.settle_reads == 0 {
			self.mode = Mode::Idle;
		}
		true
	}
}

impl Ps2Lines for SimDevice {
	fn clock_is_high(&mut self) -> bool {
		if self.host_clock_low {
			return false;
		}
		match self.mode {
			Mode::Idle | Mode::Inhibited => {
				self.current = self.tx.pop_front().unwrap_or((true, true));
				self.current.0
			}
			Mode::Clocking => {
				if !self.responsive {
					return true;
				}
				let high = self.phase % 2 == 1;
				self.phase += 1;
				if high {
					self.latched.push(!self.host_data_low);
				} else if self.latched.len() == 10 {
					self.finish_clocking();
				}
				high
			}
			Mode::Ack => self.ack_tick(),
			Mode::Settling => self.settle_tick(),
		}
	}

	fn data_is_high(&mut self) -> bool {
		if self.host_data_low {
			return false;
		}
		match self.mode {
			Mode::Idle => self.current.1,
			Mode::Inhibited | Mode::Clocking => true,
			Mode::Ack => self.ack_tick(),
			Mode::Settling => self.settle_tick(),
		}
	}

	fn pull_clock_low(&mut self) {
		self.host_clock_low = true;
		if self.mode == Mode::Idle {
			self.mode = Mode::Inhibited;
		}
	}

	fn release_clock(&mut self) {
		self.host_clock_low = false;
		if self.mode == Mode::Inhibited {
			if self.host_data_low {
				self.mode = Mode::Clocking;
				self.phase = 0;
				self.latched.clear();
			} else {
				self.mode = Mode::Idle;
			}
		}
	}

	fn pull_data_low(&mut self) {
		self.host_data_low = true;
	}

	fn release_data(&mut self) {
		self.host_data_low = false;
	}

	fn delay_us(&mut self, us: u32) {
		self.delayed_us += u64::from(us);
	}
}
