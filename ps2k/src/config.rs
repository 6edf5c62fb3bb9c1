/*
 * Driver Timing Configuration
 *
 * Wait limits are counted in loop iterations. Transmit waits delay 1us per
 * iteration; receive-side limits count polls, so their wall time depends on
 * how often the caller polls.
 */

/*
 * struct Config - Protocol timing knobs
 * @inhibit_us: how long the host holds clock low before a transfer (>= 100us)
 * @request_timeout: wait for the device to start clocking a host transfer
 * @bit_timeout: wait for each clock edge while transferring
 * @ack_timeout: wait for the device ack after the stop bit
 * @stall_limit: polls without a clock edge before a half frame is dropped
 * @response_polls: polls spent waiting for a command response
 * @reset_polls: polls spent waiting for the self-test result after reset
 * @command_retries: extra transfers of one command after a RESEND answer
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	pub inhibit_us: u32,
	pub request_timeout: u32,
	pub bit_timeout: u32,
	pub ack_timeout: u32,
	pub stall_limit: Option<u32>,
	pub response_polls: u32,
	pub reset_polls: u32,
	pub command_retries: u8,
}

impl Config {
	pub const DEFAULT: Config = Config {
		inhibit_us: 120,
		request_timeout: 15_000, //Devices must start clocking within 15ms
		bit_timeout: 2_000,
		ack_timeout: 2_000,
		stall_limit: Some(20_000),
		response_polls: 200_000,
		reset_polls: 2_000_000, //Self test takes 500-750ms
		command_retries: 2, //Three transfers in all
	};
}

impl Default for Config {
	fn default() -> Self {
		Self::DEFAULT
	}
}
