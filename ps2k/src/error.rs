use core::fmt;

use crate::frame::FrameError;

/*
 * enum Ps2Error - Failures of host-initiated traffic
 * @Timeout: device stopped clocking, or never answered
 * @NoAck: device clocked the byte in but did not ack it
 * @UnexpectedResponse: device answered a command with something else
 * @CommandFailed: device kept asking for a resend
 * @SelfTestFailed: reset completed with BAT failure
 * @Frame: a response frame was malformed
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ps2Error {
	Timeout,
	NoAck,
	UnexpectedResponse(u8),
	CommandFailed,
	SelfTestFailed,
	Frame(FrameError),
}

impl Ps2Error {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Timeout => "PS/2 timeout waiting for device",
			Self::NoAck => "PS/2 device did not ack transfer",
			Self::UnexpectedResponse(_) => "PS/2 unexpected device response",
			Self::CommandFailed => "PS/2 device command failed",
			Self::SelfTestFailed => "PS/2 keyboard self-test failed",
			Self::Frame(_) => "PS/2 malformed response frame",
		}
	}
}

impl From<FrameError> for Ps2Error {
	fn from(err: FrameError) -> Self {
		Ps2Error::Frame(err)
	}
}

impl fmt::Display for Ps2Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnexpectedResponse(byte) => write!(f, "{} ({:#04x})", self.as_str(), byte),
			Self::Frame(err) => write!(f, "{} ({})", self.as_str(), err.as_str()),
			_ => f.write_str(self.as_str()),
		}
	}
}
