/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinSize {
	pub width: i32,
	pub height: i32,
}

impl From<libc::winsize> for WinSize {
	fn from(ws: libc::winsize) -> Self {
		Self {
			width: i32::from(ws.ws_col),
			height: i32::from(ws.ws_row),
		}
	}
}

pub type TimeSpec = libc::timespec;
pub type Stat = libc::stat;
