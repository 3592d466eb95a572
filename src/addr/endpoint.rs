use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// One end of a connection: textual IP and host-order port.
///
/// The default value (empty ip, port 0) is what the infallible extraction
/// functions return on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Endpoint {
	ip: String,
	port: u16,
}

impl Endpoint {
	pub(crate) fn new(ip: String, port: u16) -> Self {
		Self { ip, port }
	}

	/// Returns the textual IP.
	pub fn ip(&self) -> &str {
		&self.ip
	}

	/// Returns the port.
	pub fn port(&self) -> u16 {
		self.port
	}

	/// Returns true for the default (unresolved) endpoint.
	pub fn is_empty(&self) -> bool {
		self.ip.is_empty() && self.port == 0
	}

	/// Converts to a std socket address, `None` if the ip is not parseable.
	pub fn to_socket_addr(&self) -> Option<SocketAddr> {
		let ip: IpAddr = self.ip.parse().ok()?;
		Some(SocketAddr::new(ip, self.port))
	}
}

/// `ip:port`, IPv6 in brackets. The default endpoint prints nothing.
impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			Ok(())
		} else if self.ip.contains(':') {
			write!(f, "[{}]:{}", self.ip, self.port)
		} else {
			write!(f, "{}:{}", self.ip, self.port)
		}
	}
}

impl From<Endpoint> for (String, u16) {
	fn from(ep: Endpoint) -> Self {
		(ep.ip, ep.port)
	}
}
