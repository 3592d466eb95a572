//! Address families and endpoint extraction.
//!
//! Two families are supported:
//! - `Ipv4` — `sockaddr_in`
//! - `Ipv6` — `sockaddr_in6`
//!
//! Each family is a zero-sized marker implementing [`IpFamily`], so the
//! extraction code is written once and monomorphized per family.

mod endpoint;
mod extract;
mod ipv4;
mod ipv6;

pub use self::endpoint::Endpoint;
pub use self::extract::{
	address, address_with, ip_addr, local_addr, peer_addr, try_address, try_address_with,
	try_local_addr, try_peer_addr,
};
pub use self::ipv4::Ipv4;
pub use self::ipv6::Ipv6;

use std::fmt;
use std::io::Write;

/// Longest IPv4 text form plus NUL.
pub const INET_ADDRSTRLEN: usize = 16;
/// Longest IPv6 text form plus NUL.
pub const INET6_ADDRSTRLEN: usize = 46;
/// Size of the scratch buffer addresses are rendered into.
pub const MAX_ADDR_LEN: usize = INET6_ADDRSTRLEN;

/// Parses text and a host-order port into a native structure.
/// Returns 0 on success, an errno-style code otherwise.
pub type ParseFn<R> = fn(&str, u16, &mut R) -> libc::c_int;

/// Renders a native structure as NUL-terminated text into the buffer.
/// Returns 0 on success, an errno-style code otherwise.
pub type RenderFn<R> = fn(&R, &mut [u8]) -> libc::c_int;

/// Trait for address family markers.
///
/// Binds a family to its native structure and to the functions that
/// convert that structure from and to text.
///
/// # Safety
/// `Raw` must be a plain C structure for which every bit pattern is valid
/// (it is read out of a `sockaddr_storage` filled by foreign code), and it
/// must fit inside `sockaddr_storage`.
pub unsafe trait IpFamily {
	/// The native address structure.
	type Raw;

	/// Short family name used in diagnostics.
	const NAME: &'static str;

	/// Render buffer size for this family, including the NUL.
	const ADDRSTRLEN: usize;

	/// Text to structure.
	const PARSE: ParseFn<Self::Raw>;

	/// Structure to text.
	const RENDER: RenderFn<Self::Raw>;

	/// Returns the libc constant for this address family.
	fn raw() -> libc::c_int;

	/// Reads the port, converting from network byte order.
	fn port(raw: &Self::Raw) -> u16;
}

/// Writes `name` followed by a NUL into `dst`.
///
/// Returns `ENOSPC` if it does not fit.
pub(crate) fn write_name(dst: &mut [u8], name: fmt::Arguments<'_>) -> libc::c_int {
	let mut rest: &mut [u8] = dst;
	if rest.write_fmt(name).is_err() {
		return libc::ENOSPC;
	}
	match rest.first_mut() {
		Some(nul) => {
			*nul = 0;
			0
		}
		None => libc::ENOSPC,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn write_name_terminates() {
		let mut buf = [0xffu8; 8];
		assert_eq!(write_name(&mut buf, format_args!("{}", "::1")), 0);
		assert_eq!(&buf[..4], b"::1\0");
	}

	#[test]
	fn write_name_needs_room_for_nul() {
		let mut buf = [0u8; 3];
		assert_eq!(write_name(&mut buf, format_args!("{}", "::1")), libc::ENOSPC);
		let mut buf = [0u8; 2];
		assert_eq!(write_name(&mut buf, format_args!("{}", "::1")), libc::ENOSPC);
	}
}
