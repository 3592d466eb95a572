use std::net::Ipv4Addr;

use crate::addr::{INET_ADDRSTRLEN, IpFamily, ParseFn, RenderFn, write_name};

/// IPv4 address family marker.
///
/// Native structure is `sockaddr_in` (16 bytes, e.g. 127.0.0.1).
pub struct Ipv4;

unsafe impl IpFamily for Ipv4 {
	type Raw = libc::sockaddr_in;

	const NAME: &'static str = "ipv4";
	const ADDRSTRLEN: usize = INET_ADDRSTRLEN;
	const PARSE: ParseFn<libc::sockaddr_in> = ip4_addr;
	const RENDER: RenderFn<libc::sockaddr_in> = ip4_name;

	#[inline]
	fn raw() -> libc::c_int {
		libc::AF_INET
	}

	#[inline]
	fn port(raw: &libc::sockaddr_in) -> u16 {
		u16::from_be(raw.sin_port)
	}
}

/// Fills `out` from dotted-quad text and a host-order port.
fn ip4_addr(ip: &str, port: u16, out: &mut libc::sockaddr_in) -> libc::c_int {
	let Ok(ip) = ip.parse::<Ipv4Addr>() else {
		return libc::EINVAL;
	};
	*out = unsafe { std::mem::zeroed() };
	out.sin_family = libc::AF_INET as libc::sa_family_t;
	out.sin_port = port.to_be();
	// s_addr is stored in network order, i.e. octets in memory order
	out.sin_addr.s_addr = u32::from_ne_bytes(ip.octets());
	0
}

fn ip4_name(raw: &libc::sockaddr_in, dst: &mut [u8]) -> libc::c_int {
	let ip = Ipv4Addr::from(raw.sin_addr.s_addr.to_ne_bytes());
	write_name(dst, format_args!("{}", ip))
}
