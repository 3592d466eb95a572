use std::ffi::CString;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::addr::{INET6_ADDRSTRLEN, IpFamily, ParseFn, RenderFn, write_name};

/// IPv6 address family marker.
///
/// Native structure is `sockaddr_in6` (28 bytes, e.g. ::1).
pub struct Ipv6;

unsafe impl IpFamily for Ipv6 {
	type Raw = libc::sockaddr_in6;

	const NAME: &'static str = "ipv6";
	const ADDRSTRLEN: usize = INET6_ADDRSTRLEN;
	const PARSE: ParseFn<libc::sockaddr_in6> = ip6_addr;
	const RENDER: RenderFn<libc::sockaddr_in6> = ip6_name;

	#[inline]
	fn raw() -> libc::c_int {
		libc::AF_INET6
	}

	#[inline]
	fn port(raw: &libc::sockaddr_in6) -> u16 {
		u16::from_be(raw.sin6_port)
	}
}

/// Fills `out` from IPv6 text and a host-order port.
///
/// A `%zone` suffix sets the scope id: numeric zones are used as is,
/// anything else is looked up as an interface name.
fn ip6_addr(ip: &str, port: u16, out: &mut libc::sockaddr_in6) -> libc::c_int {
	let (ip, zone) = match ip.split_once('%') {
		Some((ip, zone)) => (ip, Some(zone)),
		None => (ip, None),
	};
	let Ok(ip) = ip.parse::<Ipv6Addr>() else {
		return libc::EINVAL;
	};
	*out = unsafe { std::mem::zeroed() };
	out.sin6_family = libc::AF_INET6 as libc::sa_family_t;
	out.sin6_port = port.to_be();
	out.sin6_addr.s6_addr = ip.octets();
	out.sin6_scope_id = zone.map_or(0, scope_id);
	0
}

/// Unknown interface names yield scope 0.
fn scope_id(zone: &str) -> u32 {
	if let Ok(id) = zone.parse::<u32>() {
		return id;
	}
	match CString::new(zone) {
		Ok(name) => unsafe { libc::if_nametoindex(name.as_ptr()) },
		Err(_) => 0,
	}
}

/// Same text as `inet_ntop`: IPv4-compatible (`::a.b.c.d`) and
/// IPv4-mapped (`::ffff:a.b.c.d`) addresses keep a dotted tail.
fn ip6_name(raw: &libc::sockaddr_in6, dst: &mut [u8]) -> libc::c_int {
	let octets = raw.sin6_addr.s6_addr;
	let ip = Ipv6Addr::from(octets);
	let s = ip.segments();
	let tail = Ipv4Addr::new(octets[12], octets[13], octets[14], octets[15]);

	// leading zero run must be exactly 6 groups, or 5 groups then ffff
	if s[..5] == [0; 5] {
		if s[5] == 0xffff {
			return write_name(dst, format_args!("::ffff:{}", tail));
		}
		if s[5] == 0 && s[6] != 0 {
			return write_name(dst, format_args!("::{}", tail));
		}
	}
	write_name(dst, format_args!("{}", ip))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(ip: &str, port: u16) -> libc::sockaddr_in6 {
		let mut raw: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
		assert_eq!(ip6_addr(ip, port, &mut raw), 0, "{ip}");
		raw
	}

	#[test]
	fn parse_stores_network_order() {
		let raw = parse("::1", 443);
		assert_eq!(raw.sin6_family as libc::c_int, libc::AF_INET6);
		assert_eq!(raw.sin6_port.to_ne_bytes(), [0x01, 0xbb]);
		assert_eq!(raw.sin6_addr.s6_addr[15], 1);
		assert_eq!(raw.sin6_scope_id, 0);
		assert_eq!(Ipv6::port(&raw), 443);
	}

	#[test]
	fn numeric_zone_sets_scope() {
		assert_eq!(parse("fe80::1%7", 0).sin6_scope_id, 7);
	}

	#[test]
	fn loopback_interface_zone_resolves() {
		let raw = parse("fe80::1%lo", 0);
		let lo = unsafe { libc::if_nametoindex(c"lo".as_ptr()) };
		assert_eq!(raw.sin6_scope_id, lo);
	}

	#[test]
	fn unknown_zone_is_scope_zero() {
		assert_eq!(parse("fe80::1%no-such-if0", 0).sin6_scope_id, 0);
	}

	#[test]
	fn parse_rejects_non_ipv6() {
		let mut raw: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
		for bad in ["", "127.0.0.1", ":::", "fe80::1::2", "%lo"] {
			assert_eq!(ip6_addr(bad, 1, &mut raw), libc::EINVAL, "{bad}");
		}
	}

	#[test]
	fn render_uses_compressed_form() {
		let mut buf = [0u8; INET6_ADDRSTRLEN];
		assert_eq!(ip6_name(&parse("2001:0db8:0000:0000:0000:0000:0000:0001", 0), &mut buf), 0);
		assert!(buf.starts_with(b"2001:db8::1\0"));
	}

	fn render(ip: &str) -> String {
		let mut buf = [0u8; INET6_ADDRSTRLEN];
		assert_eq!(ip6_name(&parse(ip, 0), &mut buf), 0, "{ip}");
		let end = buf.iter().position(|&b| b == 0).unwrap();
		String::from_utf8(buf[..end].to_vec()).unwrap()
	}

	#[test]
	fn render_keeps_dotted_ipv4_tail() {
		assert_eq!(render("::1.2.3.4"), "::1.2.3.4");
		assert_eq!(render("::102:304"), "::1.2.3.4");
		assert_eq!(render("::ffff:1.2.3.4"), "::ffff:1.2.3.4");
		assert_eq!(render("::ffff:0:0"), "::ffff:0.0.0.0");
		assert_eq!(render("::1:2"), "::0.1.0.2");
	}

	#[test]
	fn render_short_zero_runs_stay_hex() {
		assert_eq!(render("::2"), "::2");
		assert_eq!(render("::1"), "::1");
		assert_eq!(render("::"), "::");
		assert_eq!(render("1::1.2.3.4"), "1::102:304");
		assert_eq!(render("::1:ffff:1.2.3.4"), "::1:ffff:102:304");
	}

	#[test]
	fn render_longest_address_fits() {
		let mut buf = [0u8; INET6_ADDRSTRLEN];
		let raw = parse("ffff:ffff:ffff:ffff:ffff:ffff:255.255.255.255", 0);
		assert_eq!(ip6_name(&raw, &mut buf), 0);
	}
}
