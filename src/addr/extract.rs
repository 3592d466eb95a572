use std::mem::size_of;
use std::os::fd::AsRawFd;

use tracing::{debug, trace};

use crate::addr::{Endpoint, IpFamily, MAX_ADDR_LEN};
use crate::error::{ResolveError, errno};

/// Builds a native structure for family `F` from text and a host-order port.
pub fn ip_addr<F: IpFamily>(ip: &str, port: u16) -> Result<F::Raw, ResolveError> {
	// IpFamily guarantees any bit pattern is a valid Raw
	let mut raw: F::Raw = unsafe { std::mem::zeroed() };
	let status = (F::PARSE)(ip, port, &mut raw);
	if status != 0 {
		return Err(ResolveError::Parse { addr: ip.to_owned(), status });
	}
	Ok(raw)
}

/// Renders a native structure into an [`Endpoint`].
pub fn try_address<F: IpFamily>(raw: &F::Raw) -> Result<Endpoint, ResolveError> {
	let mut name = [0u8; MAX_ADDR_LEN];
	let len = F::ADDRSTRLEN.min(MAX_ADDR_LEN);

	let status = (F::RENDER)(raw, &mut name[..len]);
	if status != 0 {
		return Err(ResolveError::Render { status });
	}

	let end = name[..len].iter().position(|&b| b == 0).unwrap_or(len);
	let ip = std::str::from_utf8(&name[..end])
		.map_err(|_| ResolveError::Render { status: libc::EINVAL })?;

	let ep = Endpoint::new(ip.to_owned(), F::port(raw));
	trace!(family = F::NAME, endpoint = %ep, "address resolved");
	Ok(ep)
}

/// Renders a native structure into an [`Endpoint`].
///
/// Any failure yields `Endpoint::default()`.
pub fn address<F: IpFamily>(raw: &F::Raw) -> Endpoint {
	try_address::<F>(raw).unwrap_or_else(|err| {
		debug!(family = F::NAME, %err, "address render failed");
		Endpoint::default()
	})
}

/// Obtains a native structure through `lookup`, then renders it.
///
/// `lookup` receives `handle`, a zeroed `sockaddr_storage`, and its length
/// (in: capacity, out: bytes written). It returns 0 on success.
/// The written structure must be of family `F`.
pub fn try_address_with<F, H, L>(lookup: L, handle: &H) -> Result<Endpoint, ResolveError>
where
	F: IpFamily,
	H: ?Sized,
	L: FnOnce(&H, &mut libc::sockaddr_storage, &mut libc::socklen_t) -> libc::c_int,
{
	const {
		assert!(size_of::<F::Raw>() <= size_of::<libc::sockaddr_storage>());
	}

	let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
	let mut len = size_of::<libc::sockaddr_storage>() as libc::socklen_t;

	let status = lookup(handle, &mut storage, &mut len);
	if status != 0 {
		return Err(ResolveError::Lookup { status });
	}

	let need = size_of::<F::Raw>();
	if (len as usize) < need {
		return Err(ResolveError::Truncated { len: len as u32, need });
	}

	let found = storage.ss_family as libc::c_int;
	if found != F::raw() {
		return Err(ResolveError::FamilyMismatch { expected: F::raw(), found });
	}

	// size checked above; IpFamily guarantees any bit pattern is valid
	let raw = unsafe { std::ptr::read_unaligned(&storage as *const _ as *const F::Raw) };
	try_address::<F>(&raw)
}

/// Obtains a native structure through `lookup`, then renders it.
///
/// Any failure yields `Endpoint::default()`; `lookup` failures skip the
/// render step entirely.
pub fn address_with<F, H, L>(lookup: L, handle: &H) -> Endpoint
where
	F: IpFamily,
	H: ?Sized,
	L: FnOnce(&H, &mut libc::sockaddr_storage, &mut libc::socklen_t) -> libc::c_int,
{
	try_address_with::<F, H, L>(lookup, handle).unwrap_or_else(|err| {
		debug!(family = F::NAME, %err, "address lookup failed");
		Endpoint::default()
	})
}

fn sockname<S: AsRawFd + ?Sized>(
	socket: &S,
	storage: &mut libc::sockaddr_storage,
	len: &mut libc::socklen_t,
) -> libc::c_int {
	let result = unsafe {
		libc::getsockname(
			socket.as_raw_fd(),
			storage as *mut _ as *mut libc::sockaddr,
			len,
		)
	};
	if result == -1 { errno() } else { 0 }
}

fn peername<S: AsRawFd + ?Sized>(
	socket: &S,
	storage: &mut libc::sockaddr_storage,
	len: &mut libc::socklen_t,
) -> libc::c_int {
	let result = unsafe {
		libc::getpeername(
			socket.as_raw_fd(),
			storage as *mut _ as *mut libc::sockaddr,
			len,
		)
	};
	if result == -1 { errno() } else { 0 }
}

/// Returns the local endpoint of a socket.
pub fn try_local_addr<F: IpFamily, S: AsRawFd + ?Sized>(socket: &S) -> Result<Endpoint, ResolveError> {
	try_address_with::<F, S, _>(sockname::<S>, socket)
}

/// Returns the local endpoint of a socket, or the default endpoint.
pub fn local_addr<F: IpFamily, S: AsRawFd + ?Sized>(socket: &S) -> Endpoint {
	address_with::<F, S, _>(sockname::<S>, socket)
}

/// Returns the remote endpoint of a connected socket.
pub fn try_peer_addr<F: IpFamily, S: AsRawFd + ?Sized>(socket: &S) -> Result<Endpoint, ResolveError> {
	try_address_with::<F, S, _>(peername::<S>, socket)
}

/// Returns the remote endpoint of a connected socket, or the default endpoint.
pub fn peer_addr<F: IpFamily, S: AsRawFd + ?Sized>(socket: &S) -> Endpoint {
	address_with::<F, S, _>(peername::<S>, socket)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::addr::{INET_ADDRSTRLEN, Ipv4, ParseFn, RenderFn};
	use std::cell::Cell;

	thread_local! {
		static RENDERED: Cell<bool> = const { Cell::new(false) };
	}

	/// Ipv4 layout with a render function that always fails.
	struct Broken;

	unsafe impl IpFamily for Broken {
		type Raw = libc::sockaddr_in;

		const NAME: &'static str = "broken";
		const ADDRSTRLEN: usize = INET_ADDRSTRLEN;
		const PARSE: ParseFn<libc::sockaddr_in> = <Ipv4 as IpFamily>::PARSE;
		const RENDER: RenderFn<libc::sockaddr_in> = fail_render;

		fn raw() -> libc::c_int {
			libc::AF_INET
		}

		fn port(raw: &libc::sockaddr_in) -> u16 {
			u16::from_be(raw.sin_port)
		}
	}

	fn fail_render(_: &libc::sockaddr_in, _: &mut [u8]) -> libc::c_int {
		RENDERED.with(|r| r.set(true));
		-libc::EINVAL
	}

	#[test]
	fn render_failure_yields_default() {
		let raw = ip_addr::<Broken>("127.0.0.1", 8080).unwrap();
		assert_eq!(address::<Broken>(&raw), Endpoint::default());
		assert_eq!(
			try_address::<Broken>(&raw),
			Err(ResolveError::Render { status: -libc::EINVAL })
		);
	}

	#[test]
	fn lookup_failure_skips_render() {
		RENDERED.with(|r| r.set(false));
		let ep = address_with::<Broken, _, _>(
			|_: &(), _: &mut libc::sockaddr_storage, _: &mut libc::socklen_t| libc::EBADF,
			&(),
		);
		assert!(ep.is_empty());
		assert!(!RENDERED.with(|r| r.get()));
	}

	#[test]
	fn parse_failure_reports_text() {
		assert_eq!(
			ip_addr::<Ipv4>("not-an-ip", 1).unwrap_err(),
			ResolveError::Parse { addr: "not-an-ip".into(), status: libc::EINVAL }
		);
	}
}
