//! Typed flag sets and socket address extraction.
//!
//! - [`Flags`] — a bitmask bound to one enum, declared with [`flag_enum!`]
//! - [`FileDescriptor`] — a non-owning descriptor number
//! - [`IpFamily`] — per-family binding of native structure, parse and render
//! - [`address`] / [`address_with`] — native structure to [`Endpoint`]

mod addr;
mod error;
mod fd;
mod flags;
mod types;

pub use self::addr::{
	Endpoint, INET_ADDRSTRLEN, INET6_ADDRSTRLEN, IpFamily, Ipv4, Ipv6, MAX_ADDR_LEN, ParseFn,
	RenderFn, address, address_with, ip_addr, local_addr, peer_addr, try_address,
	try_address_with, try_local_addr, try_peer_addr,
};
pub use self::error::{ResolveError, errno};
pub use self::fd::{FileDescriptor, STDERR, STDIN, STDOUT};
pub use self::flags::{FlagBits, FlagEnum, Flags};
pub use self::types::{Stat, TimeSpec, WinSize};

#[doc(hidden)]
pub use self::flags::private as __private;
