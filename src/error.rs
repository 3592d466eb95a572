/// Address resolution errors.
///
/// `status` fields carry the errno-style code returned by the failing
/// function. Both `-EINVAL` and `EINVAL` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("address lookup failed: {}", status_to_str(*.status))]
	Lookup { status: i32 },

	#[error("address render failed: {}", status_to_str(*.status))]
	Render { status: i32 },

	#[error("parse({addr}) failed: {}", status_to_str(*.status))]
	Parse { addr: String, status: i32 },

	#[error("address family mismatch: expected {expected}, found {found}")]
	FamilyMismatch { expected: i32, found: i32 },

	#[error("address truncated: got {len} bytes, need {need}")]
	Truncated { len: u32, need: usize },
}

impl ResolveError {
	/// Returns the errno this error maps to.
	pub fn errno(&self) -> i32 {
		match self {
			ResolveError::Lookup { status } => status.abs(),
			ResolveError::Render { status } => status.abs(),
			ResolveError::Parse { status, .. } => status.abs(),
			ResolveError::FamilyMismatch { .. } => libc::EAFNOSUPPORT,
			ResolveError::Truncated { .. } => libc::EINVAL,
		}
	}
}

/// Returns current errno value.
#[inline]
pub fn errno() -> i32 {
	unsafe { *libc::__errno_location() }
}

/// Converts an errno-style status to human-readable string.
fn status_to_str(status: i32) -> String {
	match status.abs() {
		libc::EAFNOSUPPORT => "address family not supported".into(),
		libc::EBADF => "bad file descriptor".into(),
		libc::EFAULT => "bad address".into(),
		libc::EINVAL => "invalid argument".into(),
		libc::ENOBUFS => "no buffer space available".into(),
		libc::ENOSPC => "no space left in buffer".into(),
		libc::ENOTCONN => "not connected".into(),
		libc::ENOTSOCK => "not a socket".into(),
		_ => format!("status {}", status),
	}
}

/// Maps errno to std::io::ErrorKind.
fn errno_to_kind(errno: i32) -> std::io::ErrorKind {
	match errno {
		libc::EAFNOSUPPORT => std::io::ErrorKind::Unsupported,
		libc::EINVAL | libc::EBADF | libc::ENOTSOCK => std::io::ErrorKind::InvalidInput,
		libc::ENOTCONN => std::io::ErrorKind::NotConnected,
		libc::ENOBUFS | libc::ENOSPC => std::io::ErrorKind::OutOfMemory,
		_ => std::io::ErrorKind::Other,
	}
}

impl From<ResolveError> for std::io::Error {
	fn from(err: ResolveError) -> Self {
		std::io::Error::new(errno_to_kind(err.errno()), err)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_sign_is_ignored() {
		let neg = ResolveError::Render { status: -libc::ENOSPC };
		let pos = ResolveError::Render { status: libc::ENOSPC };
		assert_eq!(neg.errno(), pos.errno());
		assert_eq!(neg.to_string(), "address render failed: no space left in buffer");
	}

	#[test]
	fn unknown_status_is_printed_raw() {
		let err = ResolveError::Lookup { status: 9999 };
		assert_eq!(err.to_string(), "address lookup failed: status 9999");
	}

	#[test]
	fn maps_to_io_error_kind() {
		let err: std::io::Error = ResolveError::FamilyMismatch {
			expected: libc::AF_INET,
			found: libc::AF_INET6,
		}.into();
		assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);

		let err: std::io::Error = ResolveError::Parse {
			addr: "nope".into(),
			status: libc::EINVAL,
		}.into();
		assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

		let err: std::io::Error = ResolveError::Lookup { status: libc::ENOTCONN }.into();
		assert_eq!(err.kind(), std::io::ErrorKind::NotConnected);
	}
}
