use std::os::fd::RawFd;

/// A file descriptor number.
///
/// Does not own the descriptor: nothing is closed on drop, and the
/// descriptor's lifetime belongs to whoever opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileDescriptor {
	fd: RawFd,
}

/// Standard input.
pub const STDIN: FileDescriptor = FileDescriptor::new(0);
/// Standard output.
pub const STDOUT: FileDescriptor = FileDescriptor::new(1);
/// Standard error.
pub const STDERR: FileDescriptor = FileDescriptor::new(2);

impl FileDescriptor {
	/// Wraps a raw descriptor number.
	#[inline]
	pub const fn new(fd: RawFd) -> Self {
		Self { fd }
	}

	/// Returns the raw descriptor number.
	#[inline]
	pub const fn get(self) -> RawFd {
		self.fd
	}
}

impl From<RawFd> for FileDescriptor {
	fn from(fd: RawFd) -> Self {
		Self::new(fd)
	}
}

impl From<FileDescriptor> for RawFd {
	fn from(fd: FileDescriptor) -> Self {
		fd.fd
	}
}

impl PartialEq<RawFd> for FileDescriptor {
	fn eq(&self, other: &RawFd) -> bool {
		self.fd == *other
	}
}

impl PartialEq<FileDescriptor> for RawFd {
	fn eq(&self, other: &FileDescriptor) -> bool {
		*self == other.fd
	}
}

impl std::os::fd::AsRawFd for FileDescriptor {
	fn as_raw_fd(&self) -> RawFd {
		self.fd
	}
}
