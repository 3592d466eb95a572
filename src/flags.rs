//! Typed bitmasks over `#[repr(int)]` enums.
//!
//! A `Flags<E>` carries OR-combined values of one enum `E` and nothing else:
//!
//! ```
//! use netprim::{flag_enum, Flags};
//!
//! flag_enum! {
//!     pub enum RunMode: u32 {
//!         Once = 1,
//!         NoWait = 2,
//!     }
//! }
//!
//! let mode = RunMode::Once | RunMode::NoWait;
//! assert_eq!(mode.bits(), 3);
//! assert!((mode & RunMode::NoWait).any());
//! assert!(Flags::<RunMode>::default().is_empty());
//! ```
//!
//! Mixing two flag domains does not compile:
//!
//! ```compile_fail
//! use netprim::{flag_enum, Flags};
//!
//! flag_enum! { enum Open: u8 { Read = 1 } }
//! flag_enum! { enum Poll: u8 { Readable = 1 } }
//!
//! let _ = Flags::from(Open::Read) | Poll::Readable;
//! ```
//!
//! Neither does a flag set over something that is not a flag enum:
//!
//! ```compile_fail
//! let _ = netprim::Flags::<u32>::from_bits(1);
//! ```
//!
//! Nor can a struct pose as a flag enum by implementing the trait by hand:
//!
//! ```compile_fail
//! #[derive(Clone, Copy)]
//! struct NotEnum;
//!
//! impl netprim::FlagEnum for NotEnum {
//!     type Repr = u8;
//!     fn bits(self) -> u8 { 1 }
//! }
//!
//! let _ = netprim::Flags::from(NotEnum);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Integer types usable as the storage of a flag set.
pub trait FlagBits:
	Copy + Eq + Hash + Default + fmt::Debug + BitOr<Output = Self> + BitAnd<Output = Self>
{
}

macro_rules! impl_flag_bits {
	($($t:ty),*) => {
		$(impl FlagBits for $t {})*
	};
}

impl_flag_bits!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// An enum whose variants are bit values.
///
/// Sealed: only [`flag_enum!`](crate::flag_enum) implements it, and the
/// macro only emits fieldless `#[repr(int)]` enums.
pub trait FlagEnum: private::Sealed + Copy + 'static {
	/// The enum's `#[repr]` integer.
	type Repr: FlagBits;

	/// Returns the variant's discriminant.
	fn bits(self) -> Self::Repr;
}

/// Declares a `#[repr(int)]` enum usable inside [`Flags`](crate::Flags).
///
/// The enum gets `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and `Hash`
/// derives, and `a | b` on two variants yields a `Flags` of the enum.
#[macro_export]
macro_rules! flag_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident : $repr:ident {
			$( $(#[$vmeta:meta])* $variant:ident = $value:expr ),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		#[repr($repr)]
		$vis enum $name {
			$( $(#[$vmeta])* $variant = $value ),*
		}

		impl $crate::__private::Sealed for $name {}

		impl $crate::FlagEnum for $name {
			type Repr = $repr;

			#[inline]
			fn bits(self) -> $repr {
				self as $repr
			}
		}

		impl ::core::ops::BitOr for $name {
			type Output = $crate::Flags<$name>;

			#[inline]
			fn bitor(self, rhs: $name) -> $crate::Flags<$name> {
				$crate::Flags::from(self) | rhs
			}
		}
	};
}

#[doc(hidden)]
pub mod private {
	/// Not public API; implemented by `flag_enum!` only.
	pub trait Sealed {}
}

/// A set of flags drawn from enum `E`, stored as `E`'s repr integer.
///
/// Composition never mutates its operands; `|=` and `&=` are the only
/// in-place forms.
pub struct Flags<E: FlagEnum> {
	bits: E::Repr,
}

impl<E: FlagEnum> Flags<E> {
	/// Creates an empty set.
	#[inline]
	pub fn empty() -> Self {
		Self { bits: E::Repr::default() }
	}

	/// Creates a set from a raw bit pattern, stored verbatim.
	///
	/// Use for masks coming back from native APIs.
	#[inline]
	pub const fn from_bits(bits: E::Repr) -> Self {
		Self { bits }
	}

	/// Returns the raw bit pattern.
	#[inline]
	pub fn bits(self) -> E::Repr {
		self.bits
	}

	/// Returns true if no bit is set.
	#[inline]
	pub fn is_empty(self) -> bool {
		self.bits == E::Repr::default()
	}

	/// Returns true if any bit is set.
	#[inline]
	pub fn any(self) -> bool {
		!self.is_empty()
	}

	/// Returns true if every bit of `other` is also set in `self`.
	#[inline]
	pub fn contains(self, other: impl Into<Self>) -> bool {
		let other = other.into();
		(self.bits & other.bits) == other.bits
	}
}

impl<E: FlagEnum> Default for Flags<E> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<E: FlagEnum> From<E> for Flags<E> {
	#[inline]
	fn from(flag: E) -> Self {
		Self { bits: flag.bits() }
	}
}

impl<E: FlagEnum> From<Flags<E>> for bool {
	#[inline]
	fn from(flags: Flags<E>) -> bool {
		flags.any()
	}
}

impl<E: FlagEnum> Clone for Flags<E> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<E: FlagEnum> Copy for Flags<E> {}

impl<E: FlagEnum> PartialEq for Flags<E> {
	fn eq(&self, other: &Self) -> bool {
		self.bits == other.bits
	}
}

impl<E: FlagEnum> Eq for Flags<E> {}

impl<E: FlagEnum> PartialEq<E> for Flags<E> {
	fn eq(&self, other: &E) -> bool {
		self.bits == other.bits()
	}
}

impl<E: FlagEnum> Hash for Flags<E> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.bits.hash(state);
	}
}

impl<E: FlagEnum> fmt::Debug for Flags<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Flags").field(&self.bits).finish()
	}
}

impl<E: FlagEnum> BitOr for Flags<E> {
	type Output = Self;

	#[inline]
	fn bitor(self, rhs: Self) -> Self {
		Self { bits: self.bits | rhs.bits }
	}
}

impl<E: FlagEnum> BitOr<E> for Flags<E> {
	type Output = Self;

	#[inline]
	fn bitor(self, rhs: E) -> Self {
		Self { bits: self.bits | rhs.bits() }
	}
}

impl<E: FlagEnum> BitAnd for Flags<E> {
	type Output = Self;

	#[inline]
	fn bitand(self, rhs: Self) -> Self {
		Self { bits: self.bits & rhs.bits }
	}
}

impl<E: FlagEnum> BitAnd<E> for Flags<E> {
	type Output = Self;

	#[inline]
	fn bitand(self, rhs: E) -> Self {
		Self { bits: self.bits & rhs.bits() }
	}
}

impl<E: FlagEnum, R: Into<Flags<E>>> BitOrAssign<R> for Flags<E> {
	fn bitor_assign(&mut self, rhs: R) {
		*self = *self | rhs.into();
	}
}

impl<E: FlagEnum, R: Into<Flags<E>>> BitAndAssign<R> for Flags<E> {
	fn bitand_assign(&mut self, rhs: R) {
		*self = *self & rhs.into();
	}
}
