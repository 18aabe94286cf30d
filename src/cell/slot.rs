//! `CacheSlot` — the two-state storage location behind every cache.
//!
//! A slot is either `Invalid` or `Holding` exactly one value. It is a plain
//! enum rather than an optional value plus a flag, so `CacheSlot<Option<T>>`
//! can hold `None` as a legitimately computed value.

/// Storage for at most one computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheSlot<T> {
    /// No computed value is held.
    Invalid,
    /// Holds the most recently computed value.
    Holding(T),
}

impl<T> CacheSlot<T> {
    /// Returns `true` if the slot holds a value.
    #[inline]
    pub const fn is_holding(&self) -> bool {
        matches!(self, Self::Holding(_))
    }

    /// Returns a shared reference to the held value, if any.
    #[inline]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Holding(value) => Some(value),
            Self::Invalid => None,
        }
    }

    /// Returns an exclusive reference to the held value, if any.
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Holding(value) => Some(value),
            Self::Invalid => None,
        }
    }

    /// Moves the held value out, leaving the slot `Invalid`.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        core::mem::replace(self, Self::Invalid).into_option()
    }

    /// Drops the held value, if any, leaving the slot `Invalid`.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::Invalid;
    }

    /// Converts the slot into an `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Holding(value) => Some(value),
            Self::Invalid => None,
        }
    }

    /// Returns the held value, filling the slot with `f()` first if it is `Invalid`.
    ///
    /// The slot is written only after `f` returns, so a panicking `f` leaves it `Invalid`.
    #[inline]
    pub fn get_or_insert_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if let Self::Invalid = self {
            *self = Self::Holding(f());
        }

        match self {
            Self::Holding(value) => value,
            Self::Invalid => unreachable!("slot was filled above"),
        }
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// On `Err` the error is returned unchanged and the slot stays `Invalid`.
    #[inline]
    pub fn get_or_try_insert_with<E, F>(&mut self, f: F) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Self::Invalid = self {
            *self = Self::Holding(f()?);
        }

        match self {
            Self::Holding(value) => Ok(value),
            Self::Invalid => unreachable!("slot was filled above"),
        }
    }
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::Invalid
    }
}

impl<T> From<Option<T>> for CacheSlot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Holding(value),
            None => Self::Invalid,
        }
    }
}

impl<T> From<CacheSlot<T>> for Option<T> {
    fn from(slot: CacheSlot<T>) -> Self {
        slot.into_option()
    }
}
