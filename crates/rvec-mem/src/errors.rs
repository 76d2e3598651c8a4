#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityError {
    /// A reservation of zero, or below the current length.
    InvalidReservation {
        len: usize,
        requested: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    MaxCapacityExceeded {
        max_capacity: usize,
    },
    ZeroSizedElement,
    InvalidAlignment {
        align: usize,
    },
}

impl core::fmt::Display for CapacityError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidReservation { len, requested } => {
                write!(f, "invalid reservation of {} with len {}", requested, len)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::MaxCapacityExceeded { max_capacity } => {
                write!(f, "exceeded maximum capacity of {}", max_capacity)
            },
            Self::ZeroSizedElement => {
                write!(f, "size of element type is zero")
            },
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {} is not a power of two dividing the element size", align)
            },
        }
    }
}

impl core::error::Error for CapacityError {}
