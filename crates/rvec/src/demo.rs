use core::{
    error,
    fmt::{self, Display, Formatter},
};

use std::io::{self, Write};

use rvec_mem::{Allocator, CapacityError, GlobalRawVec, RawVec, GLOBAL_ALLOC};

/// Reservations made by the default demo.
pub const DEMO_CAPACITIES: [usize; 2] = [2, 1];

#[derive(Debug)]
pub enum DemoError {
    Capacity(CapacityError),
    Io(io::Error),
}

impl DemoError {

    #[inline(always)]
    pub fn is_alloc_failure(&self) -> bool {
        matches!(self, Self::Capacity(CapacityError::AllocFailed { .. }))
    }

    /// Line the program reports before exiting.
    pub fn diagnostic(&self) -> String {
        if self.is_alloc_failure() {
            "Error allocating vector".to_string()
        } else {
            rvec_error::chain(self)
        }
    }
}

impl Display for DemoError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity(_) => write!(f, "reservation failed"),
            Self::Io(_) => write!(f, "failed to write vector description"),
        }
    }
}

impl error::Error for DemoError {

    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Capacity(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<CapacityError> for DemoError {

    fn from(value: CapacityError) -> Self {
        Self::Capacity(value)
    }
}

impl From<io::Error> for DemoError {

    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Reserves each capacity in turn on a fresh `i32` vector and writes the
/// vector's description to `out` after every step.
pub fn run(capacities: &[usize], out: &mut impl Write) -> Result<GlobalRawVec<i32>, DemoError> {
    run_in(&GLOBAL_ALLOC, capacities, out)
}

/// [`run`] drawing memory from `alloc`.
///
/// Stops at the first failed reservation. Descriptions written before it
/// stay in `out`.
pub fn run_in<'alloc, A: Allocator>(
    alloc: &'alloc A,
    capacities: &[usize],
    out: &mut impl Write,
) -> Result<RawVec<'alloc, i32, A>, DemoError>
{
    let mut vec = RawVec::new_in(alloc);
    for &capacity in capacities {
        rvec_log::debug!("reserving {} elements", capacity);
        let reserved = vec.reserve(capacity)?;
        rvec_log::trace!("capacity is now {}", reserved);
        vec.debug_describe(out)?;
    }
    Ok(vec)
}
