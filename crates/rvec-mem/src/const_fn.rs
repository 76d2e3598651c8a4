#[inline(always)]
pub const fn min_usize(a: usize, b: usize) -> usize {
    if a < b { a }
    else { b }
}

#[inline(always)]
pub const fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

/// Largest power of two dividing `item_size`, capped at 16.
#[inline(always)]
pub const fn natural_align(item_size: usize) -> usize {
    if item_size == 0 {
        return 1
    }
    min_usize(1 << item_size.trailing_zeros(), 16)
}
