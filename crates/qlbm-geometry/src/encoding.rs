//! Integer to bit-position helpers.
//!
//! Grid coordinates are stored little-endian in a register of `width` bits.
//! Complementing every bit that is `0` in a coordinate turns that coordinate
//! into the all-ones pattern, so a single "all lines high" test can stand in
//! for "equals this coordinate".
//!
//! ```rust
//! use qlbm_geometry::encoding::bits_equal_to_zero;
//!
//! // 5 = 0b0101
//! assert_eq!(bits_equal_to_zero(5, 4), vec![1, 3]);
//! ```

/// Every bit index in `[0, width)` that is `0` in `value`, ascending.
///
/// The caller is responsible for supplying a width large enough to hold
/// `value`; higher bits of `value` are ignored. Positions at or above 32 are
/// always zero.
pub fn bits_equal_to_zero(value: u32, width: u32) -> Vec<u32> {
    (0..width)
        .filter(|&bit| value.checked_shr(bit).is_none_or(|v| v & 1 == 0))
        .collect()
}

/// Bit length of the largest coordinate of a dimension, never less than 1.
///
/// A grid of 16 points has a largest coordinate of 15, which needs 4 bits.
pub fn bit_width(max_coordinate: u32) -> u32 {
    (u32::BITS - max_coordinate.leading_zeros()).max(1)
}

/// Largest value representable in `width` bits.
pub(crate) fn max_value(width: u32) -> u32 {
    if width >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Maps dimensions `0, 1, 2` to `x, y, z`; anything else renders as `?`.
pub fn dimension_letter(dim: usize) -> char {
    match dim {
        0 => 'x',
        1 => 'y',
        2 => 'z',
        _ => '?',
    }
}

/// Inverse of [`dimension_letter`] for the three supported dimensions.
pub fn dimension_index(letter: char) -> Option<usize> {
    match letter {
        'x' => Some(0),
        'y' => Some(1),
        'z' => Some(2),
        _ => None,
    }
}

/// Row-major Cartesian product: the last factor varies fastest.
pub(crate) fn cartesian_product<T: Clone>(factors: &[Vec<T>]) -> Vec<Vec<T>> {
    factors.iter().fold(vec![Vec::new()], |acc, factor| {
        acc.into_iter()
            .flat_map(|prefix| {
                factor.iter().map(move |item| {
                    let mut next = prefix.clone();
                    next.push(item.clone());
                    next
                })
            })
            .collect()
    })
}
