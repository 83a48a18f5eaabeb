//! Byte-size quality heuristic.

/// Integer percentage of `final_size` relative to `original_size`.
///
/// Computes `round(final_size / original_size * 100)` with halves rounded
/// up. This compares payload sizes only; it says nothing about perceptual
/// quality. Returns 0 when `original_size` is 0.
///
/// # Examples
///
/// ```
/// use vitrine_core::quality_ratio;
///
/// assert_eq!(quality_ratio(1000, 1800), 180);
/// assert_eq!(quality_ratio(8, 1), 13);
/// assert_eq!(quality_ratio(0, 50), 0);
/// ```
pub fn quality_ratio(original_size: u64, final_size: u64) -> u64 {
    if original_size == 0 {
        return 0;
    }
    let original = u128::from(original_size);
    let scaled = u128::from(final_size) * 100 + original / 2;
    u64::try_from(scaled / original).unwrap_or(u64::MAX)
}
