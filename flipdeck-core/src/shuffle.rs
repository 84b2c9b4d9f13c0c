use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks `i` from the last index down to 1 and swaps slot `i` with a slot drawn
/// uniformly from `0..=i`, which yields every permutation with equal
/// probability.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
