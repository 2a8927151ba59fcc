// hash function

pub(crate) fn hash(key: &str) -> u32 {
    let mut h: u32 = 0;
    for c in key.chars() {
        h = (h << 5).wrapping_sub(h).wrapping_add(c as u32);
    }
    h
}

/// Output partition a key belongs to, out of `n_partitions`.
pub(crate) fn partition(key: &str, n_partitions: usize) -> usize {
    hash(key) as usize % n_partitions
}
