/// Draws `k` distinct elements from `pool` uniformly at random, by partial
/// Fisher-Yates. The returned order is the selection order.
pub(crate) fn sample<T: Copy>(mut pool: Vec<T>, k: usize, rng: &mut fastrand::Rng) -> Vec<T> {
    let n = pool.len();
    let k = k.min(n);
    for i in 0..k {
        let j = rng.usize(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}
