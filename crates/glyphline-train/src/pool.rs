//! Ordered batch execution

use crate::TrainResult;
use rayon::prelude::*;

/// Apply `f` to every item, on a pool of `workers` threads when more than
/// one is requested. Results keep the order of `items`.
pub(crate) fn map_ordered<I, T, F>(workers: usize, items: &[I], f: F) -> TrainResult<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync + Send,
{
    if workers <= 1 {
        return Ok(items.iter().map(f).collect());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    Ok(pool.install(|| items.par_iter().map(f).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_kept() {
        let items: Vec<u32> = (0..100).collect();
        let serial = map_ordered(1, &items, |x| x * 3).unwrap();
        let pooled = map_ordered(4, &items, |x| x * 3).unwrap();
        assert_eq!(serial, pooled);
        assert_eq!(pooled[99], 297);
    }
}
