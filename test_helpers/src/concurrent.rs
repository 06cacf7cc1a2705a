//! Run a closure on several threads that start at the same instant.

use std::{
    sync::Barrier,
    thread,
};

use parking_lot::Mutex;

/// Runs `f` on `threads` scoped threads released together by a barrier.
///
/// Results are returned in thread-index order. A panic on any thread is
/// propagated once every thread has finished.
///
/// # Examples
///
/// ```
/// use test_helpers::concurrent::run_concurrently;
///
/// let squares = run_concurrently(4, |index| index * index);
/// assert_eq!(squares, vec![0, 1, 4, 9]);
/// ```
pub fn run_concurrently<F, T>(threads: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T + Sync,
    T: Send,
{
    let barrier = Barrier::new(threads);
    let results = Mutex::new(Vec::with_capacity(threads));
    thread::scope(|scope| {
        for index in 0..threads {
            let (barrier, results, f) = (&barrier, &results, &f);
            scope.spawn(move || {
                barrier.wait();
                let output = f(index);
                results.lock().push((index, output));
            });
        }
    });
    let mut results = results.into_inner();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, output)| output).collect()
}
