/// Prints a timestamped line to stdout, like `info!` in tracing but without
/// dragging in a subscriber. Callers need `chrono::Local` in scope.
/// ```ignore
/// info_time!("parsed {} rows", n);
/// let start = Local::now();
/// info_time!(start, "done:");
/// ```
/// The second form appends the seconds elapsed since `start`.
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        println!("{:<30} : {}", Local::now(), format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = Local::now();
        let elapsed = (local_now - $time)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        println!(
            "{:<30} : {} {:.3} sec",
            local_now,
            format!($strfm, $($arg),*),
            elapsed
        );
    }};
}
