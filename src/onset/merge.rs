use super::{sort_by_time, Beat};

/// Beats closer than this to the last accepted beat are folded into it.
pub const MERGE_WINDOW_MS: f64 = 100.0;

/// Fuse two beat streams into one time-ordered list.
///
/// Each beat is compared only with the most recently accepted one. A beat
/// within [`MERGE_WINDOW_MS`] raises the accepted beat's intensity to the
/// max of the two and moves its time to their midpoint; the accepted beat
/// keeps its original kind. Because the midpoint moves, a dense run of
/// beats can pull the merged time well past the run's first member.
pub fn merge_beats(first: Vec<Beat>, second: Vec<Beat>) -> Vec<Beat> {
    let mut all = first;
    all.extend(second);
    sort_by_time(&mut all);

    let mut merged: Vec<Beat> = Vec::with_capacity(all.len());
    for beat in all {
        if let Some(last) = merged.last_mut() {
            if beat.time_ms - last.time_ms <= MERGE_WINDOW_MS {
                last.intensity = last.intensity.max(beat.intensity);
                last.time_ms = (last.time_ms + beat.time_ms) / 2.0;
                continue;
            }
        }
        merged.push(beat);
    }
    merged
}
