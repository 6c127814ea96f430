use crate::config::Config;
use chrono::NaiveTime;

/// Minutes of the shift [time_in, time_out] falling inside the unpaid
/// lunch window, capped at the window length (one hour by default).
/// Shifts entirely outside the window deduct nothing.
pub fn lunch_overlap_minutes(cfg: &Config, time_in: NaiveTime, time_out: NaiveTime) -> i64 {
    let (Some(lunch_start), Some(lunch_end)) = (
        NaiveTime::from_hms_opt(cfg.lunch_start_hour, 0, 0),
        NaiveTime::from_hms_opt(cfg.lunch_end_hour, 0, 0),
    ) else {
        // A misconfigured window deducts nothing rather than panicking.
        return 0;
    };

    let start = time_in.max(lunch_start);
    let end = time_out.min(lunch_end);

    if end <= start {
        return 0;
    }

    let window = (lunch_end - lunch_start).num_minutes();
    (end - start).num_minutes().min(window)
}
