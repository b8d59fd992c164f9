//! Property tests for the schedule overlap rule

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use EventDesk::services::event::ranges_overlap;

proptest! {
    #[test]
    fn overlap_is_symmetric(a in 0i64..10_000, a_len in 1i64..500, b in 0i64..10_000, b_len in 1i64..500) {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (a_start, a_end) = (base + Duration::minutes(a), base + Duration::minutes(a + a_len));
        let (b_start, b_end) = (base + Duration::minutes(b), base + Duration::minutes(b + b_len));

        prop_assert_eq!(
            ranges_overlap(a_start, a_end, b_start, b_end),
            ranges_overlap(b_start, b_end, a_start, a_end)
        );
    }

    #[test]
    fn adjacent_ranges_never_overlap(start in 0i64..10_000, first_len in 1i64..500, second_len in 1i64..500) {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let first_start = base + Duration::minutes(start);
        let boundary = first_start + Duration::minutes(first_len);

        prop_assert!(!ranges_overlap(first_start, boundary, boundary, boundary + Duration::minutes(second_len)));
    }

    #[test]
    fn a_range_overlaps_itself(start in 0i64..10_000, len in 1i64..500) {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let from = base + Duration::minutes(start);
        let to = from + Duration::minutes(len);

        prop_assert!(ranges_overlap(from, to, from, to));
    }
}
