use proptest::prelude::*;

use playslip::estimate::estimate;

proptest! {
    #[test]
    fn monotonic_in_popularity(p1 in 0u8..=100, p2 in 0u8..=100, rank in 1u32..=50) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        prop_assert!(estimate(lo, rank) <= estimate(hi, rank));
    }

    #[test]
    fn monotonic_in_rank(p in 0u8..=100, r1 in 1u32..=50, r2 in 1u32..=50) {
        let (near, far) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        prop_assert!(estimate(p, near) >= estimate(p, far));
    }

    #[test]
    fn never_below_one_play(p in 0u8..=100, rank in 1u32..=1000) {
        prop_assert!(estimate(p, rank) >= 1);
    }

    #[test]
    fn fully_deterministic(p in 0u8..=100, rank in 1u32..=50) {
        prop_assert_eq!(estimate(p, rank), estimate(p, rank));
    }
}
