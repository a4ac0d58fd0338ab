#[cfg(test)]
mod tests {
    use crate::logic::{compute_available, generate_grid};
    use crate::time::TimeSlot;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn arb_slot() -> impl Strategy<Value = TimeSlot> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| TimeSlot::from_hm(h, m).unwrap())
    }

    proptest! {
        // Grid is ascending, bounded, evenly spaced and stable across calls.
        #[test]
        fn test_grid_shape(
            start in arb_slot(),
            end in arb_slot(),
            interval in 1u32..240,
        ) {
            let grid = generate_grid(start, end, interval);
            prop_assert_eq!(&grid, &generate_grid(start, end, interval));

            if start > end {
                prop_assert!(grid.is_empty());
            } else {
                prop_assert_eq!(grid.first(), Some(&start));
                for slot in &grid {
                    prop_assert!(*slot >= start && *slot <= end);
                }
                for pair in grid.windows(2) {
                    prop_assert_eq!(
                        pair[1].minutes_of_day() - pair[0].minutes_of_day(),
                        interval
                    );
                }
                let span = end.minutes_of_day() - start.minutes_of_day();
                prop_assert_eq!(grid.len() as u32, span / interval + 1);
            }
        }

        // Available slots are an order-preserving sub-sequence of the grid
        // and never contain a booked slot.
        #[test]
        fn test_available_is_ordered_subsequence_disjoint_from_booked(
            start in arb_slot(),
            interval in 5u32..90,
            booked in prop::collection::vec(arb_slot(), 0..20),
        ) {
            let end = TimeSlot::from_hm(23, 59).unwrap();
            let grid = generate_grid(start, end, interval);
            let booked: HashSet<TimeSlot> = booked.into_iter().collect();
            let available = compute_available(&grid, &booked);

            for slot in &available {
                prop_assert!(!booked.contains(slot));
            }

            let mut grid_iter = grid.iter();
            for slot in &available {
                prop_assert!(grid_iter.any(|g| g == slot), "{} out of order or not on grid", slot);
            }

            let kept = grid.iter().filter(|g| !booked.contains(g)).count();
            prop_assert_eq!(available.len(), kept);
        }

        // Every canonical time survives the 12-hour display form.
        #[test]
        fn test_display_round_trip(slot in arb_slot()) {
            prop_assert_eq!(TimeSlot::parse_display(&slot.to_display()), Some(slot));
            prop_assert_eq!(TimeSlot::normalize(&slot.to_display()), Some(slot));
            prop_assert_eq!(TimeSlot::normalize(&slot.to_string()), Some(slot));
        }
    }
}
