#[cfg(test)]
mod tests {
    use crate::extract::normalize_entry;
    use crate::time::TimeSlot;
    use serde_json::json;

    fn slot(h: u32, m: u32) -> Option<TimeSlot> {
        TimeSlot::from_hm(h, m)
    }

    #[test]
    fn test_bare_strings() {
        assert_eq!(normalize_entry(&json!("09:00")), slot(9, 0));
        assert_eq!(normalize_entry(&json!("9:30 AM")), slot(9, 30));
        assert_eq!(normalize_entry(&json!("")), None);
    }

    #[test]
    fn test_known_fields_in_priority_order() {
        assert_eq!(normalize_entry(&json!({ "timeSlot": "10:00" })), slot(10, 0));
        assert_eq!(
            normalize_entry(&json!({ "appointment_time": "2:00 PM" })),
            slot(14, 0)
        );
        // timeSlot outranks start_time regardless of document order.
        assert_eq!(
            normalize_entry(&json!({ "start_time": "11:00", "timeSlot": "10:30" })),
            slot(10, 30)
        );
        // Empty known fields are skipped.
        assert_eq!(
            normalize_entry(&json!({ "timeSlot": "", "time": "15:00" })),
            slot(15, 0)
        );
    }

    #[test]
    fn test_unparsable_known_field_drops_entry() {
        assert_eq!(
            normalize_entry(&json!({ "time": "soon", "note": "09:00" })),
            None
        );
    }

    #[test]
    fn test_fallback_skips_non_time_strings() {
        let entry = json!({
            "status": "confirmed",
            "customerName": "Ada",
            "bookedAt": "11:30:00"
        });
        assert_eq!(normalize_entry(&entry), slot(11, 30));
    }

    #[test]
    fn test_fallback_without_any_time_is_dropped() {
        assert_eq!(
            normalize_entry(&json!({ "status": "confirmed", "id": 7 })),
            None
        );
    }

    #[test]
    fn test_other_shapes_are_dropped() {
        assert_eq!(normalize_entry(&json!(null)), None);
        assert_eq!(normalize_entry(&json!(930)), None);
        assert_eq!(normalize_entry(&json!(["09:00"])), None);
        assert_eq!(normalize_entry(&json!(true)), None);
    }
}
