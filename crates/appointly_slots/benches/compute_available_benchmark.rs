use appointly_slots::{booked_set, compute_available, generate_grid, GridSpec, TimeSlot};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use std::collections::HashSet;

// Raw booked entries in the mixed shapes the backend returns
fn create_booked_entries(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let slot = TimeSlot::from_hm(9 + (i as u32 % 8), if i % 2 == 0 { 0 } else { 30 })
                .unwrap();
            match i % 3 {
                0 => json!(slot.to_string()),
                1 => json!(slot.to_display()),
                _ => json!({ "status": "confirmed", "timeSlot": format!("{}:00", slot) }),
            }
        })
        .collect()
}

fn benchmark_compute_available(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_available");

    group.bench_function("default_grid_no_bookings", |b| {
        let booked = HashSet::new();
        b.iter(|| {
            let grid = GridSpec::default().generate();
            black_box(compute_available(&grid, &booked))
        });
    });

    group.bench_function("default_grid_mixed_entries", |b| {
        let entries = create_booked_entries(12);
        b.iter(|| {
            let grid = GridSpec::default().generate();
            let booked = booked_set(black_box(&entries));
            black_box(compute_available(&grid, &booked))
        });
    });

    group.bench_function("five_minute_grid_full_day", |b| {
        let entries = create_booked_entries(200);
        let booked = booked_set(&entries);
        let start = TimeSlot::from_hm(0, 0).unwrap();
        let end = TimeSlot::from_hm(23, 55).unwrap();
        b.iter(|| {
            let grid = generate_grid(start, end, 5);
            black_box(compute_available(&grid, &booked))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_compute_available);
criterion_main!(benches);
