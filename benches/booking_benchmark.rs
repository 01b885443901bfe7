use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_booking::calculator::quote_stay;
use hotel_booking::catalog::RoomCatalog;
use hotel_booking::reservation::{ReservationBook, ReservationStatus};
use rand::{seq::SliceRandom, thread_rng, Rng};

// Quoting random stays across the whole catalog
pub fn quote_benchmark(c: &mut Criterion) {
    let catalog = RoomCatalog::seeded();
    let mut rng = thread_rng();
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let stays: Vec<(String, String, String)> = (0..1000)
        .map(|_| {
            let room = catalog.rooms().choose(&mut rng).unwrap();
            let check_in = base + Duration::days(rng.gen_range(0..365));
            let check_out = check_in + Duration::days(rng.gen_range(1..21));
            (room.id.clone(), check_in.to_string(), check_out.to_string())
        })
        .collect();

    c.bench_function("quote_stay", |b| {
        b.iter(|| {
            for (room_id, check_in, check_out) in &stays {
                let room = catalog.find(room_id).unwrap();
                let _ = black_box(quote_stay(room, check_in, check_out));
            }
        })
    });
}

// Listing and cancelling in books of different sizes
pub fn reservation_book_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservation_book");
    let template = ReservationBook::seeded().get("1").unwrap();

    for size in [10usize, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let book = ReservationBook::new();
                for i in 0..size {
                    let mut reservation = template.clone();
                    reservation.id = i.to_string();
                    book.insert(reservation);
                }

                for i in (0..size).step_by(3) {
                    let _ = book.cancel(&i.to_string());
                }
                black_box(book.list(Some(ReservationStatus::Confirmed)));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, quote_benchmark, reservation_book_benchmark);
criterion_main!(benches);
