// Walks through the booking flow against the in-memory backend
// Usage: booking_demo [--fast] [config.json]

use anyhow::{Context, Result};
use hotel_booking::session::DEMO_EMAIL;
use hotel_booking::{
    estimate, BookingBackend, BookingFormInput, CategoryFilter, HotelConfig, MockBookingBackend,
    ReservationStatus, SessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    let mut fast = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fast" => fast = true,
            path => config_path = Some(path.to_string()),
        }
    }

    let mut config = match &config_path {
        Some(path) => HotelConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => HotelConfig::default(),
    };
    if fast {
        config = config.without_delays();
    }

    let session = SessionStore::from_config(config.session.clone())?;
    let backend = MockBookingBackend::seeded(config.booking.clone());

    println!("Rooms & Suites");
    for room in backend.catalog().filter(CategoryFilter::All) {
        println!(
            "  [{}] {} ({}, {} guests) {}/night",
            room.id,
            room.name,
            room.category.display_name(),
            room.capacity,
            config.format_price(u64::from(room.price))
        );
    }

    let user = match session.current_user() {
        Some(user) => user,
        None => session.login(DEMO_EMAIL, "password").await?,
    };
    println!("\nSigned in as {} <{}>", user.name, user.email);

    let room = backend.catalog().get("1")?;
    let mut form = BookingFormInput::prefilled(Some(&user));
    form.check_in = "2024-02-15".to_string();
    form.check_out = "2024-02-18".to_string();
    form.guests = 2;
    form.phone = "+44 20 1234 5678".to_string();

    let preview = estimate(Some(room), Some(&form.check_in), Some(&form.check_out))?;
    println!(
        "\n{}: {} night(s), total {}",
        room.name,
        preview.nights,
        config.format_price(preview.total)
    );

    let reservation = backend.submit(&room.id, form).await?;
    println!(
        "Booking confirmed! id {} for {}, {}",
        reservation.id,
        reservation.guest_name(),
        config.format_price(reservation.total)
    );

    // Manage bookings is only reachable when signed in
    session.require_user()?;
    backend.cancel(&reservation.id).await?;

    println!("\nMy Bookings");
    for booking in backend.list(None).await {
        println!(
            "  #{} {} {} -> {} {} [{}]",
            booking.id,
            booking.room.name,
            booking.check_in,
            booking.check_out,
            config.format_price(booking.total),
            booking.status
        );
    }

    let confirmed = backend.list(Some(ReservationStatus::Confirmed)).await;
    println!("\n{} confirmed booking(s)", confirmed.len());
    println!("{:?}", backend.stats());

    session.logout()?;
    Ok(())
}
