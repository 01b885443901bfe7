// Reservation recorder: turns a validated booking form into a reservation
// This is the booking "API" the front-end talks to; every call is served from memory
// after a fixed artificial delay.

use crate::catalog::{CatalogError, Room, RoomCatalog};
use crate::config::BookingConfig;
use crate::form::{BookingFormInput, FieldErrors};
use crate::reservation::{
    Reservation, ReservationBook, ReservationError, ReservationIdGenerator, ReservationStatus,
    RoomSummary,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Room error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Reservation error: {0}")]
    Reservation(#[from] ReservationError),
}

impl BookingError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            BookingError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct BookingStats {
    pub submitted: AtomicUsize,
    pub confirmed: AtomicUsize,
    pub rejected: AtomicUsize,
    pub cancelled: AtomicUsize,
    pub listings: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookingStatsReport {
    pub submitted: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub cancelled: usize,
    pub listings: usize,
}

#[async_trait]
pub trait BookingBackend: Send + Sync + 'static {
    // Validate and record a booking for the given room
    async fn submit(&self, room_id: &str, form: BookingFormInput) -> Result<Reservation, BookingError>;

    // Reservations in booking order, optionally filtered by status
    async fn list(&self, status: Option<ReservationStatus>) -> Vec<Reservation>;

    fn get(&self, reservation_id: &str) -> Option<Reservation>;

    // Confirmed -> cancelled; repeated cancels are no-ops
    async fn cancel(&self, reservation_id: &str) -> Result<Reservation, BookingError>;

    fn stats(&self) -> BookingStatsReport;
}

pub struct MockBookingBackend {
    config: BookingConfig,
    catalog: Arc<RoomCatalog>,
    book: Arc<ReservationBook>,
    ids: ReservationIdGenerator,
    stats: BookingStats,
}

impl MockBookingBackend {
    pub fn new(config: BookingConfig, catalog: Arc<RoomCatalog>, book: Arc<ReservationBook>) -> Self {
        Self {
            config,
            catalog,
            book,
            ids: ReservationIdGenerator::new(),
            stats: BookingStats::default(),
        }
    }

    // Seeded catalog and the three sample reservations
    pub fn seeded(config: BookingConfig) -> Self {
        Self::new(
            config,
            Arc::new(RoomCatalog::seeded()),
            Arc::new(ReservationBook::seeded()),
        )
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn reservations(&self) -> &ReservationBook {
        &self.book
    }

    async fn simulate_delay(&self, delay_ms: u64) {
        if delay_ms > 0 {
            debug!("Simulating booking API delay of {}ms", delay_ms);
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    fn reject(&self, error: BookingError) -> BookingError {
        self.stats.rejected.fetch_add(1, Ordering::SeqCst);
        warn!("Booking rejected: {}", error);
        error
    }

    fn build_reservation(&self, room: &Room, form: BookingFormInput) -> Result<Reservation, FieldErrors> {
        let (input, quote) = form.validate_for(room)?;
        let now = Utc::now();

        Ok(Reservation {
            id: self.ids.next_id(now),
            room: RoomSummary::from(room),
            check_in: quote.check_in,
            check_out: quote.check_out,
            guests: input.guests,
            nights: quote.nights,
            total: quote.total,
            status: ReservationStatus::Confirmed,
            booking_date: now,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            special_requests: input.special_requests,
        })
    }
}

#[async_trait]
impl BookingBackend for MockBookingBackend {
    async fn submit(&self, room_id: &str, form: BookingFormInput) -> Result<Reservation, BookingError> {
        self.stats.submitted.fetch_add(1, Ordering::SeqCst);

        let room = self
            .catalog
            .get(room_id)
            .map_err(|e| self.reject(e.into()))?;

        // Validation happens before the round trip, as the form would block submission
        let mut reservation = self
            .build_reservation(room, form)
            .map_err(|errors| self.reject(BookingError::Validation(errors)))?;

        self.simulate_delay(self.config.submit_delay_ms).await;

        // Stamp after the round trip so booking_date reflects when it was recorded
        let now = Utc::now();
        reservation.booking_date = now;

        self.book.insert(reservation.clone());
        self.stats.confirmed.fetch_add(1, Ordering::SeqCst);
        info!(
            "Reservation {} confirmed: {} x{} night(s), total {}",
            reservation.id, reservation.room.name, reservation.nights, reservation.total
        );

        Ok(reservation)
    }

    async fn list(&self, status: Option<ReservationStatus>) -> Vec<Reservation> {
        self.simulate_delay(self.config.listing_delay_ms).await;
        self.stats.listings.fetch_add(1, Ordering::SeqCst);
        self.book.list(status)
    }

    fn get(&self, reservation_id: &str) -> Option<Reservation> {
        self.book.get(reservation_id)
    }

    async fn cancel(&self, reservation_id: &str) -> Result<Reservation, BookingError> {
        let before = self.book.get(reservation_id).map(|r| r.status);
        let reservation = self.book.cancel(reservation_id)?;

        if before == Some(ReservationStatus::Confirmed) {
            self.stats.cancelled.fetch_add(1, Ordering::SeqCst);
        }
        Ok(reservation)
    }

    fn stats(&self) -> BookingStatsReport {
        BookingStatsReport {
            submitted: self.stats.submitted.load(Ordering::SeqCst),
            confirmed: self.stats.confirmed.load(Ordering::SeqCst),
            rejected: self.stats.rejected.load(Ordering::SeqCst),
            cancelled: self.stats.cancelled.load(Ordering::SeqCst),
            listings: self.stats.listings.load(Ordering::SeqCst),
        }
    }
}
