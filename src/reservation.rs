// Reservation records and the in-memory reservation book behind "manage bookings"

use crate::catalog::Room;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(String),

    #[error("Reservation {id} cannot be cancelled while {status}")]
    NotCancellable { id: String, status: ReservationStatus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

// The part of a room a reservation keeps hold of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub price: u32,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            price: room.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub room: RoomSummary,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub nights: u32,
    pub total: u64,
    pub status: ReservationStatus,
    pub booking_date: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: Option<String>,
}

impl Reservation {
    pub fn guest_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_cancellable(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}

// Reservation ids come from the clock in milliseconds. Two submissions inside the same
// millisecond get consecutive values instead of colliding.
#[derive(Debug, Default)]
pub struct ReservationIdGenerator {
    last_issued: AtomicI64,
}

impl ReservationIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        let mut last = self.last_issued.load(Ordering::SeqCst);
        loop {
            let next = if candidate > last { candidate } else { last + 1 };
            match self
                .last_issued
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => last = actual,
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ReservationBook {
    reservations: RwLock<Vec<Reservation>>,
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        Self {
            reservations: RwLock::new(reservations),
        }
    }

    // The three sample reservations shown before anything is booked
    pub fn seeded() -> Self {
        Self::with_reservations(seed_reservations())
    }

    pub fn len(&self) -> usize {
        self.reservations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.read().is_empty()
    }

    pub fn insert(&self, reservation: Reservation) {
        self.reservations.write().push(reservation);
    }

    pub fn get(&self, id: &str) -> Option<Reservation> {
        self.reservations.read().iter().find(|r| r.id == id).cloned()
    }

    // Insertion order, optionally narrowed to one status
    pub fn list(&self, status: Option<ReservationStatus>) -> Vec<Reservation> {
        self.reservations
            .read()
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect()
    }

    pub fn list_for_email(&self, email: &str) -> Vec<Reservation> {
        self.reservations
            .read()
            .iter()
            .filter(|r| r.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
            .collect()
    }

    // Confirmed -> cancelled. Cancelling twice returns the reservation unchanged;
    // completed stays cannot be cancelled.
    pub fn cancel(&self, id: &str) -> Result<Reservation, ReservationError> {
        let mut reservations = self.reservations.write();
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ReservationError::NotFound(id.to_string()))?;

        match reservation.status {
            ReservationStatus::Confirmed => {
                reservation.status = ReservationStatus::Cancelled;
                info!(
                    "Cancelled reservation {} for {}",
                    reservation.id, reservation.room.name
                );
            }
            ReservationStatus::Cancelled => {}
            ReservationStatus::Completed => {
                return Err(ReservationError::NotCancellable {
                    id: reservation.id.clone(),
                    status: reservation.status,
                })
            }
        }

        Ok(reservation.clone())
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn room_summary(id: &str, name: &str, price: u32) -> RoomSummary {
    RoomSummary {
        id: id.to_string(),
        name: name.to_string(),
        price,
    }
}

fn seed_reservations() -> Vec<Reservation> {
    vec![
        Reservation {
            id: "1".to_string(),
            room: room_summary("1", "Deluxe Suite", 299),
            check_in: date(2024, 2, 15),
            check_out: date(2024, 2, 18),
            guests: 2,
            nights: 3,
            total: 897,
            status: ReservationStatus::Confirmed,
            booking_date: timestamp(2024, 1, 15, 10, 30),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "+44 20 1234 5678".to_string(),
            special_requests: Some("Early check-in if possible".to_string()),
        },
        Reservation {
            id: "2".to_string(),
            room: room_summary("2", "Executive Room", 199),
            check_in: date(2024, 1, 20),
            check_out: date(2024, 1, 22),
            guests: 1,
            nights: 2,
            total: 398,
            status: ReservationStatus::Completed,
            booking_date: timestamp(2024, 1, 10, 14, 20),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            phone: "+44 20 9876 5432".to_string(),
            special_requests: None,
        },
        Reservation {
            id: "3".to_string(),
            room: room_summary("3", "Premium Suite", 399),
            check_in: date(2024, 3, 10),
            check_out: date(2024, 3, 15),
            guests: 3,
            nights: 5,
            total: 1995,
            status: ReservationStatus::Confirmed,
            booking_date: timestamp(2024, 1, 20, 9, 15),
            first_name: "Michael".to_string(),
            last_name: "Johnson".to_string(),
            email: "michael.johnson@example.com".to_string(),
            phone: "+44 20 5555 1234".to_string(),
            special_requests: None,
        },
    ]
}
