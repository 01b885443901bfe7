// Booking core for a single hotel: room catalog, stay pricing, mock reservations and sessions

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod form;
pub mod recorder;
pub mod reservation;
pub mod session;

// Re-export key types for convenience
pub use calculator::{
    calculate_nights, calculate_total, estimate, quote_stay, CalculatorError, StayEstimate,
    StayQuote,
};
pub use catalog::{CatalogError, CategoryFilter, Room, RoomCatalog, RoomCategory};
pub use config::{BookingConfig, ConfigError, HotelConfig, SessionConfig};
pub use form::{BookingFormInput, FieldErrors};
pub use recorder::{BookingBackend, BookingError, BookingStatsReport, MockBookingBackend};
pub use reservation::{Reservation, ReservationBook, ReservationError, ReservationStatus};
pub use session::{
    AuthError, JsonFileStorage, MemoryStorage, SessionStorage, SessionStore, SignupForm, User,
};
