// Room catalog: the hotel's bookable units, seeded at load time and never persisted

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Unknown room category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Standard,
    Suite,
    Villa,
}

impl RoomCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Standard => "standard",
            RoomCategory::Suite => "suite",
            RoomCategory::Villa => "villa",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoomCategory::Standard => "Standard",
            RoomCategory::Suite => "Suites",
            RoomCategory::Villa => "Villas",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(RoomCategory::Standard),
            "suite" => Ok(RoomCategory::Suite),
            "villa" => Ok(RoomCategory::Villa),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

// Category selector used by the rooms listing; `All` disables filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(RoomCategory),
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    // Whole currency units per night
    pub price: u32,
    pub capacity: u32,
    pub category: RoomCategory,
    pub size: String,
    pub rating: f32,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
}

impl Room {
    pub fn fits(&self, guests: u32) -> bool {
        guests >= 1 && guests <= self.capacity
    }
}

#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    // The hotel's fixed room list
    pub fn seeded() -> Self {
        Self::new(seed_rooms())
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn find(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    pub fn get(&self, room_id: &str) -> Result<&Room, CatalogError> {
        self.find(room_id)
            .ok_or_else(|| CatalogError::RoomNotFound(room_id.to_string()))
    }

    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|room| match filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(category) => room.category == category,
            })
            .collect()
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn room(
    id: &str,
    name: &str,
    description: &str,
    price: u32,
    rating: f32,
    capacity: u32,
    size: &str,
    category: RoomCategory,
    amenities: &[&str],
    features: &[&str],
) -> Room {
    Room {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        capacity,
        category,
        size: size.to_string(),
        rating,
        amenities: strings(amenities),
        features: strings(features),
    }
}

fn seed_rooms() -> Vec<Room> {
    vec![
        room(
            "1",
            "Deluxe Suite",
            "Spacious suite with city views, featuring a king-size bed, separate living area, and luxury amenities.",
            299,
            4.8,
            2,
            "45 sqm",
            RoomCategory::Suite,
            &["King Bed", "City View", "Living Area", "Balcony"],
            &["Free WiFi", "Room Service", "Mini Bar", "Air Conditioning"],
        ),
        room(
            "2",
            "Executive Room",
            "Elegant room with modern furnishings, perfect for business travelers or romantic getaways.",
            199,
            4.6,
            2,
            "35 sqm",
            RoomCategory::Standard,
            &["Queen Bed", "Work Desk", "City View", "En-suite Bathroom"],
            &["Free WiFi", "Room Service", "Coffee Maker", "Air Conditioning"],
        ),
        room(
            "3",
            "Premium Suite",
            "Luxury suite with panoramic views, featuring premium amenities and personalized service.",
            399,
            4.9,
            3,
            "60 sqm",
            RoomCategory::Suite,
            &["King Bed", "Panoramic View", "Living Room", "Dining Area"],
            &["Free WiFi", "Butler Service", "Premium Mini Bar", "Spa Access"],
        ),
        room(
            "4",
            "Luxury Villa",
            "Exclusive villa with private garden, perfect for families or those seeking ultimate privacy.",
            599,
            5.0,
            4,
            "80 sqm",
            RoomCategory::Villa,
            &["Multiple Bedrooms", "Private Garden", "Kitchen", "Terrace"],
            &["Free WiFi", "Private Pool", "Chef Service", "Concierge"],
        ),
        room(
            "5",
            "Standard Room",
            "Comfortable and cozy room with all essential amenities for a pleasant stay.",
            149,
            4.4,
            2,
            "28 sqm",
            RoomCategory::Standard,
            &["Double Bed", "En-suite Bathroom", "TV", "Work Desk"],
            &["Free WiFi", "Room Service", "Air Conditioning", "Daily Cleaning"],
        ),
        room(
            "6",
            "Family Suite",
            "Spacious family suite with connecting rooms, ideal for families with children.",
            349,
            4.7,
            4,
            "55 sqm",
            RoomCategory::Suite,
            &["Connecting Rooms", "King Bed + Twin Beds", "Living Area", "Kitchenette"],
            &["Free WiFi", "Room Service", "Kids Menu", "Play Area Access"],
        ),
    ]
}
