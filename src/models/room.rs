//! Room model.
//!
//! Rooms have a seating capacity and a free-form type. The type `"lab"` is
//! special: lab courses may only be placed in lab rooms.

use serde::{Deserialize, Serialize};

/// Room type required by lab courses.
pub const LAB_ROOM_TYPE: &str = "lab";

/// Default room type when none is given.
pub const CLASSROOM_ROOM_TYPE: &str = "classroom";

fn default_room_type() -> String {
    CLASSROOM_ROOM_TYPE.to_string()
}

/// A classroom, lab, or other teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of seats.
    pub capacity: u32,
    /// Room type (`"classroom"`, `"lab"`, ...).
    #[serde(default = "default_room_type")]
    pub room_type: String,
}

impl Room {
    /// Creates a room of the given type.
    pub fn new(id: impl Into<String>, capacity: u32, room_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            room_type: room_type.into(),
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, CLASSROOM_ROOM_TYPE)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, capacity, LAB_ROOM_TYPE)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether this is a lab room.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.room_type == LAB_ROOM_TYPE
    }

    /// Whether `students` fit into the room.
    #[inline]
    pub fn fits(&self, students: u32) -> bool {
        self.capacity >= students
    }
}
