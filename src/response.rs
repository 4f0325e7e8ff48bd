//! Response bodies that are not entities.

use serde::{Deserialize, Serialize};

/// Confirmation returned by successful update and delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn updated(label: &str) -> Self {
        Message { message: format!("{} updated successfully", label) }
    }

    pub fn deleted(label: &str) -> Self {
        Message { message: format!("{} deleted successfully", label) }
    }
}
