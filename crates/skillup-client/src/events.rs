//! Session lifecycle notifications published by the client

/// Something happened to the stored session outside the caller's control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend answered 401 and the token was discarded
    Expired,
    /// The token belongs to an account that is no longer an admin
    Revoked,
}

/// Number of undelivered events a slow subscriber may lag behind
pub const EVENT_CAPACITY: usize = 16;
