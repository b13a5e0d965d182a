//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! These types are shared between event-server and the web/mobile clients.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Admin Auth DTOs
// =============================================================================

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: AdminInfo,
}

/// Admin account information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

// =============================================================================
// Guest Session DTOs
// =============================================================================

/// Join request: event code plus the display name the guest chose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestJoinRequest {
    pub code: String,
    pub name: String,
}

/// Guest identity within one event
///
/// The client stores `guest_id` per event code and presents it on later
/// visits to skip the name-entry step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestIdentity {
    pub event_id: String,
    pub guest_id: String,
    pub name: String,
    pub avatar_color: String,
}

// =============================================================================
// Post DTOs
// =============================================================================

/// Post creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreateRequest {
    pub event_id: String,
    #[serde(rename = "type")]
    pub post_type: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    pub guest_name: String,
    pub guest_id: String,
    #[serde(default)]
    pub moment_type: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

// =============================================================================
// Face Tagging DTOs
// =============================================================================

/// Fractional bounding box (all coordinates in 0..=1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One detected occurrence of a face on one post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceInstance {
    pub post_id: String,
    pub post_url: String,
    pub bounding_box: BoundingBox,
}

/// A group of face occurrences sharing one recognition-assigned face_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceGroup {
    pub face_id: String,
    #[serde(default)]
    pub person_name: String,
    pub instances: Vec<FaceInstance>,
}

/// Confirm request: operator assigned a name to a face group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceConfirmRequest {
    pub event_id: String,
    pub face_id: String,
    pub person_name: String,
    pub instances: Vec<FaceInstance>,
}

// =============================================================================
// Payment DTOs
// =============================================================================

/// Checkout payload for a manual bank-transfer payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreateRequest {
    pub user_email: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub transaction_id: String,
}

/// Rejection payload (reason is recorded in refund_data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRejectRequest {
    pub reason: String,
}

// =============================================================================
// Statistics DTOs
// =============================================================================

/// Admin dashboard counters derived from the four list-fetches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_events: u64,
    pub total_media: u64,
    pub total_revenue: Decimal,
    pub pending_payments: u64,
}
