//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{first_validation_message, CreateRoomRequest, LoginRequest, SendMessageRequest};

pub use responses::{
    CreateRoomResponse, HealthChecks, HealthResponse, LoginResponse, MessagePage, MessageResponse,
    ReadinessResponse, RoomResponse, SendMessageResponse, SuccessResponse, UserResponse,
};

pub use mappers::RoomWithCreator;
