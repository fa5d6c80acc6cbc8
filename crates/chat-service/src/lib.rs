//! # chat-service
//!
//! Application layer: services, DTOs and the in-process room event hub.

pub mod dto;
pub mod realtime;
pub mod services;

pub use dto::{
    CreateRoomRequest, CreateRoomResponse, HealthResponse, LoginRequest, LoginResponse,
    MessagePage, MessageResponse, ReadinessResponse, RoomResponse, SendMessageRequest,
    SendMessageResponse, SuccessResponse, UserResponse,
};
pub use realtime::{RoomHub, RoomSubscription, DEFAULT_EVENT_BUFFER};
pub use services::{
    AuthService, LoginOutcome, MessageService, RoomService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
