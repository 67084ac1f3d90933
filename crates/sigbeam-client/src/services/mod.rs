//! Built-in service handlers, one per inbound service code.

pub mod signaling;

pub use signaling::{
    AnswerService, AuthService, CandidateService, IncomingJoinService, JoinRoomService,
    MakeRoomService, OfferService,
};
