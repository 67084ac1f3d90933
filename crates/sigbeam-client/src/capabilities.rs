//! Capability seams for the external collaborators.
//!
//! The engine never touches a DOM, a camera, or a network socket directly.
//! Each of those concerns is injected behind one of these traits, and the
//! coordinator drives them; test doubles stand in for all of them.

use async_trait::async_trait;

use sigbeam_core::error::Result;
use sigbeam_core::protocol::body::{IceCandidate, SessionDescription};

/// Opaque handle to an acquired audio+video stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    pub id: String,
}

/// Events emitted asynchronously by the peer session.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    /// A locally-discovered trickle candidate.
    LocalCandidate(IceCandidate),
    /// The remote party's stream became available.
    RemoteStream(MediaStream),
}

/// The platform real-time connection object.
///
/// One instance serves one call attempt; implementations deliver
/// `PeerEvent`s on the channel handed to the engine at construction.
#[async_trait]
pub trait PeerSession: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription>;
    async fn create_answer(&self) -> Result<SessionDescription>;
    async fn set_local_description(&self, desc: SessionDescription) -> Result<()>;
    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()>;
    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;
    /// Attach the local stream so it is included in the negotiated session.
    async fn attach_media(&self, stream: MediaStream) -> Result<()>;
}

/// Local media acquisition. Implementations memoize: acquisition happens once
/// and every later call returns the same stream handle.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<MediaStream>;
}

/// Yes/no confirmation for an incoming call invitation.
#[async_trait]
pub trait CallPrompt: Send + Sync {
    async fn accept_call(&self, room_id: &str) -> bool;
}

/// Surface for everything the surrounding UI needs to hear about.
pub trait UserNotifier: Send + Sync {
    /// Authentication succeeded; the call action may be unlocked.
    fn authenticated(&self, user_id: &str);
    /// A protocol-level failure, reported synchronously, never retried.
    fn failure(&self, kind: &'static str, msg: &str);
    /// The local stream is live and should be rendered.
    fn local_stream(&self, stream: &MediaStream);
    /// The remote party's stream arrived.
    fn remote_stream(&self, stream: &MediaStream);
    /// The transport is gone and the session is over.
    fn disconnected(&self);
}

/// The external login call that exchanges credentials for an access token.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<String>;
}
