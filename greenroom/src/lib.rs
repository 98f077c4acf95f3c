pub use greenroom_core::model::{ConnectionId, RoomId, UserId};

pub mod model {
    pub use greenroom_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use greenroom_server::*;
}
