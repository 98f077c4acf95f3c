mod signaling_relay;
mod ws_handler;

pub use signaling_relay::SignalingRelay;
pub use ws_handler::ws_handler;
