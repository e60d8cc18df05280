//! Link to the native notes host.
//!
//! Responses and disconnects do not come back through these traits; the connector
//! delivers them as [`PopupEvent`](crate::state::PopupEvent)s on the session's event stream.

mod native;

pub use native::{NativeConnector, NativePort};

use crate::error::PopupResult;
use crate::protocol::HostRequest;

pub trait HostChannel {
    /// Send one request. Fails with a `Disconnected` error once the port has closed.
    fn post(&mut self, request: &HostRequest) -> PopupResult<()>;

    fn is_connected(&self) -> bool;
}

pub trait HostConnector {
    type Channel: HostChannel;

    fn connect(&self, host_name: &str) -> PopupResult<Self::Channel>;
}
