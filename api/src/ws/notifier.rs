use services::events::{ATTENDANCE_TOPIC, AttendanceEvent, AttendanceNotifier, NotifyError};
use util::ws::{WebSocketManager, emit};

/// Delivers attendance events to every dashboard subscribed to the
/// `attendance` topic.
#[derive(Clone)]
pub struct WsNotifier {
    ws: WebSocketManager,
}

impl WsNotifier {
    pub fn new(ws: WebSocketManager) -> Self {
        Self { ws }
    }
}

impl AttendanceNotifier for WsNotifier {
    async fn publish(&self, event: AttendanceEvent) -> Result<(), NotifyError> {
        let name = event.name();
        let delivered = emit(&self.ws, ATTENDANCE_TOPIC, name, &event).await?;
        tracing::debug!(event = name, delivered, "attendance event broadcast");
        Ok(())
    }
}
