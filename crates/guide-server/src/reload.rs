//! Reload notifications pushed to open browser tabs.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};

/// Buffered notifications per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 16;

/// Notification sent to a browser tab over the reload socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// Sent once when a tab connects
    Connected,

    /// A served file changed; the tab should refresh
    Reload {
        /// Changed file
        path: String,
    },

    /// Site configuration changed; the server must be restarted to apply it
    RestartRequired {
        /// Changed config file
        path: String,
    },
}

/// Fan-out of reload notifications to every connected tab.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Deliver `msg` to every connected tab. Returns how many tabs were
    /// notified; zero when no browser is open.
    pub fn broadcast(&self, msg: ReloadMessage) -> usize {
        match self.sender.send(msg) {
            Ok(tabs) => {
                tracing::debug!("Notified {} tab(s)", tabs);
                tabs
            }
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for the next notification for one tab.
///
/// A tab that fell behind skips the notifications it missed and keeps
/// listening, since any later one reloads the page anyway. Returns `None`
/// once the hub is gone.
pub async fn next_message(rx: &mut broadcast::Receiver<ReloadMessage>) -> Option<ReloadMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Reload subscriber lagged, skipped {} message(s)", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// Browser script that listens on the socket at `ws_path`.
///
/// When the socket drops (the server restarted), the script retries with a
/// growing delay and refreshes the page once it gets through again.
pub fn reload_client_script(ws_path: &str) -> String {
    format!(
        r#"(function () {{
  var url = (location.protocol === 'https:' ? 'wss://' : 'ws://') + location.host + '{path}';
  var delay = 250;
  var dropped = false;

  function connect() {{
    var socket = new WebSocket(url);

    socket.onmessage = function (event) {{
      var msg = JSON.parse(event.data);
      if (msg.type === 'connected') {{
        delay = 250;
        if (dropped) location.reload();
      }} else if (msg.type === 'reload') {{
        location.reload();
      }} else if (msg.type === 'restart_required') {{
        console.warn('[guide] ' + msg.path + ' changed; restart `guide dev` to apply it');
      }}
    }};

    socket.onclose = function () {{
      dropped = true;
      setTimeout(connect, delay);
      delay = Math.min(delay * 2, 5000);
    }};
  }}

  connect();
}})();
"#,
        path = ws_path
    )
}
