/// Name shown for a peer whose `name` message has not arrived yet.
pub const PLACEHOLDER_NAME: &str = "（名前を入力してください）";

/// Capacity of the per-room event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 256;
