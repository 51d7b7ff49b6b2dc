use crate::common::PlayerId;

/// Side length of every board.
pub const BOARD_SIZE: u8 = 10;

/// A session seats exactly this many players.
pub const MAX_PLAYERS: usize = 2;

/// Sentinel id meaning "no player". Real ids start at 1.
pub const NO_PLAYER: PlayerId = 0;

/// Ship sizes the bundled client places, in order.
pub const DEFAULT_FLEET: [usize; 3] = [2, 3, 4];

/// Buffered events per subscriber before slow receivers start lagging.
pub const EVENT_CAPACITY: usize = 64;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "NAVAL_LOG";
