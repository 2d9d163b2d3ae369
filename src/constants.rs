//! Application-wide constants and configuration values
//!
//! Magic numbers, feed parameters and UI labels live here so the rest of the
//! code can refer to them by name.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Upper bound for a single fetch (catalog refresh or score table), retries included
pub const FETCH_TIMEOUT_SECONDS: u64 = 15;

/// Default feed host
pub const DEFAULT_API_DOMAIN: &str = "https://app.sports.qq.com";

/// Schedule column carrying the Olympic events
pub const DEFAULT_COLUMN_ID: u32 = 130003;

/// Schedule entries with a category id at or below this are editorial columns, not events
pub const MAX_NON_EVENT_CATEGORY_ID: i64 = 3;

/// Default maximum depth of the overlay stack
pub const DEFAULT_MAX_NAV_DEPTH: usize = 3;

/// Retry policy for transient HTTP failures
pub mod retry {
    pub const MAX_RETRIES: u32 = 3;

    pub const INITIAL_BACKOFF_MS: u64 = 250;
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// Polling interval for active use (< 5 seconds idle)
    pub const ACTIVE_MS: u64 = 50;

    /// Polling interval for semi-active use (5-30 seconds idle)
    pub const SEMI_ACTIVE_MS: u64 = 200;

    /// Polling interval for idle use (> 30 seconds idle)
    pub const IDLE_MS: u64 = 500;

    /// Threshold for considering user as idle (seconds)
    pub const IDLE_THRESHOLD_SECONDS: u64 = 30;

    /// Threshold for considering user as semi-active (seconds)
    pub const SEMI_ACTIVE_THRESHOLD_SECONDS: u64 = 5;
}

/// Cascading overlay geometry
pub mod overlay {
    /// Columns each nested box is shifted by
    pub const HORIZONTAL_STEP: u16 = 3;

    /// Rows each nested box is shifted by
    pub const VERTICAL_STEP: u16 = 2;

    pub const MIN_WIDTH: u16 = 32;

    pub const MIN_HEIGHT: u16 = 16;

    /// Buttons or lines moved by PageUp/PageDown
    pub const PAGE_STEP: usize = 10;

    /// Rows reserved at the bottom of the screen for the status line
    pub const STATUS_ROWS: u16 = 1;

    /// Background fill character
    pub const BACKGROUND: char = '▒';
}

/// Score table cache
pub mod cache {
    pub const SCORE_TABLE_CAPACITY: usize = 64;
}

/// User-visible labels
pub mod labels {
    pub const ROOT_TITLE: &str = "主目录";
    pub const LIVE: &str = "正在进行";
    pub const GOLD: &str = "今日决赛";
    pub const HOME_TEAM: &str = "中国队";
    pub const UPCOMING: &str = "即将开始";
    pub const REFRESH: &str = "刷新数据(F5)";
    pub const EXIT: &str = "退出";
    pub const BACK: &str = "返回";
    pub const NO_SCORE_YET: &str = "暂无比分";
    pub const LOADING: &str = "加载中...";
    pub const REFRESHING: &str = "正在刷新...";
    pub const EMPTY_LIST: &str = "(无)";
    pub const GOLD_MARKER: &str = "(金牌)";
    pub const HOME_MARKER: &str = "(中国队)";
    pub const FETCH_FAILED: &str = "数据获取失败";
    pub const TOO_DEEP: &str = "无法打开更多层级";
    pub const TERMINAL_TITLE: &str = "OLYMPIC TELETEXT";
    pub const KEY_HINTS: &str = "Enter 选择  Esc 返回  F5 刷新  q 退出";
}
