// src/config/consts.rs

// Remote sheet
pub const SHEET_ID: &str = "1z-mPq_eqFDQvMA-sZ6TkDoPN-x8FTCu2brWd1PkHO3I";
pub const WORKSHEET_NAME: &str = "Laufdaten";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Credentials lookup (first hit wins)
pub const CREDENTIALS_ENV: &str = "LAUFCHALLENGE_CREDENTIALS";
pub const CREDENTIALS_ENV_FALLBACK: &str = "GOOGLE_APPLICATION_CREDENTIALS";

// Fetch cache
pub const CACHE_TTL_SECS: u64 = 86_400;

// Net
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "laufchallenge/0.3";

// Sheet columns (matched after trimming)
pub const COL_KM: &str = "KM";
pub const COL_DATE: &str = "Datum";
pub const COL_WEEK: &str = "KW";
pub const COL_GROUP: &str = "Gruppe";
pub const COL_NAME: &str = "Name";
pub const DATE_FORMAT: &str = "%d.%m.%Y";

// Challenge period: calendar weeks in display order (wraps the year end)
pub const CHALLENGE_WEEKS: [u32; 18] = [45, 46, 47, 48, 49, 50, 51, 52, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

// Branding (Suchsdorfer SV)
pub const PRIMARY_COLOR: &str = "#002060";
pub const TEXT_COLOR: &str = "#212121";
pub const BACKGROUND_COLOR: &str = "#FFFFFF";
pub const SECONDARY_BACKGROUND_COLOR: &str = "#F0F2F6";
pub const MUTED_COLOR: &str = "#D3D3D3";

// Qualitative palette for unselected multi-series charts
pub const PALETTE: [&str; 11] = [
    "#7F3C8D", "#11A579", "#3969AC", "#F2B701", "#E73F74", "#80BA5A",
    "#E68310", "#008695", "#CF1C90", "#F97B72", "#A5AA99",
];

// Labels
pub const ALL_LABEL: &str = "Alle";
pub const TOTAL_LABEL: &str = "Gesamt";
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M Uhr";

// Leaderboards
pub const RUNNER_LEADERBOARD_SIZE: usize = 10;
pub const EMPTY_LEADERBOARD_SCALE: f64 = 100.0;

// Local files
pub const LOGO_PATH: &str = "logo.png";
pub const LOG_FILE: &str = ".cache/dashboard.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "laufdaten";
