/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5000";
pub const PREDICT_PATH: &str = "/predict";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const STATUS_CHECK_TIMEOUT_SECS: u64 = 3;

// Region covered by the cutoff data
pub const DEFAULT_STATE: &str = "Karnataka";

// Dialogue Configuration
pub const DEFAULT_TYPING_DELAY_MS: u64 = 600;

// Result display limits per bucket
pub const EXACT_MATCH_LIMIT: usize = 5;
pub const NEAR_MATCH_LIMIT: usize = 3;
pub const WEAK_MATCH_LIMIT: usize = 2;

// Cache Configuration
pub const CACHE_CAPACITY: usize = 10;
pub const CACHE_FILE_NAME: &str = "prediction_cache.json";

// Sentinel meaning "no location filter"
pub const ALL_PLACES: &str = "All";
pub const ALL_PLACES_LABEL: &str = "All Locations";

// Decorative prefixes carried by option labels; stripped before storage
pub const OPTION_DECORATIONS: &[char] = &['🎓', '📚', '📝', '👤', '🌍', '📍', '🔢', '🔄', '❌'];

// Default option enumerations (overridable via config)
pub const DEFAULT_PLACES: &[&str] = &[
    "All",
    "Bengaluru",
    "Mandya",
    "Mysore",
    "Belagavi",
    "Dharwad",
    "Hubballi",
    "Davanagere",
    "Mangaluru",
    "Hassan",
];
pub const DEFAULT_CATEGORIES: &[&str] = &["GM", "OBC", "SC", "ST"];
pub const DEFAULT_COLLEGE_TYPES: &[&str] = &["MCA", "MBA", "MTech"];
pub const DEFAULT_EXAM_TYPES: &[&str] = &["PGCET"];
