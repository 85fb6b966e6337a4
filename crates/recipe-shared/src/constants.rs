//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 604800;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;
pub const MAX_MEAL_PLAN_RANGE_DAYS: i64 = 62;
pub const DEVELOPMENT_ENV: &str = "development";
pub const DEV_JWT_SECRET: &str = "recipe-book-development-secret";
pub const HEALTH_MESSAGE: &str = "Recipe Book API is running";
