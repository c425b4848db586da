//! The API endpoints URIs.

/// The root route which reports that the service is running.
pub const ROOT: &str = "/";
/// The route to create a voucher.
pub const VOUCHERS: &str = "/vouchers";
/// The route to list the vouchers for a month (GET), or to update (PUT) or
/// delete (DELETE) a voucher by its ID.
///
/// Both uses share one path pattern, so the parameter is named for both.
pub const VOUCHER: &str = "/vouchers/{month_or_id}";
/// The route to list the distinct voucher categories.
pub const CATEGORIES: &str = "/categories";
/// The route to list the distinct payee/payer names.
pub const NAMES: &str = "/names";
/// The route that checks the connection to the database.
pub const TEST_DB: &str = "/test-db";
