/// Collection path for records.
pub const RECORDS_PATH: &str = "/records";

/// Collection path served by earlier releases; routed to the same handlers.
pub const LEGACY_TODOS_PATH: &str = "/todos";

/// Body message for a successful table-store delete.
pub const RECORD_DELETED_MESSAGE: &str = "Record deleted successfully";
