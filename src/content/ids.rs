use uuid::Uuid;

/// Fresh collision-resistant id for a new project or pricing record.
///
/// Generated once at record creation (or on first normalization of a record
/// that never had one) and stable forever after.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
