use bson::oid::ObjectId;

/// Parse an externally-supplied identifier into the store's native id type.
///
/// Only the 24-hex-character form is accepted. Anything else yields `None`,
/// never an error: callers treat a malformed id exactly like an unknown one
/// and fall through to their not-found path.
pub fn parse_object_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}

/// Render an identifier in its external string form.
///
/// Always succeeds and round-trips through [`parse_object_id`].
pub fn render_object_id(id: &ObjectId) -> String {
    id.to_hex()
}
