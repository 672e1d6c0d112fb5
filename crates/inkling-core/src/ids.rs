/// New identifier of the form `<kind>_<short uuid>`.
pub fn new_id(kind: &str) -> String {
    format!("{kind}_{}", short_id())
}

fn short_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    match id.split('-').next() {
        Some(part) if !part.is_empty() => part.to_string(),
        _ => id,
    }
}
