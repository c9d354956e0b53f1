/// Sanitizes admin-supplied free text before it is stored.
///
/// Uses ammonia's whitelist: harmless markup (<b>, <p>) survives, scripts,
/// iframes and event-handler attributes are stripped.
pub fn sanitize(input: &str) -> String {
    ammonia::clean(input)
}

pub fn sanitize_opt(input: Option<String>) -> Option<String> {
    input.map(|s| sanitize(&s))
}
