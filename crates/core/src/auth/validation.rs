/// Validates a post-login `return_to` target.
///
/// Only same-site relative paths are accepted: the value must start with a
/// single `/`, contain no control characters and embed no `scheme://`.
///
/// # Examples
///
/// ```
/// use localemgmt_core::auth::validate_return_to;
///
/// assert_eq!(validate_return_to("/api/items?lang=en"), Some("/api/items?lang=en"));
/// assert_eq!(validate_return_to("//evil.example"), None);
/// assert_eq!(validate_return_to("https://evil.example"), None);
/// ```
pub fn validate_return_to(target: &str) -> Option<&str> {
    let relative = target.starts_with('/') && !target.starts_with("//");
    let clean = !target.chars().any(char::is_control) && !target.contains("://");

    (relative && clean).then_some(target)
}
