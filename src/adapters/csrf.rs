const CSRF_COOKIE: &str = "csrftoken";

/// 從 cookie 字串取出 CSRF token；找不到時回傳空字串，交給後端拒絕
pub fn csrf_token(cookies: &str) -> String {
    cookies
        .split("; ")
        .filter_map(|pair| pair.trim().strip_prefix(CSRF_COOKIE))
        .find_map(|rest| rest.strip_prefix('='))
        .and_then(|value| value.split('=').next())
        .unwrap_or_default()
        .to_string()
}
