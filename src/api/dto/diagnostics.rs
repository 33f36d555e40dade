/*
 * Responsibility
 * - GET /test のレスポンス DTO
 * - database_url はパスワードを伏せて返す
 */
use serde::Serialize;
use url::Url;

const REDACTED: &str = "****";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DiagnosticsResponse {
    pub backend: &'static str,
    pub database: &'static str,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Mask the password in a connection URL's userinfo.
///
/// Multi-host MongoDB URLs (`host1,host2`) are not valid `url::Url`s, so those
/// fall back to masking everything between the first `:` of the userinfo and
/// the last `@` before the host list.
pub fn redact_url(raw: &str) -> String {
    if let Ok(mut url) = Url::parse(raw)
        && url.has_host()
    {
        if url.password().is_some() && url.set_password(Some(REDACTED)).is_ok() {
            return url.to_string();
        }
        return raw.to_string();
    }

    redact_userinfo(raw)
}

fn redact_userinfo(raw: &str) -> String {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return raw.to_string();
    };

    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let Some(at) = authority.rfind('@') else {
        return raw.to_string();
    };
    let (userinfo, hosts) = authority.split_at(at);

    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:{REDACTED}{hosts}{tail}"),
        None => raw.to_string(),
    }
}
