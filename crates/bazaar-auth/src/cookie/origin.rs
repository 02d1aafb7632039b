//! Origin and request authority helpers.

use axum::http::header::{HOST, ORIGIN};
use axum::http::request::Parts;
use axum::http::uri::Authority;
use axum::http::Uri;

/// Normalized `host[:port]` of an `Origin` header value.
///
/// The scheme's default port is dropped so that `https://a.com:443` and
/// `https://a.com` compare equal, matching how browsers send `Host`.
/// Returns `None` for values that are not absolute URLs (e.g. `null`).
pub fn origin_authority(origin: &str) -> Option<String> {
    let uri: Uri = origin.trim().parse().ok()?;
    let scheme = uri.scheme_str()?;
    Some(normalize(scheme, uri.authority()?))
}

/// Lowercased host, plus the port when it is not the scheme's default.
fn normalize(scheme: &str, authority: &Authority) -> String {
    let host = authority.host().to_ascii_lowercase();
    let default_port = match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    };

    match authority.port_u16() {
        Some(port) if Some(port) != default_port => format!("{host}:{port}"),
        _ => host,
    }
}

/// The server's own `host[:port]` as addressed by the client.
///
/// HTTP/1.1 carries it in `Host`; HTTP/2 carries it as `:authority`, which
/// ends up in the request URI and leaves `Host` unset.
pub fn request_authority(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_ascii_lowercase);

    from_header.or_else(|| {
        let authority = parts.uri.authority()?;
        Some(normalize(parts.uri.scheme_str().unwrap_or("http"), authority))
    })
}

/// Hostname of the request, without port.
pub fn request_hostname(parts: &Parts) -> Option<String> {
    let authority = request_authority(parts)?;
    // bracketed IPv6 literal
    if let Some(rest) = authority.strip_prefix('[') {
        return rest.split(']').next().map(str::to_string);
    }
    authority.split(':').next().map(str::to_string)
}

/// Whether the request's `Origin` names a different `host:port` than the
/// request itself. No `Origin` means same-origin; an unparseable one or an
/// unknown request authority is treated as foreign.
pub fn is_foreign_origin(parts: &Parts) -> bool {
    let Some(origin) = parts.headers.get(ORIGIN) else {
        return false;
    };

    let origin = origin.to_str().ok().and_then(origin_authority);
    match (origin, request_authority(parts)) {
        (Some(origin), Some(own)) => origin != own,
        _ => true,
    }
}
