//! URL Utility Functions
//!
//! Validation applied to a URL before it is handed to the network, and again
//! to every redirect target: it must be absolute http(s) with a host, and
//! optionally must not point at a local or private address.

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use url::{Host, Url};

use crate::error::{Error, Result};

/// Validate a URL for fetching.
///
/// With `reject_unsafe` set, `localhost` and any host whose address is in a
/// loopback, private, link-local, unspecified or broadcast range are refused.
/// Domain names are resolved and every returned address is checked; a name
/// that does not resolve is refused too. The client resolves again when it
/// connects, so a DNS answer that changes in between is not caught.
pub fn check_fetch_url(url_str: &str, reject_unsafe: bool) -> Result<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| Error::InvalidUrl {
        url: url_str.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl {
            url: url_str.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }

    let unsafe_host = match url.host() {
        None => {
            return Err(Error::InvalidUrl {
                url: url_str.to_string(),
                reason: "missing host".to_string(),
            })
        }
        Some(Host::Domain(domain)) => {
            let name = domain.trim_end_matches('.').to_ascii_lowercase();
            if !reject_unsafe {
                false
            } else if name == "localhost" || name.ends_with(".localhost") {
                true
            } else {
                let port = url.port_or_known_default().unwrap_or(80);
                resolves_to_local(domain, port).map_err(|reason| Error::InvalidUrl {
                    url: url_str.to_string(),
                    reason,
                })?
            }
        }
        Some(Host::Ipv4(ip)) => is_local_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_local_ip(IpAddr::V6(ip)),
    };

    if reject_unsafe && unsafe_host {
        return Err(Error::UnsafeUrl(url_str.to_string()));
    }

    Ok(url)
}

/// Check a redirect hop before following it.
///
/// `hops` is the number of redirects already followed. The target gets the
/// same validation as the URL that started the fetch.
pub fn check_redirect(
    target: &str,
    hops: usize,
    max_redirects: usize,
    reject_unsafe: bool,
) -> Result<()> {
    if hops >= max_redirects {
        return Err(Error::TooManyRedirects(max_redirects));
    }
    check_fetch_url(target, reject_unsafe).map(|_| ())
}

/// Resolve `host` and report whether any of its addresses is local.
fn resolves_to_local(host: &str, port: u16) -> std::result::Result<bool, String> {
    let addrs: Vec<_> = (host, port)
        .to_socket_addrs()
        .map_err(|e| format!("cannot resolve host: {e}"))?
        .collect();

    if addrs.is_empty() {
        return Err("host resolved to no addresses".to_string());
    }

    Ok(addrs.iter().any(|addr| is_local_ip(addr.ip())))
}

fn is_local_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_local_ipv4(v4),
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_local_ipv4(mapped);
            }
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local
                || (first & 0xfe00) == 0xfc00
                // fe80::/10 link-local
                || (first & 0xffc0) == 0xfe80
        }
    }
}

fn is_local_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        // 0.0.0.0/8
        || ip.octets()[0] == 0
}
