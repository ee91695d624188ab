// Single-domain edits on whole-set domain lists.
//
// The service only replaces lists wholesale, so an edit is read, recompute,
// write. Two concurrent edits of the same list can overwrite each other. A
// read that fails, or cannot be decoded, aborts the edit before any write.

use nextlog_api::{DomainListKind, Error, NextDnsClient};
use tracing::info;

/// `list` with `domain` (trimmed) appended, duplicates collapsed.
///
/// A blank `domain` leaves the list unchanged apart from deduplication.
pub fn with_domain(list: &[String], domain: &str) -> Vec<String> {
    let domain = domain.trim();
    let mut next: Vec<String> = Vec::with_capacity(list.len() + 1);
    let candidates = list.iter().map(String::as_str).chain((!domain.is_empty()).then_some(domain));
    for item in candidates {
        if !next.iter().any(|d| d == item) {
            next.push(item.to_owned());
        }
    }
    next
}

/// `list` without any occurrence of `domain` (trimmed).
pub fn without_domain(list: &[String], domain: &str) -> Vec<String> {
    let domain = domain.trim();
    list.iter().filter(|d| d.as_str() != domain).cloned().collect()
}

/// Add `domain` to the current profile's list and return the new list.
pub async fn add_domain(client: &NextDnsClient, kind: DomainListKind, domain: &str) -> Result<Vec<String>, Error> {
    let current = client.get_domain_list(kind, None).await?;
    if domain.trim().is_empty() {
        return Ok(current);
    }
    let next = with_domain(&current, domain);
    client.set_domain_list(kind, &next).await?;
    info!(list = %kind, domain = domain.trim(), "domain added");
    Ok(next)
}

/// Remove `domain` from the current profile's list and return the new list.
pub async fn remove_domain(client: &NextDnsClient, kind: DomainListKind, domain: &str) -> Result<Vec<String>, Error> {
    let current = client.get_domain_list(kind, None).await?;
    let next = without_domain(&current, domain);
    client.set_domain_list(kind, &next).await?;
    info!(list = %kind, domain = domain.trim(), "domain removed");
    Ok(next)
}
