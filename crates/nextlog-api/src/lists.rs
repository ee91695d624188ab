// Allowlist / denylist endpoints
//
// The service offers no per-domain add or remove here: reads return the
// whole set and writes replace it.

use tracing::debug;

use crate::client::NextDnsClient;
use crate::error::Error;
use crate::models::{DomainItem, DomainListKind, DomainsBody, ListShape};

impl NextDnsClient {
    /// `GET /profiles/{id}/{allowlist|denylist}`
    pub async fn get_domain_list(
        &self,
        kind: DomainListKind,
        profile_override: Option<&str>,
    ) -> Result<Vec<String>, Error> {
        let (auth, profile) = self.scope(profile_override)?;
        let url = self.profile_url(&profile, &[kind.path()])?;
        let shape: Option<ListShape<DomainItem>> = self.get(&auth, url, &[]).await?;
        Ok(shape
            .map(ListShape::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(DomainItem::into_domain)
            .collect())
    }

    /// Replace the whole list with `domains`.
    ///
    /// `PUT /profiles/{id}/{allowlist|denylist}` with `{"domains": [...]}`
    pub async fn set_domain_list(&self, kind: DomainListKind, domains: &[String]) -> Result<(), Error> {
        let (auth, profile) = self.scope(None)?;
        let url = self.profile_url(&profile, &[kind.path()])?;
        debug!(profile = %profile, list = %kind, count = domains.len(), "replacing domain list");
        self.put(&auth, url, &DomainsBody { domains }).await
    }

    pub async fn get_allowlist(&self, profile_override: Option<&str>) -> Result<Vec<String>, Error> {
        self.get_domain_list(DomainListKind::Allow, profile_override).await
    }

    pub async fn get_denylist(&self, profile_override: Option<&str>) -> Result<Vec<String>, Error> {
        self.get_domain_list(DomainListKind::Deny, profile_override).await
    }

    pub async fn set_allowlist(&self, domains: &[String]) -> Result<(), Error> {
        self.set_domain_list(DomainListKind::Allow, domains).await
    }

    pub async fn set_denylist(&self, domains: &[String]) -> Result<(), Error> {
        self.set_domain_list(DomainListKind::Deny, domains).await
    }
}
