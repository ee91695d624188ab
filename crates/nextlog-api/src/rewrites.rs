// Rewrite rule endpoints

use tracing::debug;

use crate::client::NextDnsClient;
use crate::error::Error;
use crate::models::{ListShape, NewRewrite, ObjectShape, RewriteRule};

impl NextDnsClient {
    /// `GET /profiles/{id}/rewrites`
    pub async fn get_rewrites(&self, profile_override: Option<&str>) -> Result<Vec<RewriteRule>, Error> {
        let (auth, profile) = self.scope(profile_override)?;
        let url = self.profile_url(&profile, &["rewrites"])?;
        let shape: Option<ListShape<RewriteRule>> = self.get(&auth, url, &[]).await?;
        Ok(shape.map(ListShape::into_vec).unwrap_or_default())
    }

    /// Create a rule; the service assigns its id.
    ///
    /// `POST /profiles/{id}/rewrites`. `None` when the service answers
    /// without a body.
    pub async fn add_rewrite(&self, domain: &str, answer: &str) -> Result<Option<RewriteRule>, Error> {
        let (auth, profile) = self.scope(None)?;
        let url = self.profile_url(&profile, &["rewrites"])?;
        debug!(profile = %profile, domain, "adding rewrite");
        let created: Option<ObjectShape<RewriteRule>> =
            self.post(&auth, url, &NewRewrite { domain, answer }).await?;
        Ok(created.map(ObjectShape::into_inner))
    }

    /// `DELETE /profiles/{id}/rewrites/{rule_id}`
    pub async fn remove_rewrite(&self, rule_id: &str) -> Result<(), Error> {
        let (auth, profile) = self.scope(None)?;
        let url = self.profile_url(&profile, &["rewrites", rule_id])?;
        debug!(profile = %profile, rule_id, "removing rewrite");
        self.delete(&auth, url).await
    }
}
