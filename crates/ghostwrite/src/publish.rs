//! The publish workflow.
//!
//! One transaction: fingerprint the draft, submit `publish_content`, cache
//! the resulting item. The cache is written exactly once on success and not
//! at all on failure.

use ghostwrite_chain::Wallet;
use ghostwrite_core::{now_secs, Address, ContentDraft, ContentItem, Microcredits, ValidationError};
use ghostwrite_store::KvStore;

use crate::error::{MarketError, Result};
use crate::market::Marketplace;

impl<W: Wallet, S: KvStore> Marketplace<W, S> {
    /// Publish `body` under `title` at `price`.
    ///
    /// Fails with [`MarketError::Validation`] if `author` is absent or the
    /// draft is incomplete, and with [`MarketError::Submission`] if the
    /// wallet does not broadcast the transaction.
    pub async fn publish(
        &self,
        author: Option<&Address>,
        title: &str,
        body: &str,
        price: Microcredits,
    ) -> Result<ContentItem> {
        let author = author.ok_or(ValidationError::NotConnected)?;
        let draft = ContentDraft::new(title, body, price);
        draft.validate()?;

        let title_hash = draft.title_hash();
        let content_hash = draft.content_hash();
        let timestamp = now_secs();

        if self.cache.find_content(&content_hash).is_some() {
            tracing::warn!(
                content = %content_hash,
                "an item with this body fingerprint is already cached"
            );
        }

        let request =
            self.config
                .programs
                .publish_content(title_hash, content_hash, price, timestamp);
        tracing::debug!(
            program = %request.program,
            function = %request.function,
            fee = request.fee.get(),
            "submitting publish transaction"
        );

        let tx_id = self
            .wallet
            .submit_transaction(request)
            .await
            .map_err(|source| {
                tracing::warn!(content = %content_hash, error = %source, "publish submission failed");
                MarketError::Submission(source)
            })?;

        let item = ContentItem::published(
            &draft,
            author.clone(),
            tx_id,
            timestamp,
            self.config.preview_chars,
        );

        self.cache
            .append_content(item.clone())
            .map_err(|source| MarketError::Unrecorded {
                tx_id: item.tx_id.clone(),
                attempt: None,
                source,
            })?;

        tracing::info!(
            content = %item.id,
            tx_id = %item.tx_id,
            price = item.price.get(),
            "published content"
        );
        Ok(item)
    }
}
