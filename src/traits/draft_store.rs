use async_trait::async_trait;
use crate::errors::LexlineResult;

/// Persistence seam for draft autosave.
///
/// [`DraftApiClient`](crate::services::draft_api::DraftApiClient) is the
/// production implementation; tests substitute failing stores to pin the
/// unsaved-changes behavior when a save does not land.
#[async_trait]
pub trait DraftStore: Send + Sync {

    /// Persist the current full draft text. Implementations must return an
    /// error rather than silently dropping the text; the caller keeps its
    /// unsaved-changes flag set until a save succeeds.
    async fn save_draft(&self, draft_id: &str, text: &str) -> LexlineResult<()>;
}
