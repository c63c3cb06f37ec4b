use crate::{
    entities::comment::Comment,
    errors::AppError,
    listing::{build_view, CommentListView, ListControls},
    repositories::comments::CommentRepository,
};

pub struct CommentsHandler<R>
where
    R: CommentRepository,
{
    pub comment_repo: R,
}

impl<R> CommentsHandler<R>
where
    R: CommentRepository,
{
    pub fn new(comment_repo: R) -> Self {
        CommentsHandler { comment_repo }
    }

    /// Fetches the full collection and derives the requested view. A failed
    /// fetch degrades to an empty collection; the log line is the only place
    /// that distinguishes it from "no comments yet".
    pub async fn browse(&self, controls: &ListControls) -> CommentListView {
        let comments = self.fetch_all().await;
        build_view(&comments, controls)
    }

    /// Pins or unpins one comment, then rebuilds the view from a full
    /// refetch. No optimistic update: the caller sees server state only.
    pub async fn set_pinned(
        &self,
        id: i64,
        pinned: bool,
        controls: &ListControls,
    ) -> Result<CommentListView, AppError> {
        self.comment_repo.set_pinned(id, pinned).await?;
        Ok(self.browse(controls).await)
    }

    /// Deletes one comment, gated on the operator's confirmation. A declined
    /// confirmation performs no remote call at all and yields `None`.
    pub async fn remove(
        &self,
        id: i64,
        confirmed: bool,
        controls: &ListControls,
    ) -> Result<Option<CommentListView>, AppError> {
        if !confirmed {
            tracing::debug!(id, "comment deletion declined");
            return Ok(None);
        }

        self.comment_repo.delete_comment(id).await?;
        Ok(Some(self.browse(controls).await))
    }

    async fn fetch_all(&self) -> Vec<Comment> {
        match self.comment_repo.fetch_comments().await {
            Ok(comments) => comments,
            Err(e) => {
                tracing::warn!("comment fetch failed, rendering empty collection: {}", e);
                Vec::new()
            }
        }
    }
}
