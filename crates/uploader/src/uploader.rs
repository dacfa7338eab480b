//! Upload orchestrator: plan, transfer, verify.

use std::path::Path;

use shipstash_client::{Client, FileScope};
use shipstash_protocol::{ArtifactRecord, UploadMetadata};
use tokio::sync::mpsc;
use tracing::info;

use crate::error::UploadError;
use crate::events::UploadEvent;
use crate::executor::transfer_file;

/// Runs upload invocations against the artifact service.
///
/// One call to [`upload`](Self::upload) is one invocation: any failure
/// aborts it immediately and surfaces a single error. Separate
/// invocations are independent; the shared [`Client`] keeps no
/// per-call state, so an `Uploader` may serve concurrent uploads.
pub struct Uploader {
    client: Client,
}

impl Uploader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Uploads the artifact described by `metadata`.
    ///
    /// Phases run strictly in order — plan, primary transfer, expansion
    /// transfer (when an expansion path was given and the plan carries
    /// an expansion entry), verify — and the final [`ArtifactRecord`]
    /// is returned to the caller, who owns it thereafter.
    pub async fn upload(
        &self,
        metadata: &UploadMetadata,
        events: &mpsc::Sender<UploadEvent>,
    ) -> Result<ArtifactRecord, UploadError> {
        info!("requesting upload plan");
        let _ = events.send(UploadEvent::PlanRequested).await;
        let plan = self.client.request_plan(metadata).await?;
        let _ = events
            .send(UploadEvent::PlanReceived {
                pending_upload_id: plan.pending_upload_id.clone(),
            })
            .await;

        transfer_file(
            &self.client,
            Path::new(&metadata.primary_file_path),
            &plan.primary_file,
            &plan.pending_upload_id,
            FileScope::Primary,
            events,
        )
        .await?;

        if let Some(expansion_path) = &metadata.expansion_file_path
            && let Some(expansion_plan) = plan.expansion_files.first()
        {
            transfer_file(
                &self.client,
                Path::new(expansion_path),
                expansion_plan,
                &plan.pending_upload_id,
                FileScope::Expansion,
                events,
            )
            .await?;
        }

        info!("verifying upload");
        let _ = events.send(UploadEvent::Verifying).await;
        let record = self.client.verify(&plan.pending_upload_id).await?;

        info!(build_id = ?record.build_id, "upload verified");
        let _ = events
            .send(UploadEvent::Completed {
                build_id: record.build_id.clone(),
            })
            .await;
        Ok(record)
    }
}
