//! Per-file transfer execution: direct or chunked.

use std::path::Path;

use shipstash_client::{Client, Error as ClientError, FileScope};
use shipstash_protocol::FileTransferPlan;
use shipstash_transfer::{open_range, part_range, read_whole};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::UploadError;
use crate::events::UploadEvent;

/// Transfers one file according to its plan.
///
/// Direct plans buffer the whole file (the destination signs the exact
/// content length). Chunked plans stream parts 1..=N strictly in
/// order, requesting one single-use ticket immediately before each
/// part. The first non-200 aborts the whole transfer.
pub async fn transfer_file(
    client: &Client,
    path: &Path,
    plan: &FileTransferPlan,
    pending_upload_id: &str,
    scope: FileScope,
    events: &mpsc::Sender<UploadEvent>,
) -> Result<(), UploadError> {
    let file = path.display().to_string();
    let _ = events
        .send(UploadEvent::TransferStarted {
            file: file.clone(),
            chunked: plan.chunked,
        })
        .await;

    if plan.chunked {
        transfer_chunked(client, path, plan, pending_upload_id, scope, events).await?;
    } else {
        transfer_direct(client, path, plan).await?;
    }

    let _ = events.send(UploadEvent::TransferFinished { file }).await;
    Ok(())
}

async fn transfer_direct(
    client: &Client,
    path: &Path,
    plan: &FileTransferPlan,
) -> Result<(), UploadError> {
    info!(file = %path.display(), "uploading via direct transfer");

    let data = plan
        .presigned_data
        .as_ref()
        .ok_or(ClientError::MissingPresignedUrl)?;
    let bytes = read_whole(path).await?;
    debug!(bytes = bytes.len(), "file read for direct transfer");

    client.put_direct(data, bytes).await?;
    Ok(())
}

async fn transfer_chunked(
    client: &Client,
    path: &Path,
    plan: &FileTransferPlan,
    pending_upload_id: &str,
    scope: FileScope,
    events: &mpsc::Sender<UploadEvent>,
) -> Result<(), UploadError> {
    let file_size = tokio::fs::metadata(path)
        .await
        .map_err(shipstash_transfer::TransferError::from)?
        .len();
    let part_size = plan.part_size_bytes();
    let total = plan.chunked_number_parts;

    info!(
        file = %path.display(),
        parts = total,
        part_size,
        "uploading via chunked transfer"
    );

    for part in 1..=total {
        let range = part_range(part, part_size, file_size);
        info!(part, total, length = range.length, "uploading part");

        let ticket = client
            .request_part_ticket(scope, pending_upload_id, part, range.length)
            .await
            .map_err(|source| UploadError::Part {
                part,
                total,
                source,
            })?;

        let reader = open_range(path, range.start, range.length).await?;
        client
            .put_part(&ticket.part_presigned_url, range.length, reader)
            .await
            .map_err(|source| UploadError::Part {
                part,
                total,
                source,
            })?;

        let _ = events.send(UploadEvent::PartUploaded { part, total }).await;
    }

    Ok(())
}
