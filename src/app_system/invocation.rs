use http::StatusCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::domain::ErrorBody;
use crate::handlers::{build_response, Request, Router};

/// Serve newline-delimited JSON requests from `reader`, writing one JSON
/// response line per request to `writer`. Returns the number of requests
/// answered once the input is exhausted.
#[instrument(name = "invocation_loop", skip_all)]
pub async fn serve<R, W>(mut reader: R, mut writer: W, router: &Router) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut served = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.trim_ascii().is_empty() {
            continue;
        }

        // Lines that are not UTF-8 land in the 400 branch
        let response = match serde_json::from_slice::<Request>(&line) {
            Ok(request) => router.handle(&request).await,
            Err(e) => {
                warn!(error = %e, "Could not decode request");
                build_response(StatusCode::BAD_REQUEST, &ErrorBody::new("invalid request"))
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;

        served += 1;
        debug!(status = response.status_code, "Response written");
    }

    info!(served, "Input closed");
    Ok(served)
}
