use hyper::Method;

use super::{Client, CreateMultipartUploadArgs};
use crate::datatype::CreateMultipartUploadResult;
use crate::error::{Result, ValueError};

/// Operating multiUpload
impl Client {
    /**
    This action initiates a multipart upload and returns an upload ID.

    The response also carries the server-side encryption applied to the upload,
    the abort date of a matching lifecycle rule and the request-charged flag.
    ## Example
    ```rust
    # use multipart_rsc::Client;
    # use multipart_rsc::client::CreateMultipartUploadArgs;
    # use multipart_rsc::sse::SseS3;
    # async fn example(client: Client) -> multipart_rsc::error::Result<()> {
    let args = CreateMultipartUploadArgs::new("bucket", "file.txt").sse(&SseS3::new());
    let result = client.create_multipart_upload(args).await?;
    println!("upload id: {:?}", result.upload_id());
    # Ok(())
    # }
    ```
    */
    pub async fn create_multipart_upload<A>(&self, args: A) -> Result<CreateMultipartUploadResult>
    where
        A: Into<CreateMultipartUploadArgs>,
    {
        let args: CreateMultipartUploadArgs = args.into();
        if args.sse_tls_required && !self.is_secure() {
            return Err(ValueError::from(
                "SSE operation must be performed over a secure connection.",
            )
            .into());
        }
        let res = self
            .executor(Method::POST)
            .bucket_name(args.bucket_name())
            .object_name(args.object_name())
            .query_string("uploads")
            .headers_merge(args.request_headers()?)
            .send_ok()
            .await?;
        let headers = res.headers().clone();
        let body = res.bytes().await?;
        let result = CreateMultipartUploadResult::from_response(&headers, &body)?;
        log::debug!(
            "created multipart upload {:?} for {}/{}",
            result.upload_id(),
            args.bucket_name(),
            args.object_name()
        );
        Ok(result)
    }
}
