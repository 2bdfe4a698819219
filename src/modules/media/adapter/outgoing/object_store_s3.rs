use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::modules::media::application::ports::outgoing::object_store_gateway::{
    ObjectHead, ObjectStoreError, ObjectStoreGateway, SignUrlError,
};
use crate::shared::config::AppConfig;

fn map_sign_error(msg: &str) -> SignUrlError {
    let m = msg.to_lowercase();
    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        SignUrlError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        SignUrlError::BucketNotFound
    } else if m.contains("invalid") || m.contains("config") || m.contains("configuration") {
        SignUrlError::Configuration
    } else {
        SignUrlError::Infrastructure
    }
}

fn map_object_error(msg: &str) -> ObjectStoreError {
    let m = msg.to_lowercase();
    if m.contains("404") || m.contains("not found") || m.contains("nosuchkey") {
        ObjectStoreError::NotFound
    } else if m.contains("timeout")
        || m.contains("dns")
        || m.contains("connection")
        || m.contains("network")
    {
        ObjectStoreError::NetworkInterrupted
    } else {
        ObjectStoreError::Infrastructure
    }
}

/// Internal seam so the adapter is testable without standing up a real S3
/// client or mocking its request/response types directly.
#[async_trait]
trait S3Client: Send + Sync {
    async fn sign_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, String>;

    async fn sign_get_url(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, String>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String>;

    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<(), String>;

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, String>;
}

#[cfg(test)]
struct ArcS3Client(Arc<dyn S3Client>);

#[cfg(test)]
#[async_trait]
impl S3Client for ArcS3Client {
    async fn sign_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, String> {
        self.0.sign_put_url(bucket, key, content_type, ttl).await
    }

    async fn sign_get_url(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, String> {
        self.0.sign_get_url(bucket, key, ttl).await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String> {
        self.0.delete_object(bucket, key).await
    }

    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<(), String> {
        self.0.download_to(bucket, key, path).await
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, String> {
        self.0.head_object(bucket, key).await
    }
}

/// Production adapter implementing `ObjectStoreGateway` against an
/// S3-compatible endpoint (Cloudflare R2 in the reference deployment).
#[derive(Clone)]
pub struct S3ObjectStoreGateway {
    client: Arc<OnceCell<Box<dyn S3Client>>>,
    bucket: String,
    endpoint: Option<String>,
    region: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
}

impl S3ObjectStoreGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            bucket: config.storage_bucket.clone(),
            endpoint: config.storage_endpoint.clone(),
            region: config.storage_region.clone(),
            access_key: config.storage_access_key.clone(),
            secret_key: config.storage_secret_key.clone(),
        }
    }

    async fn get_client(&self) -> Result<&dyn S3Client, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real = RealS3Client::new(
                    self.endpoint.clone(),
                    self.region.clone(),
                    self.access_key.clone(),
                    self.secret_key.clone(),
                )
                .await?;
                Ok(Box::new(real) as Box<dyn S3Client>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn S3Client>, bucket: String) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcS3Client(client)) as Box<dyn S3Client>);
        Self {
            client: Arc::new(once),
            bucket,
            endpoint: None,
            region: None,
            access_key: None,
            secret_key: None,
        }
    }
}

#[async_trait]
impl ObjectStoreGateway for S3ObjectStoreGateway {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, SignUrlError> {
        let client = self.get_client().await.map_err(|_| SignUrlError::Infrastructure)?;
        client
            .sign_put_url(&self.bucket, key, content_type, ttl)
            .await
            .map_err(|e| map_sign_error(&e))
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, SignUrlError> {
        let client = self.get_client().await.map_err(|_| SignUrlError::Infrastructure)?;
        client
            .sign_get_url(&self.bucket, key, ttl)
            .await
            .map_err(|e| map_sign_error(&e))
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        let client = self.get_client().await.map_err(|_| ObjectStoreError::Infrastructure)?;
        match client.delete_object(&self.bucket, key).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let mapped = map_object_error(&e);
                // delete of an absent key is a success per the gateway's idempotent contract
                if mapped == ObjectStoreError::NotFound {
                    Ok(())
                } else {
                    Err(mapped)
                }
            }
        }
    }

    async fn delete_many(&self, keys: Vec<String>) -> Result<(), ObjectStoreError> {
        for key in keys {
            self.delete(&key).await?;
        }
        Ok(())
    }

    async fn download_to(&self, key: &str, path: &Path) -> Result<(), ObjectStoreError> {
        let client = self.get_client().await.map_err(|_| ObjectStoreError::Infrastructure)?;
        client
            .download_to(&self.bucket, key, path)
            .await
            .map_err(|e| map_object_error(&e))
    }

    async fn head(&self, key: &str) -> Result<ObjectHead, ObjectStoreError> {
        let client = self.get_client().await.map_err(|_| ObjectStoreError::Infrastructure)?;
        client
            .head_object(&self.bucket, key)
            .await
            .map_err(|e| map_object_error(&e))
    }
}

// ============================================================================
// Real S3 client (aws-sdk-s3)
// ============================================================================

struct RealS3Client {
    client: aws_sdk_s3::Client,
}

impl RealS3Client {
    async fn new(
        endpoint: Option<String>,
        region: Option<String>,
        access_key: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("initializing S3-compatible object store client");

        let region_provider = aws_config::meta::region::RegionProviderChain::first_try(
            region.clone().map(aws_sdk_s3::config::Region::new),
        )
        .or_else(aws_sdk_s3::config::Region::new("auto"));

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(region_provider);

        if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "session_pipeline_storage",
            ));
        }

        let shared_config = loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&shared_config).force_path_style(true);
        if let Some(endpoint) = endpoint {
            s3_config = s3_config.endpoint_url(endpoint);
        }

        let client = aws_sdk_s3::Client::from_conf(s3_config.build());

        Ok(Self { client })
    }
}

#[async_trait]
impl S3Client for RealS3Client {
    async fn sign_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, String> {
        let presign_config = PresigningConfig::expires_in(ttl).map_err(|e| e.to_string())?;
        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presign_config)
            .await
            .map_err(|e| e.to_string())?;

        Ok(presigned.uri().to_string())
    }

    async fn sign_get_url(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, String> {
        let presign_config = PresigningConfig::expires_in(ttl).map_err(|e| e.to_string())?;
        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| e.to_string())?;

        Ok(presigned.uri().to_string())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn download_to(&self, bucket: &str, key: &str, path: &Path) -> Result<(), String> {
        let mut output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let mut file = tokio::fs::File::create(path).await.map_err(|e| e.to_string())?;
        use futures::StreamExt;
        use tokio::io::AsyncWriteExt;
        while let Some(chunk) = output.body.next().await {
            let chunk = chunk.map_err(|e| e.to_string())?;
            file.write_all(&chunk).await.map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, String> {
        let output = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Ok(ObjectHead {
            content_type: output.content_type().map(str::to_string),
            byte_size: output.content_length(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeS3Client {
        sign_put_result: Mutex<Result<String, String>>,
        sign_get_result: Mutex<Result<String, String>>,
        delete_result: Mutex<Result<(), String>>,
        head_result: Mutex<Result<ObjectHead, String>>,
    }

    impl Default for FakeS3Client {
        fn default() -> Self {
            Self {
                sign_put_result: Mutex::new(Ok("https://example.test/put".to_string())),
                sign_get_result: Mutex::new(Ok("https://example.test/get".to_string())),
                delete_result: Mutex::new(Ok(())),
                head_result: Mutex::new(Ok(ObjectHead { content_type: None, byte_size: None })),
            }
        }
    }

    #[async_trait]
    impl S3Client for FakeS3Client {
        async fn sign_put_url(
            &self,
            _bucket: &str,
            _key: &str,
            _content_type: &str,
            _ttl: Duration,
        ) -> Result<String, String> {
            self.sign_put_result.lock().unwrap().clone()
        }

        async fn sign_get_url(&self, _bucket: &str, _key: &str, _ttl: Duration) -> Result<String, String> {
            self.sign_get_result.lock().unwrap().clone()
        }

        async fn delete_object(&self, _bucket: &str, _key: &str) -> Result<(), String> {
            self.delete_result.lock().unwrap().clone()
        }

        async fn download_to(&self, _bucket: &str, _key: &str, _path: &Path) -> Result<(), String> {
            Ok(())
        }

        async fn head_object(&self, _bucket: &str, _key: &str) -> Result<ObjectHead, String> {
            self.head_result.lock().unwrap().clone()
        }
    }

    fn gateway_with(fake: FakeS3Client) -> S3ObjectStoreGateway {
        S3ObjectStoreGateway::with_client(Arc::new(fake), "bucket".to_string())
    }

    #[tokio::test]
    async fn presign_put_returns_the_client_url() {
        let gw = gateway_with(FakeS3Client::default());
        let url = gw.presign_put("sessions/a/audio/x.wav", "audio/wav", Duration::from_secs(600)).await;
        assert_eq!(url, Ok("https://example.test/put".to_string()));
    }

    #[tokio::test]
    async fn sign_error_is_classified_as_access_denied() {
        let fake = FakeS3Client::default();
        *fake.sign_put_result.lock().unwrap() = Err("AccessDenied: forbidden".to_string());
        let gw = gateway_with(fake);
        let result = gw.presign_put("k", "image/png", Duration::from_secs(600)).await;
        assert_eq!(result, Err(SignUrlError::AccessDenied));
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_a_success() {
        let fake = FakeS3Client::default();
        *fake.delete_result.lock().unwrap() = Err("NoSuchKey: not found".to_string());
        let gw = gateway_with(fake);
        assert_eq!(gw.delete("missing").await, Ok(()));
    }
}
