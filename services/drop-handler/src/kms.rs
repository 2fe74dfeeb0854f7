use async_trait::async_trait;
use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::Client as KmsClient;
use bytes::Bytes;
use jedi_core::{Error, KeyService, Result};

/// [`KeyService`] backed by KMS symmetric Encrypt/Decrypt.
pub struct KmsKeyService {
    client: KmsClient,
}

impl KmsKeyService {
    pub fn new(client: KmsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyService for KmsKeyService {
    async fn encrypt(&self, key_id: &str, plaintext: Bytes) -> Result<Bytes> {
        let output = self
            .client
            .encrypt()
            .key_id(key_id)
            .plaintext(Blob::new(plaintext.to_vec()))
            .send()
            .await
            .map_err(|err| Error::key_service("encrypt", DisplayErrorContext(err)))?;

        output
            .ciphertext_blob()
            .map(|blob| Bytes::copy_from_slice(blob.as_ref()))
            .ok_or_else(|| Error::key_service("encrypt", "response carried no ciphertext"))
    }

    async fn decrypt(&self, key_id: &str, ciphertext: Bytes) -> Result<Bytes> {
        let output = self
            .client
            .decrypt()
            .key_id(key_id)
            .ciphertext_blob(Blob::new(ciphertext.to_vec()))
            .send()
            .await
            .map_err(|err| Error::key_service("decrypt", DisplayErrorContext(err)))?;

        output
            .plaintext()
            .map(|blob| Bytes::copy_from_slice(blob.as_ref()))
            .ok_or_else(|| Error::key_service("decrypt", "response carried no plaintext"))
    }
}
