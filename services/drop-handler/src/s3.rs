use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use jedi_core::{Error, ObjectStore, Presence, Result};

/// [`ObjectStore`] backed by S3.
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| Error::object_store("get", bucket, key, DisplayErrorContext(err)))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|err| Error::object_store("get", bucket, key, err))?;
        Ok(body.into_bytes())
    }

    async fn put(&self, bucket: &str, key: &str, body: Bytes) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| Error::object_store("put", bucket, key, DisplayErrorContext(err)))?;
        Ok(())
    }

    async fn head(&self, bucket: &str, key: &str) -> Result<Presence> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(Presence::Found),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(Presence::NotFound)
                } else {
                    Err(Error::object_store(
                        "head",
                        bucket,
                        key,
                        DisplayErrorContext(service_err),
                    ))
                }
            }
        }
    }

    async fn list(&self, bucket: &str) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page
                .map_err(|err| Error::object_store("list", bucket, "", DisplayErrorContext(err)))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }
        Ok(keys)
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| Error::object_store("delete", bucket, key, DisplayErrorContext(err)))?;
        Ok(())
    }
}
