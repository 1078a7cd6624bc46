// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Amazon S3 backend for class-migration
//!
//! Credentials come from one section of a shared credentials file and are
//! resolved when connecting, so a bad profile fails the run before the
//! bucket is listed.

use async_trait::async_trait;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{MetadataDirective, Object};
use tracing::{debug, info, warn};

use class_migration::{
    AuthError, CopyError, ListError, ListPage, ObjectDescriptor, ObjectStore, RunConfig,
    StorageClass,
};

/// [`ObjectStore`] over the S3 API.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client for `config`'s region, endpoint and credentials.
    pub async fn connect(config: &RunConfig) -> Result<Self, AuthError> {
        let source = config.credentials();

        let files = ProfileFiles::builder()
            .with_file(ProfileFileKind::Credentials, &source.file)
            .build();
        let provider = ProfileFileCredentialsProvider::builder()
            .profile_files(files)
            .profile_name(&source.profile)
            .build();

        provider
            .provide_credentials()
            .await
            .map_err(|e| AuthError {
                profile: source.profile.clone(),
                message: format!(
                    "{} ({})",
                    DisplayErrorContext(&e),
                    source.file.display()
                ),
            })?;

        info!(
            profile = %source.profile,
            file = %source.file.display(),
            region = %config.region(),
            "Loaded credentials"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region().to_string()))
            .credentials_provider(provider);
        if let Some(endpoint) = config.endpoint_url() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        // Custom endpoints are S3-compatible stores; use path-style addressing
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint_url().is_some())
            .build();

        Ok(Self::from_client(Client::from_conf(s3_config)))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, ListError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation)
            .send()
            .await
            .map_err(|e| ListError {
                bucket: bucket.to_string(),
                message: describe_sdk_error(&e),
            })?;

        let objects = output
            .contents()
            .iter()
            .filter_map(descriptor_from)
            .collect();

        let next = if output.is_truncated().unwrap_or(false) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ListPage { objects, next })
    }

    async fn copy_in_place(
        &self,
        bucket: &str,
        key: &str,
        target: StorageClass,
    ) -> Result<(), CopyError> {
        let result = self
            .client
            .copy_object()
            .bucket(bucket)
            .key(key)
            .copy_source(copy_source(bucket, key))
            .storage_class(aws_sdk_s3::types::StorageClass::from(target.as_ref()))
            .metadata_directive(MetadataDirective::Copy)
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!(bucket = %bucket, key = %key, target = %target, "CopyObject succeeded");
                Ok(())
            }
            Err(e) if e.as_service_error().is_some() => {
                Err(CopyError::service(describe_sdk_error(&e)))
            }
            Err(e) => Err(CopyError::transport(describe_sdk_error(&e))),
        }
    }
}

/// `CopySource` header value for an in-place copy.
fn copy_source(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, urlencoding::encode(key))
}

/// Listing entries without a class are STANDARD objects.
fn descriptor_from(object: &Object) -> Option<ObjectDescriptor> {
    let Some(key) = object.key() else {
        warn!("Listing returned an object without a key");
        return None;
    };
    let current_storage_class = match object.storage_class() {
        Some(class) => StorageClass::from_store(class.as_str()),
        None => Some(StorageClass::Standard),
    };
    Some(ObjectDescriptor {
        key: key.to_string(),
        current_storage_class,
    })
}

fn describe_sdk_error<E, R>(e: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match e.as_service_error() {
        Some(service) => format!(
            "{}: {}",
            service.code().unwrap_or("unknown"),
            service.message().unwrap_or("no message")
        ),
        None => DisplayErrorContext(e).to_string(),
    }
}
