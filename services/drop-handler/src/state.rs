use aws_sdk_kms::Client as KmsClient;
use aws_sdk_s3::Client as S3Client;
use jedi_core::{DropConfig, DropHandler};

use crate::kms::KmsKeyService;
use crate::s3::S3ObjectStore;

pub type AppState = DropHandler<S3ObjectStore, KmsKeyService>;

/// Build the handler context from the ambient AWS configuration.
pub async fn connect(config: DropConfig) -> AppState {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let s3 = S3Client::new(&aws_config);
    let kms = KmsClient::new(&aws_config);

    DropHandler::new(S3ObjectStore::new(s3), KmsKeyService::new(kms), config)
}
