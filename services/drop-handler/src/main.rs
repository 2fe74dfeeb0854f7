use jedi_core::{logging, DropConfig, DropHandler, DropResponse, KeyService, ObjectStore, StorageEvent};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

mod kms;
mod s3;
mod state;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_json();

    let config = DropConfig::from_env()?;
    info!(
        secret_bucket = %config.secret_bucket,
        drop_bucket = ?config.drop_bucket,
        "Jedi drop handler starting"
    );
    let handler = state::connect(config).await;

    run(service_fn(|event| handle_event(event, &handler))).await
}

async fn handle_event<S, K>(
    event: LambdaEvent<StorageEvent>,
    handler: &DropHandler<S, K>,
) -> Result<Option<DropResponse>, Error>
where
    S: ObjectStore,
    K: KeyService,
{
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "Handling drop event");
    Ok(handler.handle(&payload).await?)
}
