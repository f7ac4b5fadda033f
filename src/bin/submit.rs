use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, Error as LambdaError, Request as LambdaRequest};
use tracing::info;

use candidate_lambdas::common::errors::into_lambda_result;
use candidate_lambdas::common::utils::init_tracing;
use candidate_lambdas::common::table_name;
use candidate_lambdas::handlers::submit::process_request;
use candidate_lambdas::store::DynamoCandidateStore;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let table_name = table_name();
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoCandidateStore::new(aws_sdk_dynamodb::Client::new(&config), table_name);
    info!("Submitting candidates into table {}", store.table_name());

    run(service_fn(|request: LambdaRequest| async {
        into_lambda_result(process_request(request, &store).await)
    }))
    .await
}
