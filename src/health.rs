use crate::index::CandidateIndex;
use std::sync::Arc;
use tonic::{Request, Response, Status};

pub mod health {
    tonic::include_proto!("grpc.health.v1");
}

use health::health_check_response::ServingStatus;
use health::health_server::Health;
use health::{HealthCheckRequest, HealthCheckResponse};

#[derive(Clone)]
pub struct HealthService {
    index: Arc<CandidateIndex>,
}

impl HealthService {
    pub fn new(index: Arc<CandidateIndex>) -> Self {
        Self { index }
    }
}

#[tonic::async_trait]
impl Health for HealthService {
    async fn check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        // Serving only once candidates have been loaded
        let status = if self.index.is_available().await {
            ServingStatus::Serving
        } else {
            ServingStatus::NotServing
        };
        Ok(Response::new(HealthCheckResponse {
            status: status as i32,
        }))
    }
}
