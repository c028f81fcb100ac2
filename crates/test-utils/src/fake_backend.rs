use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tmpguard::errors::Result;
use tmpguard::exec::{ExecutionResult, OperationBackend, OperationDescriptor};

/// A fake backend that:
/// - records every descriptor it is handed
/// - never spawns anything
/// - answers each dispatch with a clone of `response`.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    recorded: Arc<Mutex<Vec<OperationDescriptor>>>,
    response: ExecutionResult,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::with_response(ExecutionResult {
            stdout: None,
            stderr: None,
            exit_code: 0,
            cancelled: false,
        })
    }

    pub fn with_response(response: ExecutionResult) -> Self {
        Self {
            recorded: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn recorded(&self) -> Vec<OperationDescriptor> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationBackend for RecordingBackend {
    fn dispatch(
        &self,
        descriptor: OperationDescriptor,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        let recorded = Arc::clone(&self.recorded);
        let response = self.response.clone();

        Box::pin(async move {
            {
                let mut guard = recorded.lock().unwrap();
                guard.push(descriptor);
            }
            Ok(response)
        })
    }
}
